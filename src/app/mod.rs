//! App module - contains the main application state and logic

mod board;
mod fetch;
mod images;

use crate::constants::HTTP_TIMEOUT_SECS;
use crate::deck::build_deck;
use crate::game::Game;
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use crate::utils::get_cache_dir;
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) cache_dir: PathBuf,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) client: reqwest::Client,
    // Loading
    pub(crate) load_started: bool,
    pub(crate) load_status: Arc<Mutex<LoadStatus>>,
    pub(crate) cancel_token: Option<CancellationToken>,
    pub(crate) entries: Vec<Entry>,
    // Images, keyed by card identifier
    pub(crate) image_slots: Arc<Mutex<HashMap<String, ImageSlot>>>,
    pub(crate) textures: HashMap<String, egui::TextureHandle>,
    pub(crate) card_back: Option<egui::TextureHandle>,
    // Game
    pub(crate) game: Option<Game>,
    pub(crate) games_played: u32,
    // Window / dialogs
    pub(crate) show_settings: bool,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let cache_dir = get_cache_dir().join("cards");
        if let Err(e) = std::fs::create_dir_all(&cache_dir) {
            warn!(error = %e, path = %cache_dir.display(), "Failed to create image cache dir");
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("memory-match/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self {
            settings,
            data_dir,
            cache_dir,
            runtime,
            client,
            load_started: false,
            load_status: Arc::new(Mutex::new(LoadStatus::Loading)),
            cancel_token: None,
            entries: Vec::new(),
            image_slots: Arc::new(Mutex::new(HashMap::new())),
            textures: HashMap::new(),
            card_back: None,
            game: None,
            games_played: 0,
            show_settings: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
        }
    }

    pub fn save_settings(&mut self) {
        if let Some(pos) = self.window_pos {
            self.settings.window_x = Some(pos.x);
            self.settings.window_y = Some(pos.y);
        }
        if let Some(size) = self.window_size {
            self.settings.window_w = Some(size.x);
            self.settings.window_h = Some(size.y);
        }
        self.settings.save(&self.data_dir);
    }

    /// Deal a fresh shuffled deck from the current entries and reset counters.
    pub fn new_game(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let cards = build_deck(&self.entries, &mut rand::thread_rng());
        let game = Game::new(cards, self.settings.flip_back_delay());
        self.games_played += 1;
        info!(
            game = self.games_played,
            pairs = game.total_pairs(),
            "Dealt new game"
        );
        self.game = Some(game);
    }

    pub fn card_size(&self) -> f32 {
        if self.settings.large_cards {
            theme::CARD_LARGE
        } else {
            theme::CARD_SMALL
        }
    }
}

#[cfg(test)]
impl App {
    /// Headless app with no window, fonts or network activity.
    pub(crate) fn for_tests(entries: Vec<Entry>) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        Self {
            settings: Settings::default(),
            data_dir: std::env::temp_dir(),
            cache_dir: std::env::temp_dir(),
            runtime,
            client: reqwest::Client::new(),
            load_started: true,
            load_status: Arc::new(Mutex::new(LoadStatus::Ready)),
            cancel_token: None,
            entries,
            image_slots: Arc::new(Mutex::new(HashMap::new())),
            textures: HashMap::new(),
            card_back: None,
            game: None,
            games_played: 0,
            show_settings: false,
            window_pos: None,
            window_size: None,
            needs_center: false,
        }
    }
}
