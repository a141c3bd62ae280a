//! Content listing loading

use super::App;
use crate::loader::{fetch_listing, listing_url};
use crate::types::LoadStatus;
use eframe::egui;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

impl App {
    /// Fetch a fresh listing, cancelling any load still in flight.
    pub fn start_loading(&mut self, ctx: &egui::Context) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        let token = CancellationToken::new();
        self.cancel_token = Some(token.clone());

        self.game = None;
        self.entries.clear();
        self.textures.clear();
        if let Ok(mut slots) = self.image_slots.lock() {
            slots.clear();
        }
        if let Ok(mut status) = self.load_status.lock() {
            *status = LoadStatus::Loading;
        }

        let url = listing_url(&self.settings.content_url, self.settings.page_size_clamped());
        info!(url = %url, "Loading card listing");

        let client = self.client.clone();
        let status = self.load_status.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => {
                    debug!("Listing fetch cancelled");
                    return;
                }
                result = fetch_listing(&client, &url) => result,
            };

            let next = match result {
                Ok(listing) => {
                    info!(count = listing.entries.len(), "Card listing loaded");
                    LoadStatus::Loaded(listing.entries)
                }
                Err(e) => {
                    error!(error = %e, url = %url, "Failed to load card listing");
                    LoadStatus::Failed(e.to_string())
                }
            };

            if let Ok(mut s) = status.lock() {
                // A reload may have replaced this request while it was finishing
                if !token.is_cancelled() {
                    *s = next;
                }
            }
            ctx.request_repaint();
        });
    }

    /// Pick up a finished listing and deal the first game from it.
    pub fn poll_load(&mut self, ctx: &egui::Context) {
        let loaded = {
            let Ok(mut status) = self.load_status.lock() else {
                return;
            };
            if !matches!(*status, LoadStatus::Loaded(_)) {
                return;
            }
            std::mem::replace(&mut *status, LoadStatus::Ready)
        };

        if let LoadStatus::Loaded(entries) = loaded {
            self.entries = entries;
            self.new_game();
            self.start_image_prefetch(ctx);
        }
    }

    /// Current status for the loading/error screens.
    pub fn load_status(&self) -> LoadStatus {
        self.load_status
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|e| LoadStatus::Failed(e.to_string()))
    }
}
