//! Board rendering: header, card grid, loading/error screens, settings window

use super::App;
use crate::game::{ClickOutcome, Phase};
use crate::theme;
use crate::types::LoadStatus;
use crate::ui::components::{board_layout, paint_card, stat, CardFace};
use eframe::egui;
use std::time::{Duration, Instant};
use tracing::{debug, info};

impl App {
    pub(crate) fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .exact_height(theme::HEADER_HEIGHT)
            .show_separator_line(false)
            .frame(theme::header_frame())
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("Memory")
                                .size(theme::FONT_DISPLAY)
                                .strong()
                                .color(theme::TEXT_PRIMARY),
                        )
                        .selectable(false),
                    );
                    ui.add_space(theme::SPACING_XL * 2.0);

                    if let Some(game) = &self.game {
                        stat(
                            ui,
                            egui_phosphor::regular::CHECK_CIRCLE,
                            "Matches",
                            game.match_count(),
                            theme::STATUS_SUCCESS,
                        );
                        ui.add_space(theme::SPACING_XL);
                        stat(
                            ui,
                            egui_phosphor::regular::X_CIRCLE,
                            "Errors",
                            game.error_count(),
                            theme::STATUS_ERROR,
                        );
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(theme::button(egui_phosphor::regular::GEAR))
                            .on_hover_text("Settings")
                            .clicked()
                        {
                            self.show_settings = !self.show_settings;
                        }
                        if ui
                            .add(theme::button(format!(
                                "{}  Reload",
                                egui_phosphor::regular::ARROWS_CLOCKWISE
                            )))
                            .on_hover_text("Fetch a new set of cards")
                            .clicked()
                        {
                            info!("Reload requested");
                            self.start_loading(ctx);
                        }
                        let can_deal = !self.entries.is_empty();
                        if ui
                            .add_enabled(
                                can_deal,
                                theme::button_accent(format!(
                                    "{}  New game",
                                    egui_phosphor::regular::SHUFFLE
                                )),
                            )
                            .clicked()
                        {
                            self.new_game();
                        }
                    });
                });
            });
    }

    pub(crate) fn render_central(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(theme::SPACING_XL))
            .show(ctx, |ui| {
                if self.game.is_some() {
                    self.render_board(ui);
                    return;
                }
                match self.load_status() {
                    LoadStatus::Failed(message) => self.render_failed(ui, ctx, &message),
                    _ => render_loading(ui),
                }
            });
    }

    fn render_board(&mut self, ui: &mut egui::Ui) {
        let Some(game) = &self.game else {
            return;
        };

        let spacing = theme::SPACING_MD;
        let cards = game.cards().to_vec();
        let locked = game.phase() == Phase::Evaluating;
        let complete = game.is_complete();
        let (cols, size) = board_layout(ui.available_width(), self.card_size(), spacing, cards.len());
        let board_width = cols as f32 * size + (cols as f32 - 1.0) * spacing;
        let left_pad = ((ui.available_width() - board_width) / 2.0).max(0.0);

        let mut clicked: Option<String> = None;
        let mut deal = false;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .id_salt("board_scroll")
            .show(ui, |ui| {
                if complete {
                    deal = self.render_completion(ui);
                    ui.add_space(theme::SPACING_LG);
                }

                for row in cards.chunks(cols) {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);
                        ui.add_space(left_pad);
                        for card in row {
                            let (rect, response) =
                                ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
                            if !ui.is_rect_visible(rect) {
                                continue;
                            }

                            let Some(game) = &self.game else {
                                return;
                            };
                            let matched = game.is_matched(&card.unique_key);
                            let revealed = game.is_revealed(&card.unique_key);

                            let face = if revealed {
                                self.revealed_face(&card.identifier, &card.image_title)
                            } else {
                                CardFace::Back(self.card_back.as_ref())
                            };
                            let overlay = if revealed || locked {
                                None
                            } else {
                                theme::card_hover_overlay(&response)
                            };
                            paint_card(ui, rect, face, matched, overlay);

                            let response = if revealed && !card.image_title.is_empty() {
                                response.on_hover_text(card.image_title.as_str())
                            } else {
                                response
                            };
                            if response.clicked() {
                                clicked = Some(card.unique_key.clone());
                            }
                        }
                    });
                    ui.add_space(spacing);
                }
            });

        self.apply_board_input(ui.ctx(), clicked, deal);
    }

    /// Act on board input once the frame's cards are drawn. A redeal wins
    /// over a card click, whose key belongs to the deck being replaced.
    fn apply_board_input(&mut self, ctx: &egui::Context, clicked: Option<String>, deal: bool) {
        if deal {
            self.new_game();
        } else if let Some(key) = clicked {
            self.handle_card_click(ctx, &key);
        }
    }

    fn handle_card_click(&mut self, ctx: &egui::Context, key: &str) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let now = Instant::now();
        match game.click(key, now) {
            ClickOutcome::Matched { complete: true } => {
                info!(
                    errors = game.error_count(),
                    "Game complete"
                );
            }
            ClickOutcome::Rejected(reason) => debug!(key, ?reason, "Ignored click"),
            outcome => debug!(key, ?outcome, face_up = game.selected().len(), "Card flipped"),
        }
        if let Some(remaining) = game.time_until_clear(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    /// Completion banner. Returns true when "Play again" was clicked.
    fn render_completion(&self, ui: &mut egui::Ui) -> bool {
        let Some(game) = &self.game else {
            return false;
        };
        let (pairs, errors) = (game.total_pairs(), game.error_count());
        let mut deal = false;

        theme::modal_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::TROPHY)
                        .size(theme::FONT_DISPLAY)
                        .color(theme::STATUS_WARNING),
                );
                ui.label(
                    egui::RichText::new("You found every pair!")
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                let mistakes = match errors {
                    0 => "without a single mistake".to_string(),
                    1 => "with 1 mistake".to_string(),
                    n => format!("with {} mistakes", n),
                };
                ui.label(
                    egui::RichText::new(format!("{} pairs {}", pairs, mistakes))
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_MUTED),
                );
                ui.add_space(theme::SPACING_MD);
                deal = ui.add(theme::button_accent("Play again")).clicked();
            });
        });

        deal
    }

    fn render_failed(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, message: &str) {
        let mut retry = false;
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.label(
                egui::RichText::new(egui_phosphor::regular::WARNING)
                    .size(theme::FONT_DISPLAY)
                    .color(theme::STATUS_ERROR),
            );
            ui.label(
                egui::RichText::new("Could not load the cards")
                    .size(theme::FONT_TITLE)
                    .color(theme::TEXT_PRIMARY),
            );
            ui.label(
                egui::RichText::new(message)
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(theme::SPACING_LG);
            retry = ui.add(theme::button_accent("Retry")).clicked();
        });
        if retry {
            info!("Retrying card listing");
            self.start_loading(ctx);
        }
    }

    pub(crate) fn render_settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let mut open = true;
        let mut delay_ms = self.settings.flip_back_delay_ms;

        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .frame(theme::modal_frame())
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-theme::SPACING_XL, theme::HEADER_HEIGHT + theme::SPACING_SM))
            .show(ctx, |ui| {
                ui.set_width(260.0);
                if theme::settings_checkbox(ui, self.settings.large_cards, "Large cards") {
                    self.settings.large_cards = !self.settings.large_cards;
                }
                ui.add_space(theme::SPACING_MD);
                ui.label(
                    egui::RichText::new("Flip-back delay")
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add(
                    egui::Slider::new(&mut delay_ms, 0..=3000)
                        .step_by(100.0)
                        .suffix(" ms"),
                );
                ui.add_space(theme::SPACING_MD);
                ui.label(
                    egui::RichText::new(format!("Cards per game: {}", self.settings.page_size_clamped()))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            });

        if delay_ms != self.settings.flip_back_delay_ms {
            self.settings.flip_back_delay_ms = delay_ms;
            if let Some(game) = self.game.as_mut() {
                game.set_flip_back_delay(Duration::from_millis(delay_ms));
            }
        }
        if !open {
            self.show_settings = false;
            self.save_settings();
        }
    }
}

fn render_loading(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.35);
        ui.add(egui::Spinner::new().size(32.0).color(theme::ACCENT));
        ui.add_space(theme::SPACING_MD);
        ui.label(
            egui::RichText::new("Loading cards...")
                .size(theme::FONT_TITLE)
                .color(theme::TEXT_MUTED),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::entry;

    fn completed_app() -> App {
        let mut app = App::for_tests(vec![entry("otter"), entry("lynx")]);
        app.new_game();
        let mut now = Instant::now();
        let game = app.game.as_mut().unwrap();
        let keys: Vec<String> = game.cards().iter().map(|c| c.unique_key.clone()).collect();
        for key in &keys {
            let partner = keys
                .iter()
                .find(|k| *k != key && crate::deck::identifier_of(k) == crate::deck::identifier_of(key))
                .unwrap()
                .clone();
            if !game.is_matched(key) {
                game.click(key, now);
                game.click(&partner, now);
                now += Duration::from_secs(5);
            }
        }
        assert!(game.is_complete());
        app
    }

    #[test]
    fn test_play_again_ignores_click_from_old_deck() {
        let mut app = completed_app();
        let stale = app.game.as_ref().unwrap().cards()[0].unique_key.clone();

        app.apply_board_input(&egui::Context::default(), Some(stale), true);

        let game = app.game.as_ref().unwrap();
        assert_eq!(app.games_played, 2);
        assert_eq!(game.total_pairs(), 2);
        assert_eq!(game.match_count(), 0);
        assert!(game.selected().is_empty());
        assert!(!game.is_complete());
    }

    #[test]
    fn test_card_click_applies_without_redeal() {
        let mut app = App::for_tests(vec![entry("otter"), entry("lynx")]);
        app.new_game();
        let key = app.game.as_ref().unwrap().cards()[0].unique_key.clone();

        app.apply_board_input(&egui::Context::default(), Some(key.clone()), false);

        assert_eq!(app.games_played, 1);
        assert!(app.game.as_ref().unwrap().is_selected(&key));
    }

    #[test]
    fn test_completed_board_renders_headless() {
        let mut app = completed_app();
        let ctx = egui::Context::default();
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| app.render_board(ui));
            });
        }
        assert_eq!(app.games_played, 1);
        assert!(app.game.as_ref().unwrap().is_complete());
    }
}
