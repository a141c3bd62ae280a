//! Card image prefetch, disk cache and texture upload

use super::App;
use crate::constants::IMAGE_FETCH_CONCURRENCY;
use crate::loader::{decode_image, fetch_image, LoadError};
use crate::types::ImageSlot;
use crate::ui::components::CardFace;
use crate::utils::{cache_file_name, rasterize_card_back};
use eframe::egui;
use futures::StreamExt;
use std::path::Path;
use tracing::{debug, warn};

/// Read a cached image, or fetch it and write it to the cache.
async fn load_card_image(
    client: &reqwest::Client,
    url: &str,
    cache_path: &Path,
) -> Result<egui::ColorImage, LoadError> {
    if let Ok(bytes) = tokio::fs::read(cache_path).await {
        match decode_image(&bytes) {
            Ok(image) => return Ok(image),
            Err(e) => warn!(error = %e, path = %cache_path.display(), "Discarding bad cached image"),
        }
    }

    let bytes = fetch_image(client, url).await?;
    let image = decode_image(&bytes)?;
    if let Err(e) = tokio::fs::write(cache_path, &bytes).await {
        warn!(error = %e, path = %cache_path.display(), "Failed to cache card image");
    }
    Ok(image)
}

impl App {
    pub fn start_image_prefetch(&mut self, ctx: &egui::Context) {
        let Some(token) = self.cancel_token.clone() else {
            return;
        };
        let jobs: Vec<(String, String)> = self
            .entries
            .iter()
            .filter(|e| e.is_playable())
            .map(|e| (e.slug().to_string(), e.image_url().to_string()))
            .collect();

        if let Ok(mut slots) = self.image_slots.lock() {
            for (identifier, _) in &jobs {
                slots.insert(identifier.clone(), ImageSlot::Pending);
            }
        }

        debug!(count = jobs.len(), "Starting card image prefetch");

        let client = self.client.clone();
        let slots = self.image_slots.clone();
        let cache_dir = self.cache_dir.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let work = futures::stream::iter(jobs).for_each_concurrent(
                IMAGE_FETCH_CONCURRENCY,
                |(identifier, url)| {
                    let client = &client;
                    let slots = &slots;
                    let ctx = &ctx;
                    let token = &token;
                    let cache_path = cache_dir.join(cache_file_name(&identifier, &url));
                    async move {
                        let slot = match load_card_image(client, &url, &cache_path).await {
                            Ok(image) => ImageSlot::Decoded(image),
                            Err(e) => {
                                warn!(error = %e, card = %identifier, url = %url, "Failed to load card image");
                                ImageSlot::Failed
                            }
                        };
                        if token.is_cancelled() {
                            return;
                        }
                        if let Ok(mut slots) = slots.lock() {
                            slots.insert(identifier, slot);
                        }
                        ctx.request_repaint();
                    }
                },
            );

            tokio::select! {
                _ = token.cancelled() => debug!("Image prefetch cancelled"),
                _ = work => debug!("Image prefetch finished"),
            }
        });
    }

    /// Move decoded images into GPU textures. Runs on the UI thread.
    pub fn upload_ready_images(&mut self, ctx: &egui::Context) {
        let Ok(mut slots) = self.image_slots.lock() else {
            return;
        };
        for (identifier, slot) in slots.iter_mut() {
            if !matches!(slot, ImageSlot::Decoded(_)) {
                continue;
            }
            if let ImageSlot::Decoded(image) = std::mem::replace(slot, ImageSlot::Uploaded) {
                let texture = ctx.load_texture(
                    format!("card-{}", identifier),
                    image,
                    egui::TextureOptions::LINEAR,
                );
                self.textures.insert(identifier.clone(), texture);
            }
        }
    }

    pub fn ensure_card_back(&mut self, ctx: &egui::Context) {
        if self.card_back.is_some() {
            return;
        }
        if let Some((pixels, w, h)) = rasterize_card_back(256) {
            self.card_back = Some(ctx.load_texture(
                "card-back",
                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    /// Face to draw for a revealed card.
    pub fn revealed_face<'a>(&'a self, identifier: &str, title: &'a str) -> CardFace<'a> {
        if let Some(tex) = self.textures.get(identifier) {
            return CardFace::Image(tex);
        }
        let loading = match self.image_slots.lock() {
            Ok(slots) => !matches!(slots.get(identifier), Some(ImageSlot::Failed) | None),
            Err(_) => false,
        };
        CardFace::Placeholder { title, loading }
    }
}
