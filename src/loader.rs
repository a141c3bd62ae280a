//! Content API access: listing fetch, image fetch and decoding

use crate::types::ContentListing;
use eframe::egui;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid content listing: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("content listing has no playable entries")]
    Empty,
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Listing URL with the page-size cap applied
pub fn listing_url(base: &str, page_size: u32) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{}{}per_page={}", base, sep, page_size)
}

pub fn parse_listing(body: &str) -> Result<ContentListing, LoadError> {
    let listing: ContentListing = serde_json::from_str(body)?;
    if !listing.entries.iter().any(|e| e.is_playable()) {
        return Err(LoadError::Empty);
    }
    Ok(listing)
}

pub async fn fetch_listing(client: &reqwest::Client, url: &str) -> Result<ContentListing, LoadError> {
    debug!(url, "Fetching content listing");
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(LoadError::Status(response.status()));
    }
    let body = response.text().await?;
    parse_listing(&body)
}

pub async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, LoadError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(LoadError::Status(response.status()));
    }
    Ok(response.bytes().await?.to_vec())
}

pub fn decode_image(bytes: &[u8]) -> Result<egui::ColorImage, LoadError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}
