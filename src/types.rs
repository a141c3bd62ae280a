//! Common types and data structures

/// Progress of the content listing request, shared with the loader task
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Loaded(Vec<Entry>),
    /// Entries were handed to the board
    Ready,
    Failed(String),
}

/// Per-card image state, keyed by card identifier
pub enum ImageSlot {
    Pending,
    Decoded(egui::ColorImage),
    Uploaded,
    Failed,
}

/// Listing structure from the content API
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ContentListing {
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Individual entry in the listing
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Entry {
    pub meta: EntryMeta,
    pub fields: EntryFields,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct EntryMeta {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct EntryFields {
    pub image: ImageField,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct ImageField {
    pub url: String,
    #[serde(default)]
    pub title: String,
}

impl Entry {
    /// Entries without a slug cannot be paired
    pub fn is_playable(&self) -> bool {
        !self.meta.slug.is_empty()
    }

    pub fn slug(&self) -> &str {
        &self.meta.slug
    }

    pub fn image_url(&self) -> &str {
        &self.fields.image.url
    }

    pub fn image_title(&self) -> &str {
        &self.fields.image.title
    }
}

#[cfg(test)]
pub(crate) fn entry(slug: &str) -> Entry {
    Entry {
        meta: EntryMeta { slug: slug.to_string() },
        fields: EntryFields {
            image: ImageField {
                url: format!("https://img.example/{}.jpg", slug),
                title: slug.to_uppercase(),
            },
        },
    }
}
