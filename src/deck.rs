//! Dealing cards from fetched entries
//!
//! Every entry becomes a pair: an `original` and a `copy` card that share
//! the entry slug as their identifier. The unique key of a card is the
//! identifier with the side tag appended, e.g. `red-panda-copy`.

use crate::types::Entry;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

const KEY_SEPARATOR: char = '-';

/// Which half of a pair a card is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Original,
    Copy,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Original, Side::Copy];

    pub fn tag(self) -> &'static str {
        match self {
            Side::Original => "original",
            Side::Copy => "copy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub identifier: String,
    pub unique_key: String,
    pub image_url: String,
    pub image_title: String,
}

impl Card {
    pub fn from_entry(entry: &Entry, side: Side) -> Self {
        Self {
            identifier: entry.slug().to_string(),
            unique_key: unique_key(entry.slug(), side),
            image_url: entry.image_url().to_string(),
            image_title: entry.image_title().to_string(),
        }
    }
}

pub fn unique_key(identifier: &str, side: Side) -> String {
    format!("{}{}{}", identifier, KEY_SEPARATOR, side.tag())
}

/// Shared identifier of a unique key. Keys without a side tag are returned as-is.
pub fn identifier_of(key: &str) -> &str {
    Side::ALL
        .iter()
        .find_map(|side| {
            key.strip_suffix(side.tag())
                .and_then(|rest| rest.strip_suffix(KEY_SEPARATOR))
        })
        .unwrap_or(key)
}

/// Build a shuffled deck holding two cards per distinct entry slug.
pub fn build_deck<R: Rng + ?Sized>(entries: &[Entry], rng: &mut R) -> Vec<Card> {
    let mut seen = HashSet::new();
    let mut cards = Vec::with_capacity(entries.len() * 2);

    for entry in entries {
        if !entry.is_playable() {
            warn!(url = entry.image_url(), "Skipping entry without slug");
            continue;
        }
        if !seen.insert(entry.slug()) {
            debug!(slug = entry.slug(), "Skipping duplicate entry");
            continue;
        }
        cards.extend(Side::ALL.iter().map(|&side| Card::from_entry(entry, side)));
    }

    cards.shuffle(rng);
    cards
}
