//! Card matching state machine
//!
//! A game moves through three phases: `Idle` with nothing face up,
//! `OneSelected` after the first flip, and `Evaluating` once a second card
//! has been flipped and compared. Evaluating locks the board until the
//! flip-back delay elapses, then the selection is cleared and the game is
//! idle again. Matched cards stay face up for the rest of the game.
//!
//! Time is supplied by the caller so the UI loop and tests drive the same
//! code path.

use crate::deck::{identifier_of, Card};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    OneSelected,
    Evaluating,
}

/// Why a click did not change the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnknownCard,
    AlreadySelected,
    AlreadyMatched,
    /// Two cards are face up and waiting to flip back
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Selected,
    Matched { complete: bool },
    Mismatched,
    Rejected(Rejection),
}

pub struct Game {
    cards: Vec<Card>,
    keys: HashSet<String>,
    selected: Vec<String>,
    matched: HashSet<String>,
    match_count: u32,
    error_count: u32,
    total_pairs: u32,
    flip_back_delay: Duration,
    clear_at: Option<Instant>,
}

impl Game {
    pub fn new(cards: Vec<Card>, flip_back_delay: Duration) -> Self {
        let keys: HashSet<String> = cards.iter().map(|c| c.unique_key.clone()).collect();
        let identifiers: HashSet<&str> = cards.iter().map(|c| c.identifier.as_str()).collect();
        let total_pairs = identifiers.len() as u32;

        debug!(cards = cards.len(), pairs = total_pairs, "New game");

        Self {
            cards,
            keys,
            selected: Vec::with_capacity(2),
            matched: HashSet::new(),
            match_count: 0,
            error_count: 0,
            total_pairs,
            flip_back_delay,
            clear_at: None,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn total_pairs(&self) -> u32 {
        self.total_pairs
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Applies to evaluations started after the change.
    pub fn set_flip_back_delay(&mut self, delay: Duration) {
        self.flip_back_delay = delay;
    }

    pub fn phase(&self) -> Phase {
        if self.clear_at.is_some() {
            Phase::Evaluating
        } else if self.selected.is_empty() {
            Phase::Idle
        } else {
            Phase::OneSelected
        }
    }

    pub fn is_matched(&self, key: &str) -> bool {
        self.matched.contains(key)
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.iter().any(|k| k == key)
    }

    /// Face up: either part of the current selection or already matched.
    pub fn is_revealed(&self, key: &str) -> bool {
        self.is_selected(key) || self.is_matched(key)
    }

    pub fn is_complete(&self) -> bool {
        self.total_pairs > 0 && self.match_count == self.total_pairs
    }

    /// Flip the card with `key`.
    pub fn click(&mut self, key: &str, now: Instant) -> ClickOutcome {
        self.tick(now);

        let rejection = if !self.keys.contains(key) {
            Some(Rejection::UnknownCard)
        } else if self.is_matched(key) {
            Some(Rejection::AlreadyMatched)
        } else if self.is_selected(key) {
            Some(Rejection::AlreadySelected)
        } else if self.clear_at.is_some() || self.selected.len() >= 2 {
            Some(Rejection::Busy)
        } else {
            None
        };
        if let Some(reason) = rejection {
            debug!(key, ?reason, "Click rejected");
            return ClickOutcome::Rejected(reason);
        }

        self.selected.push(key.to_string());
        if self.selected.len() < 2 {
            return ClickOutcome::Selected;
        }

        self.clear_at = Some(now + self.flip_back_delay);
        let first = identifier_of(&self.selected[0]);
        let second = identifier_of(&self.selected[1]);

        if first == second {
            self.match_count += 1;
            let pair: Vec<String> = self.selected.drain(..).collect();
            self.matched.extend(pair);
            let complete = self.is_complete();
            debug!(matches = self.match_count, "Pair matched");
            if complete {
                info!(
                    pairs = self.total_pairs,
                    errors = self.error_count,
                    "All pairs found"
                );
            }
            ClickOutcome::Matched { complete }
        } else {
            self.error_count += 1;
            debug!(errors = self.error_count, "Cards do not match");
            ClickOutcome::Mismatched
        }
    }

    /// Clear the selection once the flip-back delay has elapsed.
    /// Returns true if an evaluation finished.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.clear_at {
            Some(at) if now >= at => {
                self.selected.clear();
                self.clear_at = None;
                true
            }
            _ => false,
        }
    }

    /// Remaining flip-back delay, if an evaluation is pending.
    pub fn time_until_clear(&self, now: Instant) -> Option<Duration> {
        self.clear_at.map(|at| at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{build_deck, unique_key, Side};
    use crate::types::entry;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DELAY: Duration = Duration::from_millis(1000);

    fn game(slugs: &[&str]) -> Game {
        let entries: Vec<_> = slugs.iter().map(|s| entry(s)).collect();
        Game::new(build_deck(&entries, &mut StdRng::seed_from_u64(3)), DELAY)
    }

    fn orig(slug: &str) -> String {
        unique_key(slug, Side::Original)
    }

    fn copy(slug: &str) -> String {
        unique_key(slug, Side::Copy)
    }

    #[test]
    fn test_new_game_is_idle() {
        let g = game(&["otter", "lynx"]);
        assert_eq!(g.phase(), Phase::Idle);
        assert_eq!(g.total_pairs(), 2);
        assert_eq!(g.cards().len(), 4);
        assert!(!g.is_complete());
    }

    #[test]
    fn test_matching_pair() {
        let mut g = game(&["otter", "lynx"]);
        let t0 = Instant::now();

        assert_eq!(g.click(&orig("otter"), t0), ClickOutcome::Selected);
        assert_eq!(g.phase(), Phase::OneSelected);
        assert!(g.is_revealed(&orig("otter")));

        assert_eq!(
            g.click(&copy("otter"), t0),
            ClickOutcome::Matched { complete: false }
        );
        assert_eq!(g.match_count(), 1);
        assert_eq!(g.error_count(), 0);
        assert!(g.is_matched(&orig("otter")));
        assert!(g.is_matched(&copy("otter")));
        assert!(g.selected().is_empty());
        assert_eq!(g.phase(), Phase::Evaluating);
    }

    #[test]
    fn test_mismatched_pair_flips_back_after_delay() {
        let mut g = game(&["otter", "lynx"]);
        let t0 = Instant::now();

        g.click(&orig("otter"), t0);
        assert_eq!(g.click(&orig("lynx"), t0), ClickOutcome::Mismatched);
        assert_eq!(g.error_count(), 1);
        assert_eq!(g.match_count(), 0);
        assert_eq!(g.selected().len(), 2);

        assert!(!g.tick(t0 + DELAY / 2));
        assert_eq!(g.time_until_clear(t0 + DELAY / 2), Some(DELAY / 2));
        assert!(g.is_revealed(&orig("lynx")));

        assert!(g.tick(t0 + DELAY));
        assert!(g.selected().is_empty());
        assert_eq!(g.phase(), Phase::Idle);
        assert!(!g.is_revealed(&orig("lynx")));
        assert_eq!(g.time_until_clear(t0 + DELAY), None);
    }

    #[test]
    fn test_board_locked_while_evaluating() {
        let mut g = game(&["otter", "lynx", "heron"]);
        let t0 = Instant::now();

        g.click(&orig("otter"), t0);
        g.click(&orig("lynx"), t0);
        assert_eq!(
            g.click(&orig("heron"), t0 + Duration::from_millis(10)),
            ClickOutcome::Rejected(Rejection::Busy)
        );

        // A match also holds the board until the delay elapses
        g.tick(t0 + DELAY);
        g.click(&orig("heron"), t0 + DELAY);
        g.click(&copy("heron"), t0 + DELAY);
        assert_eq!(
            g.click(&copy("otter"), t0 + DELAY),
            ClickOutcome::Rejected(Rejection::Busy)
        );
        assert_eq!(
            g.click(&copy("otter"), t0 + DELAY * 2),
            ClickOutcome::Selected
        );
    }

    #[test]
    fn test_rejected_clicks() {
        let mut g = game(&["otter", "lynx"]);
        let t0 = Instant::now();

        assert_eq!(
            g.click("walrus-original", t0),
            ClickOutcome::Rejected(Rejection::UnknownCard)
        );
        g.click(&orig("otter"), t0);
        assert_eq!(
            g.click(&orig("otter"), t0),
            ClickOutcome::Rejected(Rejection::AlreadySelected)
        );
        g.click(&copy("otter"), t0);
        g.tick(t0 + DELAY);
        assert_eq!(
            g.click(&copy("otter"), t0 + DELAY),
            ClickOutcome::Rejected(Rejection::AlreadyMatched)
        );
        assert_eq!(g.match_count(), 1);
        assert_eq!(g.error_count(), 0);
        assert_eq!(g.phase(), Phase::Idle);
    }

    #[test]
    fn test_completion_reported_once() {
        let mut g = game(&["otter", "lynx"]);
        let mut now = Instant::now();

        g.click(&orig("otter"), now);
        assert_eq!(
            g.click(&copy("otter"), now),
            ClickOutcome::Matched { complete: false }
        );
        now += DELAY;
        g.click(&copy("lynx"), now);
        assert_eq!(
            g.click(&orig("lynx"), now),
            ClickOutcome::Matched { complete: true }
        );
        assert!(g.is_complete());

        now += DELAY;
        for card in g.cards().to_vec() {
            assert_eq!(
                g.click(&card.unique_key, now),
                ClickOutcome::Rejected(Rejection::AlreadyMatched)
            );
        }
        assert_eq!(g.match_count(), 2);
    }

    #[test]
    fn test_click_after_deadline_clears_first() {
        let mut g = game(&["otter", "lynx"]);
        let t0 = Instant::now();

        g.click(&orig("otter"), t0);
        g.click(&orig("lynx"), t0);
        // No tick in between: the click itself observes the elapsed delay
        assert_eq!(g.click(&copy("lynx"), t0 + DELAY), ClickOutcome::Selected);
        assert_eq!(g.selected(), [copy("lynx")]);
    }

    #[test]
    fn test_zero_delay_clears_on_next_tick() {
        let mut g = game(&["otter", "lynx"]);
        g.set_flip_back_delay(Duration::ZERO);
        let t0 = Instant::now();

        g.click(&orig("otter"), t0);
        g.click(&orig("lynx"), t0);
        assert!(g.tick(t0));
        assert_eq!(g.phase(), Phase::Idle);
    }

    #[test]
    fn test_empty_deck_never_completes() {
        let g = Game::new(Vec::new(), DELAY);
        assert_eq!(g.total_pairs(), 0);
        assert!(!g.is_complete());
    }

    proptest! {
        #[test]
        fn prop_random_play_keeps_invariants(
            pairs in 1usize..8,
            clicks in proptest::collection::vec((0usize..16, 0u64..1500), 0..120),
        ) {
            let slugs: Vec<String> = (0..pairs).map(|i| format!("animal-{}", i)).collect();
            let slug_refs: Vec<&str> = slugs.iter().map(String::as_str).collect();
            let mut g = game(&slug_refs);
            let keys: Vec<String> = g.cards().iter().map(|c| c.unique_key.clone()).collect();
            let mut now = Instant::now();

            for (idx, step_ms) in clicks {
                now += Duration::from_millis(step_ms);
                let key = &keys[idx % keys.len()];
                let was_matched = g.is_matched(key);
                let (matches, errors) = (g.match_count(), g.error_count());

                let outcome = g.click(key, now);

                if was_matched {
                    prop_assert_eq!(outcome, ClickOutcome::Rejected(Rejection::AlreadyMatched));
                }
                match outcome {
                    ClickOutcome::Matched { .. } => {
                        prop_assert_eq!(g.match_count(), matches + 1);
                        prop_assert_eq!(g.error_count(), errors);
                    }
                    ClickOutcome::Mismatched => {
                        prop_assert_eq!(g.error_count(), errors + 1);
                        prop_assert_eq!(g.match_count(), matches);
                    }
                    _ => {
                        prop_assert_eq!(g.match_count(), matches);
                        prop_assert_eq!(g.error_count(), errors);
                    }
                }

                prop_assert!(g.selected().len() <= 2);
                prop_assert!(g.selected().iter().all(|k| !g.is_matched(k)));
                prop_assert!(g.match_count() <= g.total_pairs());

                if g.phase() == Phase::Evaluating {
                    prop_assert!(g.tick(now + DELAY));
                    prop_assert!(g.selected().is_empty());
                }
            }
        }
    }
}
