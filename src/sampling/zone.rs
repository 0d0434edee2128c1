/*! Windowed zone extraction.

Reconstructs the relevant span of an ad from its zone-tagged tokens:
tokens in the target zone families seed a symmetric window of `threshold`
positions, windows are unioned and the text is re-read in document order.
!*/
use std::collections::{BTreeSet, HashSet};

use crate::document::Document;

/// Default zone families (employer description and job description).
pub const DEFAULT_ZONES: [u32; 2] = [60, 70];
/// Default window size around each seed position.
pub const DEFAULT_THRESHOLD: u32 = 10;

/// Extracts the windowed text span around a set of target zone families.
///
/// Pure: repeated calls on the same document yield identical text.
#[derive(Debug, Clone)]
pub struct ZoneExtractor {
    zones: HashSet<u32>,
    threshold: u32,
}

impl ZoneExtractor {
    pub fn new(zones: impl IntoIterator<Item = u32>, threshold: u32) -> Self {
        Self {
            zones: zones.into_iter().collect(),
            threshold,
        }
    }

    /// Extract the zone text of `doc`, or [None] if the document has fewer
    /// than 2 distinct seed positions (a meaningful span needs at least two
    /// anchor points).
    ///
    /// Two passes over the tokens: seed collection, then extraction by
    /// position. Tokens are assumed sorted by position; gaps are fine since
    /// absent positions simply contribute no text.
    pub fn extract(&self, doc: &Document) -> Option<String> {
        let mut seeds = BTreeSet::new();
        let mut last_position = 0u32;

        for token in doc.tokens() {
            last_position = last_position.max(token.position);
            if self.zones.contains(&token.zone_family()) {
                seeds.insert(token.position);
            }
        }

        if seeds.len() < 2 {
            return None;
        }

        // expand each seed by `threshold` on both sides, clamped to the
        // document's position range. Overlapping windows collapse in the set.
        let mut selected = BTreeSet::new();
        for &seed in &seeds {
            for i in 0..=self.threshold {
                if seed + i <= last_position {
                    selected.insert(seed + i);
                }
                if i > 0 && seed > i {
                    selected.insert(seed - i);
                }
            }
        }

        let mut text = String::new();
        for token in doc.tokens() {
            if selected.contains(&token.position) {
                text.push_str(&token.text);
            }
        }

        Some(text)
    }
}

impl Default for ZoneExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ZONES, DEFAULT_THRESHOLD)
    }
}
