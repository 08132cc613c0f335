//! Subsequence fuzzy matcher
//!
//! Every pattern character must appear in the text, in order, but not
//! necessarily next to each other. Earlier matches weigh more than later
//! ones.

use alloc::vec::Vec;

/// Weight of a match at position 0. A match at position `i` contributes
/// `POSITION_WEIGHT - i`, and nothing once `i` reaches the weight.
pub const POSITION_WEIGHT: u32 = 100;

/// Result of matching one pattern against one text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FuzzyMatch {
    /// Whether every pattern character was found in order
    pub matched: bool,
    /// Match score (higher is better)
    pub score: u32,
    /// Char indices of the matched characters in the case-folded text
    pub positions: Vec<usize>,
}

impl FuzzyMatch {
    /// Result for an empty pattern.
    pub fn empty() -> Self {
        Self {
            matched: true,
            score: 0,
            positions: Vec::new(),
        }
    }
}

/// Match `pattern` against `text`.
///
/// Both sides are lowercased first. The scan stops as soon as the last
/// pattern character has been found, so `positions` never holds more
/// entries than the pattern has characters.
pub fn fuzzy_match(pattern: &str, text: &str) -> FuzzyMatch {
    let pattern: Vec<char> = fold(pattern).collect();
    if pattern.is_empty() {
        return FuzzyMatch::empty();
    }

    let mut cursor = 0;
    let mut score = 0u32;
    let mut positions = Vec::with_capacity(pattern.len());

    for (position, ch) in fold(text).enumerate() {
        if ch != pattern[cursor] {
            continue;
        }

        positions.push(position);
        score += position_weight(position);
        cursor += 1;

        if cursor == pattern.len() {
            return FuzzyMatch {
                matched: true,
                score,
                positions,
            };
        }
    }

    FuzzyMatch {
        matched: false,
        score,
        positions,
    }
}

/// Score contribution of a match at `position`.
#[inline]
fn position_weight(position: usize) -> u32 {
    u32::try_from(position)
        .map(|p| POSITION_WEIGHT.saturating_sub(p))
        .unwrap_or(0)
}

fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}
