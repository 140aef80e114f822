//! Pattern tables turning free text into categorical signals.
//!
//! Each test is independent and fail-safe: absence of a pattern is
//! `false`/empty, never an error. The vocabulary lives here so it can be
//! swapped per trade domain without touching scoring or aggregation.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::domain::DetailKeyword;

const PROPERTY_TYPES: [&str; 5] = ["house", "apartment", "unit", "townhouse", "villa"];
const SCOPE_WORDS: [&str; 4] = ["full", "entire", "whole", "complete"];
const INTERIOR_WORDS: [&str; 4] = ["interior", "inside", "indoor", "internal"];
const EXTERIOR_WORDS: [&str; 4] = ["exterior", "outside", "outdoor", "external"];
const ROOM_NAMES: [&str; 7] = [
    "bedroom", "bathroom", "kitchen", "living", "lounge", "hallway", "laundry",
];

/// Signals extracted from one job description. Computed fresh per
/// request and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobSignals {
    /// Count captured from an explicit "N rooms/bedrooms" phrase.
    pub room_count: Option<u32>,
    pub property_type: Option<String>,
    /// "full/entire/whole/complete" language.
    pub whole_property: bool,
    pub mentions_interior: bool,
    pub mentions_exterior: bool,
    /// Room names in first-seen order. Duplicates are kept in the list.
    pub room_mentions: Vec<String>,
    pub has_measurements: bool,
}

impl JobSignals {
    /// Room count used by size classification: the explicit phrase wins;
    /// otherwise distinct room mentions stand in. Deduplicated so a
    /// repeated mention cannot inflate the size class.
    pub fn room_count_proxy(&self) -> Option<u32> {
        if self.room_count.is_some() {
            return self.room_count;
        }

        let mut seen: Vec<&str> = Vec::new();
        for mention in &self.room_mentions {
            if !seen.contains(&mention.as_str()) {
                seen.push(mention);
            }
        }

        if seen.is_empty() {
            None
        } else {
            Some(seen.len() as u32)
        }
    }
}

fn room_count_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(\d+|one|two|three|four|five|six|seven|eight|nine|ten)[\s-]*(?:bed\s*rooms?|bedrooms?|rooms?|beds?)\b",
        )
        .expect("room count pattern")
    })
}

fn measurement_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b\d+(?:\.\d+)?\s*(?:mm|cm|m|metres?|meters?|sqm|m2|square\s+met(?:re|er)s?|ft|feet|foot)\b",
        )
        .expect("measurement pattern")
    })
}

fn room_mention_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(bedroom|bathroom|kitchen|living|lounge|hallway|laundry)s?\b")
            .expect("room mention pattern")
    })
}

fn storeys_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bstor(?:ey|eys|y|ies)\b").expect("storeys pattern"))
}

fn number_word(value: &str) -> Option<u32> {
    match value.to_ascii_lowercase().as_str() {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        other => other.parse().ok(),
    }
}

fn contains_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| token.eq_ignore_ascii_case(word))
}

/// Run every pattern test over one description.
pub fn extract_signals(description: &str) -> JobSignals {
    let room_count = room_count_pattern()
        .captures(description)
        .and_then(|caps| caps.get(1))
        .and_then(|m| number_word(m.as_str()));

    let property_type = PROPERTY_TYPES
        .iter()
        .find(|candidate| contains_word(description, candidate))
        .map(|candidate| candidate.to_string());

    // Capture the singular stem so "bedrooms" and "bedroom" collapse to
    // the same mention.
    let room_mentions = room_mention_pattern()
        .captures_iter(description)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect();

    JobSignals {
        room_count,
        property_type,
        whole_property: SCOPE_WORDS
            .iter()
            .any(|word| contains_word(description, word)),
        // Interior and exterior are independent sets; a job can mention
        // both.
        mentions_interior: INTERIOR_WORDS
            .iter()
            .any(|word| contains_word(description, word)),
        mentions_exterior: EXTERIOR_WORDS
            .iter()
            .any(|word| contains_word(description, word)),
        room_mentions,
        has_measurements: measurement_pattern().is_match(description),
    }
}

/// Keyword test shared with sample aggregation.
pub(crate) fn detail_keyword_present(keyword: DetailKeyword, text: &str) -> bool {
    let lowered = text.to_ascii_lowercase();
    match keyword {
        DetailKeyword::Ceilings => lowered.contains("ceiling"),
        DetailKeyword::Trims => {
            lowered.contains("trim") || lowered.contains("skirting") || lowered.contains("architrave")
        }
        DetailKeyword::Doors => lowered.contains("door"),
        DetailKeyword::Walls => lowered.contains("wall"),
        DetailKeyword::Measurements => measurement_pattern().is_match(text),
        DetailKeyword::Storeys => storeys_pattern().is_match(text),
        DetailKeyword::PropertyType => PROPERTY_TYPES
            .iter()
            .any(|candidate| contains_word(text, candidate)),
    }
}
