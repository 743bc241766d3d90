//! Risk headline extraction.
//!
//! The risk-classification prompt requires the response to *begin* with the
//! qualitative band and a percentage, so the first line of a persisted
//! `risk_assessment` can stand on its own. `RiskHeadline` pulls those two
//! facts back out for compact display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Qualitative risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskBand {
    /// Search order matters: two-word bands must win over their suffixes.
    const SEARCH_ORDER: [RiskBand; 5] = [
        RiskBand::VeryLow,
        RiskBand::VeryHigh,
        RiskBand::Moderate,
        RiskBand::Low,
        RiskBand::High,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskBand::VeryLow => "very low",
            RiskBand::Low => "low",
            RiskBand::Moderate => "moderate",
            RiskBand::High => "high",
            RiskBand::VeryHigh => "very high",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        RiskBand::SEARCH_ORDER
            .into_iter()
            .find(|b| b.label() == normalized)
            .ok_or_else(|| format!("invalid risk band: '{s}'"))
    }
}

/// Band and percentage read from the first line of a risk assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskHeadline {
    /// The first non-blank line with markdown emphasis stripped.
    pub line: String,
    pub band: Option<RiskBand>,
    /// Percentage in `[1, 100]`.
    pub percentage: Option<u8>,
}

impl RiskHeadline {
    /// Parse the headline of a risk assessment narrative.
    ///
    /// Returns `None` only when the text has no non-blank line at all.
    pub fn parse(assessment: &str) -> Option<Self> {
        let raw = assessment.lines().map(str::trim).find(|l| !l.is_empty())?;
        let line = raw
            .trim_start_matches('#')
            .replace("**", "")
            .replace("__", "")
            .trim()
            .to_string();

        let lowered = line.to_lowercase();
        let band = RiskBand::SEARCH_ORDER
            .into_iter()
            .find(|b| contains_word(&lowered, b.label()));

        Some(Self {
            band,
            percentage: first_percentage(&line),
            line,
        })
    }
}

impl fmt::Display for RiskHeadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.band, self.percentage) {
            (Some(band), Some(pct)) => write!(f, "{band} ({pct}%)"),
            (Some(band), None) => write!(f, "{band}"),
            _ => write!(f, "{}", self.line),
        }
    }
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn first_percentage(line: &str) -> Option<u8> {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
            i += 1;
        }
        let number: String = chars[start..i].iter().collect();
        let mut j = i;
        while j < chars.len() && chars[j] == ' ' {
            j += 1;
        }
        if chars.get(j) == Some(&'%') {
            if let Ok(value) = number.trim_end_matches('.').parse::<f64>() {
                let rounded = value.round();
                if (1.0..=100.0).contains(&rounded) {
                    return Some(rounded as u8);
                }
            }
        }
    }
    None
}
