//! The two-valued display/translation selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output language for generated text.
///
/// Prompts are always written in English; `Gu` appends a directive asking
/// for the *output* to be translated to Gujarati.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Gu,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Gu => "gu",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Gu => "Gujarati",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "gu" | "gujarati" => Ok(Locale::Gu),
            other => Err(format!("invalid locale: '{other}' (expected 'en' or 'gu')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_roundtrip() {
        for locale in [Locale::En, Locale::Gu] {
            let parsed: Locale = locale.to_string().parse().unwrap();
            assert_eq!(locale, parsed);
        }
    }

    #[test]
    fn test_locale_default_is_english() {
        assert_eq!(Locale::default(), Locale::En);
    }

    #[test]
    fn test_locale_rejects_unknown() {
        let err = "fr".parse::<Locale>().unwrap_err();
        assert!(err.contains("fr"));
    }
}
