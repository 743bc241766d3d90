//! Terminal rendering of generated narratives.

use termimad::MadSkin;
use termimad::crossterm::style::Color;

use riskguide_core::format::NarrativeFormatter;

/// Renders markdown narratives for the terminal with `termimad`.
pub struct TerminalFormatter {
    skin: MadSkin,
}

impl TerminalFormatter {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);
        Self { skin }
    }
}

impl Default for TerminalFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl NarrativeFormatter for TerminalFormatter {
    fn format(&self, markdown: &str) -> String {
        self.skin.term_text(markdown).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paragraph_keeps_its_words() {
        let formatter = TerminalFormatter::new();
        let rendered = formatter.format("Eat more vegetables");
        assert!(rendered.contains("Eat more vegetables"));
    }

    #[test]
    fn test_emphasis_markers_are_consumed() {
        let formatter = TerminalFormatter::new();
        let rendered = formatter.format("**Low** risk");
        assert!(!rendered.contains("**"));
        assert!(rendered.contains("Low"));
    }
}
