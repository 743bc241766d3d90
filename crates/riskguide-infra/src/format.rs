//! HTML rendering of generated narratives.

use pulldown_cmark::{Options, Parser, html};

use riskguide_core::format::NarrativeFormatter;

/// Renders markdown narratives to HTML fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormatter;

impl NarrativeFormatter for HtmlFormatter {
    fn format(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(markdown, options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskguide_core::profile::NO_SUMMARY;

    #[test]
    fn test_renders_headings_and_lists() {
        let html = HtmlFormatter.format("## High risk - 70%\n\n- Stop smoking\n- **Book** a screening");
        assert!(html.contains("<h2>High risk - 70%</h2>"));
        assert!(html.contains("<li>Stop smoking</li>"));
        assert!(html.contains("<strong>Book</strong>"));
    }

    #[test]
    fn test_fallback_text_becomes_paragraph() {
        assert_eq!(
            HtmlFormatter.format(NO_SUMMARY),
            "<p>Sorry, no user summary available.</p>\n"
        );
    }

    #[test]
    fn test_escapes_raw_text() {
        let html = HtmlFormatter.format("risk < 5% & falling");
        assert!(html.contains("risk &lt; 5% &amp; falling"));
    }
}
