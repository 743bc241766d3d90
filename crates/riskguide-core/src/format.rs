//! Narrative formatting port.
//!
//! Generated narratives are markdown. The view layer decides how to show
//! them: HTML (riskguide-infra), terminal (riskguide-cli), or as-is.

pub trait NarrativeFormatter: Send + Sync {
    fn format(&self, markdown: &str) -> String;
}

/// Returns the markdown unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl NarrativeFormatter for PlainFormatter {
    fn format(&self, markdown: &str) -> String {
        markdown.to_string()
    }
}

impl<F: NarrativeFormatter + ?Sized> NarrativeFormatter for &F {
    fn format(&self, markdown: &str) -> String {
        (**self).format(markdown)
    }
}
