//! Markdown rendering adapter backed by comrak.
//!
//! Campaign statements are authored as Markdown and stored as rendered
//! HTML. The adapter enables comrak's full extension set so authors get
//! tables, strikethrough, autolinks, task lists, footnotes, superscript,
//! and description lists. Raw inline HTML stays escaped; the tagfilter
//! extension covers what slips through.

use comrak::{markdown_to_html, Options};

use crate::domain::ports::{MarkdownError, MarkdownRenderer};

/// Comrak-backed [`MarkdownRenderer`] with every extension enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakMarkdownRenderer;

impl MarkdownRenderer for ComrakMarkdownRenderer {
    fn render_html(&self, source: &str) -> Result<String, MarkdownError> {
        let mut options = Options::default();
        options.extension.strikethrough = true;
        options.extension.tagfilter = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.superscript = true;
        options.extension.footnotes = true;
        options.extension.description_lists = true;
        Ok(markdown_to_html(source, &options))
    }
}
