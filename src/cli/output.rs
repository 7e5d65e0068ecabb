//! Printing results and copying them to the clipboard

use cli_clipboard::{ClipboardContext, ClipboardProvider};
use std::fmt::Display;
use std::io::Write;
use tracing::debug;

use crate::core::errors::{Result, TranslationError};
use crate::core::models::RequestDescriptor;

/// Placeholder for a source language left to auto-detection
const UNKNOWN_SOURCE: &str = "?";

/// Destination for the copied result
pub trait Clipboard {
    /// Replace the clipboard contents
    fn set_contents(&mut self, contents: &str) -> Result<()>;
}

/// The desktop clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_contents(&mut self, contents: &str) -> Result<()> {
        let mut ctx = ClipboardContext::new().map_err(clipboard_error)?;
        ctx.set_contents(contents.to_string())
            .map_err(clipboard_error)
    }
}

fn clipboard_error(err: impl Display) -> TranslationError {
    TranslationError::ClipboardError {
        message: err.to_string(),
    }
}

/// What goes to stdout and what goes to the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTranslation {
    /// Line(s) for stdout
    pub printed: String,
    /// Clipboard payload
    pub clipboard: String,
}

/// Format a translation, adding the original text when asked to
pub fn render_translation(descriptor: &RequestDescriptor, translated: &str) -> RenderedTranslation {
    if !descriptor.keep_original {
        return RenderedTranslation {
            printed: translated.to_string(),
            clipboard: translated.to_string(),
        };
    }

    let original = descriptor.text.as_deref().unwrap_or_default();
    let source = if descriptor.source_language.is_empty() {
        UNKNOWN_SOURCE
    } else {
        descriptor.source_language.as_str()
    };

    RenderedTranslation {
        printed: format!(
            "{}: {}\n{}: {}",
            source, original, descriptor.target_language, translated
        ),
        clipboard: format!("{} [[\"{}\"]]", translated, original),
    }
}

/// Print the result, then copy it unless suppressed
pub fn emit<W: Write>(
    rendered: &RenderedTranslation,
    suppress_clipboard: bool,
    clipboard: &mut dyn Clipboard,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", rendered.printed)?;
    out.flush()?;

    if suppress_clipboard {
        debug!("Clipboard copy disabled");
        return Ok(());
    }

    clipboard.set_contents(&rendered.clipboard)?;
    debug!("Copied {} chars to clipboard", rendered.clipboard.chars().count());
    Ok(())
}

/// Records writes instead of touching the desktop
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingClipboard {
    pub writes: Vec<String>,
}

#[cfg(test)]
impl Clipboard for RecordingClipboard {
    fn set_contents(&mut self, contents: &str) -> Result<()> {
        self.writes.push(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Formality;

    fn descriptor(source: &str, keep_original: bool) -> RequestDescriptor {
        RequestDescriptor {
            text: Some("Good morning".to_string()),
            source_language: source.to_string(),
            target_language: "de".to_string(),
            formality: Formality::Default,
            usage_mode: false,
            suppress_clipboard: false,
            keep_original,
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn set_contents(&mut self, _contents: &str) -> Result<()> {
            Err(clipboard_error("no display"))
        }
    }

    #[test]
    fn test_plain_rendering() {
        let rendered = render_translation(&descriptor("", false), "Guten Morgen");
        assert_eq!(rendered.printed, "Guten Morgen");
        assert_eq!(rendered.clipboard, "Guten Morgen");
    }

    #[test]
    fn test_keep_original_marks_unknown_source() {
        let rendered = render_translation(&descriptor("", true), "Guten Morgen");
        assert_eq!(rendered.printed, "?: Good morning\nde: Guten Morgen");
        assert_eq!(rendered.clipboard, "Guten Morgen [[\"Good morning\"]]");
    }

    #[test]
    fn test_keep_original_with_source() {
        let rendered = render_translation(&descriptor("en", true), "Guten Morgen");
        assert_eq!(rendered.printed, "en: Good morning\nde: Guten Morgen");
    }

    #[test]
    fn test_emit_copies_payload() {
        let rendered = render_translation(&descriptor("", true), "Guten Morgen");
        let mut clipboard = RecordingClipboard::default();
        let mut out = Vec::new();

        emit(&rendered, false, &mut clipboard, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "?: Good morning\nde: Guten Morgen\n"
        );
        assert_eq!(clipboard.writes, vec!["Guten Morgen [[\"Good morning\"]]"]);
    }

    #[test]
    fn test_suppressed_clipboard_receives_nothing() {
        let rendered = render_translation(&descriptor("", false), "Guten Morgen");
        let mut clipboard = RecordingClipboard::default();
        let mut out = Vec::new();

        emit(&rendered, true, &mut clipboard, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Guten Morgen\n");
        assert!(clipboard.writes.is_empty());
    }

    #[test]
    fn test_clipboard_failure_after_printing() {
        let rendered = render_translation(&descriptor("", false), "Guten Morgen");
        let mut out = Vec::new();

        let err = emit(&rendered, false, &mut BrokenClipboard, &mut out).unwrap_err();

        assert!(matches!(err, TranslationError::ClipboardError { .. }));
        assert_eq!(err.exit_code(), 5);
        assert_eq!(String::from_utf8(out).unwrap(), "Guten Morgen\n");
    }
}
