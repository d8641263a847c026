use crate::annotation::{Annotation, Span};

/// A contiguous text unit of an article, produced by top-level newline
/// splitting or by parser-driven segmentation.
///
/// `span` locates the unit inside the original article text. `next` holds
/// the exact separator that followed the unit, so concatenating `text` and
/// `next` for every unit in order reconstructs the original text
/// losslessly.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    /// Text as first segmented, never mutated afterward.
    pub original_text: String,
    /// Current text of this unit; may be edited independently of the
    /// parent article.
    pub text: String,
    /// Offset range of this unit within the original article text.
    pub span: Span,
    /// Trailing separator (whitespace/newline run; empty for the last unit).
    pub next: String,
    /// Annotations whose full span lies within this unit.
    pub annotations: Vec<Annotation>,
    /// Further-refined child sentences from later re-segmentation passes.
    pub updated_sentences: Vec<Sentence>,
}

impl Sentence {
    pub fn new(text: impl Into<String>, start: usize, next: impl Into<String>) -> Self {
        let text = text.into();
        let span = Span::new(start, start + text.len());
        Self {
            original_text: text.clone(),
            text,
            span,
            next: next.into(),
            annotations: Vec::new(),
            updated_sentences: Vec::new(),
        }
    }
}
