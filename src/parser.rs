// Boundary seam for the external sentence-boundary detector. The crate
// only consumes detector output; the detection algorithm itself lives
// outside and is injected by the caller.

use anyhow::Result;

/// One sentence reported by a boundary detector, relative to the parsed
/// input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSentence {
    pub text: String,
    /// Byte offset of the sentence start within the parsed input.
    pub offset: usize,
    /// Literal whitespace separating this sentence from the next; empty
    /// for the last sentence of the input.
    pub trailing_whitespace: String,
}

/// Full detector output for one text chunk.
#[derive(Debug, Clone, Default)]
pub struct ParsedText {
    pub sentences: Vec<ParsedSentence>,
    /// Whether the detector actually performed sentence-boundary
    /// determination. Callers treat `false` as a precondition violation
    /// and reject the document outright.
    pub has_sentence_boundaries: bool,
}

/// Sentence-boundary detection capability supplied by the caller.
pub trait SentenceParser {
    fn parse(&self, text: &str) -> Result<ParsedText>;
}
