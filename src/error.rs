use thiserror::Error;

/// Segmentation was invoked without a sentence-boundary parser configured.
/// Not recoverable at the call site; supply a parser and retry.
#[derive(Debug, Error)]
#[error("sentence parser not set; supply a SentenceParser before calling segment_sentences()")]
pub struct MissingParserError;
