pub mod annotation;
pub mod article;
pub mod corpus;
pub mod editor;
pub mod error;
pub mod overlap;
pub mod parser;
pub mod sentence;

// Re-export main types for convenient access
pub use annotation::{Annotation, AnnotationRecord, Span};
pub use article::Article;
pub use error::MissingParserError;
pub use overlap::OverlapPartition;
pub use parser::{ParsedSentence, ParsedText, SentenceParser};
pub use sentence::Sentence;
