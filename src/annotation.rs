use serde::{Deserialize, Serialize};

/// Byte-offset range into the owning UTF-8 text, `start <= end`.
///
/// Offsets are byte offsets, matching what the regex engine and string
/// splicing work in. CRAFT article text is ASCII-dominant, so decoded
/// record offsets line up with byte positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Inclusive point-containment intersection test, checked in either
    /// direction: the ranges touch if either one's start falls inside the
    /// other, endpoints included.
    pub fn intersects(&self, other: &Span) -> bool {
        (self.start <= other.start && other.start <= self.end)
            || (other.start <= self.start && self.start <= other.end)
    }
}

/// Raw decoded ontology mention as produced by the upstream annotation
/// decoder. A mention may be discontinuous: `span` holds one or more
/// ranges, in left-to-right order, forming a single concept mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub span: Vec<Span>,
    pub spanned_text: String,
    pub id: String,
    pub concept: String,
}

/// An ontology concept mention tied to character ranges in a text.
///
/// `spanned_text` is the literal text the spans covered at decode time; it
/// is kept as a human-readable label and never re-derived after edits.
/// The `disjoint`/`overlapping` flags are set only by the overlap
/// classifier, never at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub span: Vec<Span>,
    pub spanned_text: String,
    pub id: String,
    pub concept: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disjoint: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlapping: Option<bool>,
}

impl Annotation {
    /// Coarse bounding range: first pair's start to last pair's end.
    ///
    /// Panics on a record with an empty span list; decoder output is not
    /// validated here, malformed records fail at first use.
    pub fn outer_span(&self) -> Span {
        Span::new(self.span[0].start, self.span[self.span.len() - 1].end)
    }

    /// Strip classification flags back down to a raw record.
    pub fn record(&self) -> AnnotationRecord {
        AnnotationRecord {
            span: self.span.clone(),
            spanned_text: self.spanned_text.clone(),
            id: self.id.clone(),
            concept: self.concept.clone(),
        }
    }
}

impl From<AnnotationRecord> for Annotation {
    fn from(record: AnnotationRecord) -> Self {
        Self {
            span: record.span,
            spanned_text: record.spanned_text,
            id: record.id,
            concept: record.concept,
            disjoint: None,
            overlapping: None,
        }
    }
}
