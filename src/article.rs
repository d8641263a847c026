use anyhow::Result;
use regex_automata::meta::Regex;
use tracing::{debug, info};

use crate::annotation::{Annotation, AnnotationRecord};
use crate::editor;
use crate::error::MissingParserError;
use crate::parser::SentenceParser;
use crate::sentence::Sentence;

/// One-or-more consecutive newline characters.
const NEWLINE_RUN_PATTERN: &str = r"\n+";

/// Aggregate root for one CRAFT article: the full text, its annotation
/// set, and the sentences derived from it.
///
/// `original_text` and `original_annotations` are the immutable snapshot
/// supplied at construction. Cleanup operations set `text` and rebuild
/// `annotations`; until the first edit, `original_text` stays
/// authoritative.
#[derive(Debug, Clone)]
pub struct Article {
    pub original_text: String,
    pub original_annotations: Vec<AnnotationRecord>,
    pub annotations: Vec<Annotation>,
    pub text: Option<String>,
    pub sentences: Vec<Sentence>,
}

impl Article {
    pub fn new(text: impl Into<String>, records: Vec<AnnotationRecord>) -> Self {
        let annotations = records.iter().cloned().map(Annotation::from).collect();
        Self {
            original_text: text.into(),
            original_annotations: records,
            annotations,
            text: None,
            sentences: Vec::new(),
        }
    }

    /// Current authoritative text: the edited text once a cleanup pass has
    /// run, the original before that.
    pub fn current_text(&self) -> &str {
        self.text.as_deref().unwrap_or(&self.original_text)
    }

    /// Partition the original text into chunks delimited by newline runs,
    /// without touching the article. Titles, headings and paragraphs each
    /// come out as one chunk; the exact newline run lands in the chunk's
    /// `next`, and text after the final run becomes a last chunk with an
    /// empty `next`. Concatenating chunk text and separators in order
    /// reproduces the original text byte for byte.
    pub fn split_chunks(&self) -> Result<Vec<Sentence>> {
        let pattern = Regex::new(NEWLINE_RUN_PATTERN)?;
        let mut chunks = Vec::new();
        let mut cursor = 0usize;
        for m in pattern.find_iter(&self.original_text) {
            let chunk = &self.original_text[cursor..m.start()];
            chunks.push(Sentence::new(chunk, cursor, &self.original_text[m.range()]));
            cursor = m.end();
        }
        if cursor < self.original_text.len() {
            chunks.push(Sentence::new(&self.original_text[cursor..], cursor, ""));
        }
        debug!("Split article into {} newline-delimited chunks", chunks.len());
        Ok(chunks)
    }

    /// Split in place: replaces `sentences` with the newline-delimited
    /// chunk list.
    pub fn split_on_newline(&mut self) -> Result<()> {
        self.sentences = self.split_chunks()?;
        Ok(())
    }

    /// Pure segmentation: newline split followed by parser-driven sentence
    /// detection per chunk, returning the flat ordered sentence list and
    /// leaving the article untouched.
    ///
    /// Each detected sentence is placed at its absolute offset
    /// (chunk start + offset within the chunk). The last sentence of a
    /// chunk inherits the chunk's own separator; earlier sentences carry
    /// the detector-reported trailing whitespace. An annotation is
    /// re-scoped into a sentence iff its whole span, first pair's start to
    /// last pair's end, fits inside that sentence; annotations straddling
    /// a boundary are dropped from both sides rather than split.
    ///
    /// Panics if the parser reports that it performed no boundary
    /// determination; that precondition violation rejects the document.
    pub fn segmented(&self, parser: &dyn SentenceParser) -> Result<Vec<Sentence>> {
        let chunks = self.split_chunks()?;
        let mut segmented = Vec::new();
        for chunk in &chunks {
            let parsed = parser.parse(&chunk.text)?;
            assert!(
                parsed.has_sentence_boundaries,
                "parser returned no sentence-boundary information"
            );
            let count = parsed.sentences.len();
            for (idx, sent) in parsed.sentences.iter().enumerate() {
                let next = if idx + 1 == count {
                    chunk.next.clone()
                } else {
                    sent.trailing_whitespace.clone()
                };
                let start = chunk.span.start + sent.offset;
                let end = start + sent.text.len();
                let mut sentence = Sentence::new(sent.text.clone(), start, next);
                sentence.annotations = self
                    .annotations
                    .iter()
                    .filter(|a| {
                        let outer = a.outer_span();
                        outer.start >= start && outer.end <= end
                    })
                    .cloned()
                    .collect();
                segmented.push(sentence);
            }
        }
        info!("Segmented article into {} sentences", segmented.len());
        Ok(segmented)
    }

    /// Segment in place, replacing the chunk-level sentence list with the
    /// detected sentences. Fails with [`MissingParserError`] when no
    /// parser has been supplied.
    pub fn segment_sentences(&mut self, parser: Option<&dyn SentenceParser>) -> Result<()> {
        let parser = parser.ok_or(MissingParserError)?;
        self.split_on_newline()?;
        self.sentences = self.segmented(parser)?;
        Ok(())
    }

    /// Remove bracketed citations from the current text in place,
    /// rebuilding the annotation list with realigned spans. The pure
    /// equivalent is [`editor::remove_citations`] over
    /// [`Article::current_text`].
    pub fn remove_citations(&mut self) -> Result<()> {
        let (new_text, new_annotations) =
            editor::remove_citations(self.current_text(), &self.annotations)?;
        self.text = Some(new_text);
        self.annotations = new_annotations;
        Ok(())
    }

    /// Collapse multi-space runs in the current text in place, rebuilding
    /// the annotation list with realigned spans. Safe to repeat; each call
    /// operates on the current state.
    pub fn remove_multiple_whitespaces(&mut self) -> Result<()> {
        let (new_text, new_annotations) =
            editor::collapse_whitespace(self.current_text(), &self.annotations)?;
        self.text = Some(new_text);
        self.annotations = new_annotations;
        Ok(())
    }

    /// Pure counterpart of [`Article::remove_citations`].
    pub fn citations_removed(&self) -> Result<(String, Vec<Annotation>)> {
        editor::remove_citations(self.current_text(), &self.annotations)
    }

    /// Pure counterpart of [`Article::remove_multiple_whitespaces`].
    pub fn whitespace_collapsed(&self) -> Result<(String, Vec<Annotation>)> {
        editor::collapse_whitespace(self.current_text(), &self.annotations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::Span;
    use crate::parser::{ParsedSentence, ParsedText};

    fn record(spans: &[(usize, usize)], spanned_text: &str, id: &str) -> AnnotationRecord {
        AnnotationRecord {
            span: spans.iter().map(|&(s, e)| Span::new(s, e)).collect(),
            spanned_text: spanned_text.to_string(),
            id: id.to_string(),
            concept: format!("concept for {id}"),
        }
    }

    /// Deterministic stand-in for a linguistic boundary detector: splits
    /// on ". " keeping the period with the sentence.
    struct PeriodParser;

    impl SentenceParser for PeriodParser {
        fn parse(&self, text: &str) -> Result<ParsedText> {
            let mut sentences = Vec::new();
            let mut start = 0usize;
            let bytes = text.as_bytes();
            let mut i = 0usize;
            while i < bytes.len() {
                if bytes[i] == b'.' && i + 1 < bytes.len() && bytes[i + 1] == b' ' {
                    let mut sep_end = i + 1;
                    while sep_end < bytes.len() && bytes[sep_end] == b' ' {
                        sep_end += 1;
                    }
                    sentences.push(ParsedSentence {
                        text: text[start..=i].to_string(),
                        offset: start,
                        trailing_whitespace: text[i + 1..sep_end].to_string(),
                    });
                    start = sep_end;
                    i = sep_end;
                } else {
                    i += 1;
                }
            }
            if start < text.len() {
                sentences.push(ParsedSentence {
                    text: text[start..].to_string(),
                    offset: start,
                    trailing_whitespace: String::new(),
                });
            }
            Ok(ParsedText {
                sentences,
                has_sentence_boundaries: true,
            })
        }
    }

    /// Parser that never performs boundary determination.
    struct BrokenParser;

    impl SentenceParser for BrokenParser {
        fn parse(&self, _text: &str) -> Result<ParsedText> {
            Ok(ParsedText::default())
        }
    }

    #[test]
    fn test_split_round_trip_reconstructs_original_text() {
        let text = "Title\n\nFirst paragraph here.\nSecond line.\n\n\nLast paragraph";
        let mut article = Article::new(text, Vec::new());
        article.split_on_newline().unwrap();

        let rebuilt: String = article
            .sentences
            .iter()
            .map(|s| format!("{}{}", s.text, s.next))
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_split_chunk_spans_index_the_original_text() {
        let text = "Title\n\nBody text.";
        let article = Article::new(text, Vec::new());
        let chunks = article.split_chunks().unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].span, Span::new(0, 5));
        assert_eq!(chunks[0].next, "\n\n");
        assert_eq!(chunks[1].span, Span::new(7, 17));
        assert_eq!(chunks[1].next, "");
        for chunk in &chunks {
            assert_eq!(&text[chunk.span.start..chunk.span.end], chunk.text);
        }
    }

    #[test]
    fn test_split_trailing_newline_yields_no_empty_tail() {
        let text = "Only paragraph.\n";
        let article = Article::new(text, Vec::new());
        let chunks = article.split_chunks().unwrap();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].next, "\n");
    }

    #[test]
    fn test_current_text_falls_back_to_original() {
        let mut article = Article::new("neurons  [1] fire", Vec::new());
        assert_eq!(article.current_text(), "neurons  [1] fire");

        article.remove_citations().unwrap();
        assert_eq!(article.current_text(), "neurons   fire");
    }

    #[test]
    fn test_cleanup_sequence_keeps_spans_consistent() {
        let text = "survival of striatal neurons [18-20] are therefore of considerable \
                    importance in ensuring adaptive behavior at maturity";
        let start = text.find("adaptive behavior").unwrap();
        let records = vec![record(&[(start, start + 17)], "adaptive behavior", "GO:0051867")];
        let mut article = Article::new(text, records);

        article.remove_citations().unwrap();
        article.remove_multiple_whitespaces().unwrap();

        let span = article.annotations[0].span[0];
        assert_eq!(
            &article.current_text()[span.start..span.end],
            "adaptive behavior"
        );
        assert!(!article.current_text().contains("[18-20]"));
        assert!(!article.current_text().contains("  "));
    }

    #[test]
    fn test_cleanup_leaves_original_snapshot_untouched() {
        let records = vec![record(&[(9, 12)], "[1]", "X:1")];
        let mut article = Article::new("citation [1] here", records.clone());

        article.remove_citations().unwrap();

        assert_eq!(article.original_text, "citation [1] here");
        assert_eq!(article.original_annotations, records);
    }

    #[test]
    fn test_segment_sentences_requires_parser() {
        let mut article = Article::new("Some text.", Vec::new());
        let err = article.segment_sentences(None).unwrap_err();
        assert!(err.is::<MissingParserError>());
    }

    #[test]
    #[should_panic(expected = "sentence-boundary")]
    fn test_segmentation_asserts_parser_precondition() {
        let article = Article::new("Some text.", Vec::new());
        let _ = article.segmented(&BrokenParser);
    }

    #[test]
    fn test_segmentation_places_sentences_at_absolute_offsets() {
        let text = "Heading\n\nFirst one. Second one.";
        let mut article = Article::new(text, Vec::new());
        article.segment_sentences(Some(&PeriodParser)).unwrap();

        let texts: Vec<_> = article.sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Heading", "First one.", "Second one."]);
        // Sentence spans index the original article text
        for sentence in &article.sentences {
            assert_eq!(
                &text[sentence.span.start..sentence.span.end],
                sentence.text
            );
        }
        // The last sentence of each chunk inherits the chunk separator
        assert_eq!(article.sentences[0].next, "\n\n");
        assert_eq!(article.sentences[1].next, " ");
        assert_eq!(article.sentences[2].next, "");
    }

    #[test]
    fn test_segmentation_rescopes_contained_annotations_exactly_once() {
        let text = "Neurons fire. Spindles form.";
        let records = vec![
            record(&[(0, 7)], "Neurons", "CL:0000540"),
            record(&[(14, 22)], "Spindles", "GO:0005819"),
            // Straddles the sentence boundary: dropped from both sides
            record(&[(8, 18)], "fire. Spin", "X:straddle"),
        ];
        let mut article = Article::new(text, records);
        article.segment_sentences(Some(&PeriodParser)).unwrap();

        assert_eq!(article.sentences.len(), 2);
        let first: Vec<_> = article.sentences[0]
            .annotations
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        let second: Vec<_> = article.sentences[1]
            .annotations
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(first, vec!["CL:0000540"]);
        assert_eq!(second, vec!["GO:0005819"]);
    }

    #[test]
    fn test_segmentation_uses_outer_bounds_of_discontinuous_annotations() {
        let text = "Alpha beta gamma. Tail.";
        // Discontinuous mention wholly inside the first sentence
        let inside = record(&[(0, 5), (11, 16)], "Alpha ... gamma", "X:inside");
        // First pair inside, last pair beyond the first sentence
        let outside = record(&[(0, 5), (18, 22)], "Alpha ... Tail", "X:outside");
        let mut article = Article::new(text, vec![inside, outside]);
        article.segment_sentences(Some(&PeriodParser)).unwrap();

        let ids: Vec<_> = article.sentences[0]
            .annotations
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["X:inside"]);
        assert!(article.sentences[1].annotations.is_empty());
    }

    #[test]
    fn test_pure_segmentation_leaves_article_unmodified() {
        let article = Article::new("One. Two.", Vec::new());
        let sentences = article.segmented(&PeriodParser).unwrap();

        assert_eq!(sentences.len(), 2);
        assert!(article.sentences.is_empty());
    }
}
