// Span-preserving text rewriting. Every edit that removes or replaces a
// substring must shift the stored annotation offsets so they keep pointing
// at the same content in the edited text.

use anyhow::Result;
use regex_automata::meta::Regex;
use tracing::debug;

use crate::annotation::Annotation;

/// Bracketed run of digits, commas, spaces and hyphens, e.g. `[18-20]`.
pub const CITATION_PATTERN: &str = r"\[[0-9, -]+\]";

/// Two or more consecutive ASCII spaces. Tabs and newlines are untouched.
pub const MULTI_SPACE_PATTERN: &str = r"[ ]{2,}";

/// Replace every pattern match in `text` and shift annotation spans so each
/// still refers to the same logical content. Inputs are never mutated; the
/// returned annotation list preserves input order.
///
/// Matches are applied rightmost-first: an edit changes the length of
/// everything after it, so processing back-to-front keeps every earlier
/// match position valid. Forward order silently corrupts downstream
/// offsets.
///
/// A span pair starting exactly at a match start counts as "at or after"
/// and shifts. A pair that begins inside a removed range is shifted without
/// clamping and ends up slightly past its original content; only
/// `pair.start >= match.start` triggers a shift, not a closer containment
/// check.
pub fn rewrite(
    text: &str,
    annotations: &[Annotation],
    pattern: &Regex,
    replacement: &str,
) -> (String, Vec<Annotation>) {
    let matches: Vec<(usize, usize)> = pattern
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();
    debug!(
        "Rewriting {} match(es) over {} bytes of text",
        matches.len(),
        text.len()
    );

    let mut new_text = text.to_string();
    let mut new_annotations = annotations.to_vec();
    for &(mstart, mend) in matches.iter().rev() {
        new_text.replace_range(mstart..mend, replacement);
        // Signed: a replacement longer than its match shifts spans right.
        let offset = (mend - mstart) as isize - replacement.len() as isize;
        for annotation in &mut new_annotations {
            for pair in &mut annotation.span {
                if pair.start >= mstart {
                    pair.start = (pair.start as isize - offset) as usize;
                    pair.end = (pair.end as isize - offset) as usize;
                }
            }
        }
    }

    (new_text, new_annotations)
}

/// Remove bracketed citation markers, realigning every annotation span.
pub fn remove_citations(
    text: &str,
    annotations: &[Annotation],
) -> Result<(String, Vec<Annotation>)> {
    let pattern = Regex::new(CITATION_PATTERN)?;
    Ok(rewrite(text, annotations, &pattern, ""))
}

/// Collapse runs of two-or-more spaces to a single space, realigning every
/// annotation span.
pub fn collapse_whitespace(
    text: &str,
    annotations: &[Annotation],
) -> Result<(String, Vec<Annotation>)> {
    let pattern = Regex::new(MULTI_SPACE_PATTERN)?;
    Ok(rewrite(text, annotations, &pattern, " "))
}
