// Partitions a sentence's annotation set by span intersection so
// downstream consumers can treat cleanly separable mentions differently
// from nested or crossing ones.

use crate::annotation::Annotation;

/// Result of overlap classification over one annotation set.
#[derive(Debug, Clone, Default)]
pub struct OverlapPartition {
    /// Annotations intersecting at most themselves, sorted by outer start
    /// descending.
    pub disjoint: Vec<Annotation>,
    /// Annotations intersecting at least one other, sorted by outer start
    /// ascending.
    pub overlapping: Vec<Annotation>,
}

/// Classify each annotation as disjoint or overlapping.
///
/// Two annotations overlap when their outer ranges intersect under an
/// inclusive point-containment test in either direction. Every annotation
/// intersects itself, so a self-count of one means no partner and the
/// annotation is disjoint by definition. Returned copies carry the
/// `disjoint`/`overlapping` flags; inputs are untouched.
pub fn partition(annotations: &[Annotation]) -> OverlapPartition {
    let mut disjoint = Vec::new();
    let mut overlapping = Vec::new();
    for annotation in annotations {
        let outer = annotation.outer_span();
        let partners = annotations
            .iter()
            .filter(|other| outer.intersects(&other.outer_span()))
            .count();
        let mut tagged = annotation.clone();
        if partners <= 1 {
            tagged.disjoint = Some(true);
            tagged.overlapping = Some(false);
            disjoint.push(tagged);
        } else {
            tagged.disjoint = Some(false);
            tagged.overlapping = Some(true);
            overlapping.push(tagged);
        }
    }
    disjoint.sort_by(|a, b| b.outer_span().start.cmp(&a.outer_span().start));
    overlapping.sort_by(|a, b| a.outer_span().start.cmp(&b.outer_span().start));
    OverlapPartition {
        disjoint,
        overlapping,
    }
}
