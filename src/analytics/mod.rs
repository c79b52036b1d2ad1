//! Part-level analytics over the dataset snapshot
//!
//! Four independent, side-effect-free reads keyed by a selected part:
//! - [`reliability`] - supplier risk tiering from lateness and rejections
//! - [`producibility`] - quality-failure warnings propagated from the
//!   part's strongest geometric match
//! - [`benchmark`] - latest RFQ quote vs historical purchase price
//! - [`consolidation`] - VA/VE savings from near-duplicate parts
//!
//! All results are structured values; formatting is the CLI's job.

pub mod benchmark;
pub mod consolidation;
pub mod producibility;
pub mod reliability;

pub use benchmark::{BenchmarkVerdict, QuoteBenchmark};
pub use consolidation::{ConsolidationCandidate, ConsolidationOutcome};
pub use producibility::{GeometricMatch, ProducibilityOutcome, RejectionReasonCount};
pub use reliability::{PartReliability, RiskTier, SupplierPartStats};

use crate::tables::SimilarityEdge;

/// Pick the strongest similarity edge from an iterator
///
/// Equal scores break by ascending similar_part_number, so the winner does
/// not depend on input row order.
pub(crate) fn strongest_edge<'a>(
    edges: impl Iterator<Item = &'a SimilarityEdge>,
) -> Option<&'a SimilarityEdge> {
    edges.fold(None, |best: Option<&SimilarityEdge>, edge| match best {
        None => Some(edge),
        Some(current) => {
            if edge.similarity_score > current.similarity_score
                || (edge.similarity_score == current.similarity_score
                    && edge.similar_part_number < current.similar_part_number)
            {
                Some(edge)
            } else {
                Some(current)
            }
        }
    })
}
