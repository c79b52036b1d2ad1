//! VA/VE consolidation advisor
//!
//! Looks for a geometric twin (similarity at or above the threshold) whose
//! purchase history is cheaper than the selected part's, as a candidate for
//! design or sourcing consolidation.

use serde::{Deserialize, Serialize};

use crate::analytics::strongest_edge;
use crate::core::dataset::Dataset;

/// Minimum similarity for a part to count as a geometric twin
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.95;

/// The twin considered for consolidation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidationCandidate {
    pub part_number: String,
    pub similarity_score: f64,
}

/// Outcome of the consolidation analysis for one part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConsolidationOutcome {
    /// No edge at or above the threshold (self-matches excluded)
    NoCandidate,
    /// A twin exists but one side lacks priced purchase history
    InsufficientData { candidate: ConsolidationCandidate },
    /// The twin is not cheaper than the selected part
    NoSavings { candidate: ConsolidationCandidate },
    /// The twin is cheaper; consolidating could save money
    SavingsOpportunity {
        candidate: ConsolidationCandidate,
        /// How much cheaper the twin's average price is, in percent of the
        /// selected part's average
        price_delta_pct: f64,
    },
}

/// Run the consolidation analysis for one part
///
/// Averages of exactly zero are treated the same as missing history, so a
/// zero-priced baseline yields `InsufficientData` rather than a division by
/// zero or a spurious savings figure.
pub fn advise(dataset: &Dataset, part_number: &str, threshold: f64) -> ConsolidationOutcome {
    let best = strongest_edge(
        dataset
            .edges_for_part(part_number)
            .filter(|e| e.similarity_score >= threshold && !e.is_self_match()),
    );

    let Some(edge) = best else {
        return ConsolidationOutcome::NoCandidate;
    };

    let candidate = ConsolidationCandidate {
        part_number: edge.similar_part_number.clone(),
        similarity_score: edge.similarity_score,
    };

    let current_avg = dataset.avg_unit_price(part_number).filter(|&v| v != 0.0);
    let other_avg = dataset
        .avg_unit_price(&edge.similar_part_number)
        .filter(|&v| v != 0.0);

    match (current_avg, other_avg) {
        (Some(current), Some(other)) => {
            let price_delta_pct = (current - other) / current * 100.0;
            if price_delta_pct > 0.0 {
                ConsolidationOutcome::SavingsOpportunity {
                    candidate,
                    price_delta_pct,
                }
            } else {
                ConsolidationOutcome::NoSavings { candidate }
            }
        }
        _ => ConsolidationOutcome::InsufficientData { candidate },
    }
}
