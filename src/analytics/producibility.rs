//! Producibility advisor
//!
//! Warns about likely manufacturing trouble by looking at the selected
//! part's strongest geometric match and propagating that match's historical
//! quality failures. The geometric similarity itself is an input signal
//! from the drawing-analysis layer; this module only follows the edge.

use serde::{Deserialize, Serialize};

use crate::analytics::strongest_edge;
use crate::core::dataset::Dataset;

/// How many rejection reasons a warning carries
const TOP_REASON_LIMIT: usize = 3;

/// Description used when a matched part is unknown to both the drawing
/// metadata and the order history
pub const DESCRIPTION_UNAVAILABLE: &str = "Description unavailable";

/// The strongest geometric match for a part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricMatch {
    pub part_number: String,
    pub part_description: String,
    pub similarity_score: f64,
}

/// A rejection reason with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionReasonCount {
    pub reason: String,
    pub count: usize,
}

/// Outcome of the producibility analysis for one part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProducibilityOutcome {
    /// The part has no similarity edges at all
    NoMatch,
    /// The matched geometry has never been ordered
    NoHistory(GeometricMatch),
    /// The matched geometry was ordered but never had a rejection
    CleanHistory(GeometricMatch),
    /// The matched geometry has recorded quality failures
    Warning {
        matched: GeometricMatch,
        /// Top rejection reasons by count, descending; at most three
        top_reasons: Vec<RejectionReasonCount>,
    },
}

/// Run the producibility analysis for one part
pub fn advise(dataset: &Dataset, part_number: &str) -> ProducibilityOutcome {
    let Some(edge) = strongest_edge(dataset.edges_for_part(part_number)) else {
        return ProducibilityOutcome::NoMatch;
    };

    let matched = GeometricMatch {
        part_number: edge.similar_part_number.clone(),
        part_description: dataset
            .description_for_part(&edge.similar_part_number)
            .unwrap_or_else(|| DESCRIPTION_UNAVAILABLE.to_string()),
        similarity_score: edge.similarity_score,
    };

    let order_ids: Vec<&str> = dataset
        .orders_for_part(&edge.similar_part_number)
        .map(|o| o.order_id.as_str())
        .collect();
    if order_ids.is_empty() {
        return ProducibilityOutcome::NoHistory(matched);
    }

    let failed: Vec<_> = dataset
        .inspections
        .iter()
        .filter(|i| order_ids.contains(&i.order_id.as_str()) && i.has_rejections())
        .collect();
    if failed.is_empty() {
        return ProducibilityOutcome::CleanHistory(matched);
    }

    // Tally reasons preserving first-encounter order for deterministic ties
    let mut tallies: Vec<RejectionReasonCount> = Vec::new();
    for inspection in &failed {
        let reason = inspection
            .rejection_reason
            .as_deref()
            .unwrap_or("Unspecified");
        match tallies.iter_mut().find(|t| t.reason == reason) {
            Some(tally) => tally.count += 1,
            None => tallies.push(RejectionReasonCount {
                reason: reason.to_string(),
                count: 1,
            }),
        }
    }
    // Stable sort keeps first-encounter order among equal counts
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies.truncate(TOP_REASON_LIMIT);

    ProducibilityOutcome::Warning {
        matched,
        top_reasons: tallies,
    }
}
