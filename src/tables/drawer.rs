//! Geometric intelligence layer: drawing metadata and part similarity
//!
//! Both tables are produced upstream by a drawing-analysis service. The
//! complexity proxy and similarity scores are consumed as given signals;
//! nothing in this crate computes geometry.

use serde::{Deserialize, Serialize};

/// A drawing metadata row as read from drawer_metadata.csv
#[derive(Debug, Clone, Default)]
pub struct RawDrawerMetadata {
    pub part_number: Option<String>,
    pub part_description: Option<String>,
    pub complexity_proxy: Option<String>,
    pub material: Option<String>,
    pub tightest_tolerance_mm: Option<String>,
}

/// Geometric attributes extracted from a part drawing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawerMetadata {
    pub part_number: String,

    pub part_description: String,

    /// 1-10 stand-in for high-dimensional geometric feature extraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_proxy: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tightest_tolerance_mm: Option<f64>,
}

/// A similarity row as read from drawer_similarity.csv
#[derive(Debug, Clone, Default)]
pub struct RawSimilarityEdge {
    pub source_part_number: Option<String>,
    pub similar_part_number: Option<String>,
    pub similarity_score: Option<String>,
}

/// A directed geometric-similarity edge between two parts
///
/// Edges are not guaranteed symmetric, and a source part may carry one edge
/// per candidate match. Scores live in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityEdge {
    pub source_part_number: String,

    pub similar_part_number: String,

    pub similarity_score: f64,
}

impl SimilarityEdge {
    /// Whether this edge points a part at itself
    pub fn is_self_match(&self) -> bool {
        self.source_part_number == self.similar_part_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_match_detection() {
        let edge = SimilarityEdge {
            source_part_number: "HX-100".to_string(),
            similar_part_number: "HX-100".to_string(),
            similarity_score: 1.0,
        };
        assert!(edge.is_self_match());

        let edge = SimilarityEdge {
            source_part_number: "HX-100".to_string(),
            similar_part_number: "HX-110".to_string(),
            similarity_score: 0.97,
        };
        assert!(!edge.is_self_match());
    }
}
