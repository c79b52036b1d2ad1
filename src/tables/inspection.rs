//! Incoming quality inspection records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inspection row as read from quality_inspections.csv
#[derive(Debug, Clone, Default)]
pub struct RawInspection {
    pub order_id: Option<String>,
    pub inspection_date: Option<String>,
    pub parts_inspected: Option<String>,
    pub parts_rejected: Option<String>,
    pub rejection_reason: Option<String>,
}

/// An inspection result tied to a purchase order
///
/// Counts default to 0 when the source data is missing, so rate math never
/// has to reason about absent values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
    pub order_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_date: Option<NaiveDate>,

    #[serde(default)]
    pub parts_inspected: u32,

    #[serde(default)]
    pub parts_rejected: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl Inspection {
    /// Rejected share of inspected parts; 0 when nothing was inspected
    pub fn rejection_rate(&self) -> f64 {
        if self.parts_inspected == 0 {
            0.0
        } else {
            f64::from(self.parts_rejected) / f64::from(self.parts_inspected)
        }
    }

    /// Whether this inspection recorded at least one rejected part
    pub fn has_rejections(&self) -> bool {
        self.parts_rejected > 0
    }
}
