//! RFQ (request-for-quote) responses

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An RFQ response row as read from rfq_responses.csv
#[derive(Debug, Clone, Default)]
pub struct RawRfqResponse {
    pub supplier_name: Option<String>,
    pub part_description: Option<String>,
    pub quote_date: Option<String>,
    pub quoted_price: Option<String>,
}

/// A supplier quotation for a part
///
/// RFQ data carries no part number, so quotes are matched to parts by
/// case-insensitive part_description equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfqResponse {
    pub supplier_name: String,

    /// Canonical supplier name, used only for matching and grouping
    #[serde(default)]
    pub supplier_norm: String,

    pub part_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_price: Option<f64>,
}

impl RfqResponse {
    /// Whether this quote is for the given part description
    pub fn matches_description(&self, description: &str) -> bool {
        self.part_description.to_lowercase() == description.to_lowercase()
    }
}
