//! Quote benchmarking
//!
//! Compares a part's historical average purchase price against the latest
//! RFQ quote for the same part description. RFQ rows carry no part number,
//! so matching is by case-insensitive description.

use serde::{Deserialize, Serialize};

use crate::core::dataset::Dataset;

/// Variance above which the latest quote triggers a price alert, in percent
pub const PRICE_ALERT_VARIANCE_PCT: f64 = 10.0;

/// Caller-facing reading of a benchmark result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkVerdict {
    /// Latest quote is more than 10% above the historical average
    PriceAlert,
    /// Variance computed and within the acceptable range
    WithinRange,
    /// No baseline, no quote, or a zero-priced baseline
    InsufficientData,
}

impl std::fmt::Display for BenchmarkVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenchmarkVerdict::PriceAlert => write!(f, "price_alert"),
            BenchmarkVerdict::WithinRange => write!(f, "within_range"),
            BenchmarkVerdict::InsufficientData => write!(f, "insufficient_data"),
        }
    }
}

/// Quote-vs-history comparison for one part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteBenchmark {
    /// Mean unit price over the part's order history
    pub historical_avg: Option<f64>,
    /// Quoted price of the most recent matching RFQ response
    pub latest_quote: Option<f64>,
    /// (latest - historical) / historical, in percent
    pub variance_pct: Option<f64>,
}

impl QuoteBenchmark {
    pub fn verdict(&self) -> BenchmarkVerdict {
        match self.variance_pct {
            Some(v) if v > PRICE_ALERT_VARIANCE_PCT => BenchmarkVerdict::PriceAlert,
            Some(_) => BenchmarkVerdict::WithinRange,
            None => BenchmarkVerdict::InsufficientData,
        }
    }
}

/// Benchmark a part's latest quote against its purchase history
///
/// The variance is only computed when both values exist and the historical
/// average is non-zero: a zero-priced baseline reads as "no baseline", the
/// same as a missing one.
pub fn benchmark(dataset: &Dataset, part_number: &str, part_description: &str) -> QuoteBenchmark {
    let historical_avg = dataset.avg_unit_price(part_number);

    let mut candidates: Vec<_> = dataset
        .rfqs
        .iter()
        .filter(|r| r.matches_description(part_description))
        .collect();
    // Ascending by quote date; undated rows sort first so a dated quote
    // always wins "latest"
    candidates.sort_by_key(|r| r.quote_date);
    let latest_quote = candidates.last().and_then(|r| r.quoted_price);

    let variance_pct = match (historical_avg, latest_quote) {
        (Some(hist), Some(quote)) if hist != 0.0 => Some((quote - hist) / hist * 100.0),
        _ => None,
    };

    QuoteBenchmark {
        historical_avg,
        latest_quote,
        variance_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{Order, RfqResponse};
    use chrono::NaiveDate;

    fn order(id: &str, price: Option<f64>) -> Order {
        Order {
            order_id: id.to_string(),
            part_number: "HX-100".to_string(),
            part_description: "Heat Exchanger Plate".to_string(),
            supplier_name: "Acme Inc.".to_string(),
            supplier_norm: String::new(),
            quantity: 10,
            unit_price: price,
            order_date: None,
            promised_date: None,
            actual_delivery_date: None,
            days_late: 0,
        }
    }

    fn rfq(desc: &str, date: Option<&str>, price: f64) -> RfqResponse {
        RfqResponse {
            supplier_name: "Vega Corp".to_string(),
            supplier_norm: String::new(),
            part_description: desc.to_string(),
            quote_date: date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            quoted_price: Some(price),
        }
    }

    fn dataset(orders: Vec<Order>, rfqs: Vec<RfqResponse>) -> Dataset {
        Dataset::from_tables(orders, Vec::new(), rfqs, Vec::new(), Vec::new())
    }

    #[test]
    fn test_variance_and_price_alert() {
        let ds = dataset(
            vec![order("PO-1", Some(100.0))],
            vec![rfq("Heat Exchanger Plate", Some("2024-03-01"), 115.0)],
        );

        let result = benchmark(&ds, "HX-100", "Heat Exchanger Plate");
        assert_eq!(result.historical_avg, Some(100.0));
        assert_eq!(result.latest_quote, Some(115.0));
        assert_eq!(result.variance_pct, Some(15.0));
        assert_eq!(result.verdict(), BenchmarkVerdict::PriceAlert);
    }

    #[test]
    fn test_within_range() {
        let ds = dataset(
            vec![order("PO-1", Some(100.0))],
            vec![rfq("Heat Exchanger Plate", Some("2024-03-01"), 105.0)],
        );

        let result = benchmark(&ds, "HX-100", "Heat Exchanger Plate");
        assert_eq!(result.variance_pct, Some(5.0));
        assert_eq!(result.verdict(), BenchmarkVerdict::WithinRange);
    }

    #[test]
    fn test_exactly_ten_percent_is_within_range() {
        let ds = dataset(
            vec![order("PO-1", Some(100.0))],
            vec![rfq("Heat Exchanger Plate", Some("2024-03-01"), 110.0)],
        );
        assert_eq!(
            benchmark(&ds, "HX-100", "Heat Exchanger Plate").verdict(),
            BenchmarkVerdict::WithinRange
        );
    }

    #[test]
    fn test_no_history_is_insufficient_data() {
        let ds = dataset(
            Vec::new(),
            vec![rfq("Heat Exchanger Plate", Some("2024-03-01"), 115.0)],
        );

        let result = benchmark(&ds, "HX-100", "Heat Exchanger Plate");
        assert_eq!(result.historical_avg, None);
        assert_eq!(result.variance_pct, None);
        assert_eq!(result.verdict(), BenchmarkVerdict::InsufficientData);
    }

    #[test]
    fn test_zero_baseline_reads_as_no_baseline() {
        let ds = dataset(
            vec![order("PO-1", Some(0.0))],
            vec![rfq("Heat Exchanger Plate", Some("2024-03-01"), 115.0)],
        );

        let result = benchmark(&ds, "HX-100", "Heat Exchanger Plate");
        assert_eq!(result.historical_avg, Some(0.0));
        assert_eq!(result.variance_pct, None);
        assert_eq!(result.verdict(), BenchmarkVerdict::InsufficientData);
    }

    #[test]
    fn test_latest_quote_by_date_case_insensitive() {
        let ds = dataset(
            vec![order("PO-1", Some(100.0))],
            vec![
                rfq("HEAT EXCHANGER PLATE", Some("2024-03-01"), 120.0),
                rfq("heat exchanger plate", Some("2024-04-01"), 104.0),
                rfq("Heat Exchanger Plate", Some("2024-01-15"), 130.0),
                rfq("Some Other Part", Some("2024-05-01"), 999.0),
            ],
        );

        let result = benchmark(&ds, "HX-100", "Heat Exchanger Plate");
        assert_eq!(result.latest_quote, Some(104.0));
        assert_eq!(result.variance_pct, Some(4.0));
    }

    #[test]
    fn test_undated_quotes_sort_before_dated() {
        let ds = dataset(
            vec![order("PO-1", Some(100.0))],
            vec![
                rfq("Heat Exchanger Plate", None, 150.0),
                rfq("Heat Exchanger Plate", Some("2024-01-01"), 101.0),
            ],
        );

        assert_eq!(
            benchmark(&ds, "HX-100", "Heat Exchanger Plate").latest_quote,
            Some(101.0)
        );
    }

    #[test]
    fn test_no_matching_rfq_is_insufficient_data() {
        let ds = dataset(vec![order("PO-1", Some(100.0))], Vec::new());

        let result = benchmark(&ds, "HX-100", "Heat Exchanger Plate");
        assert_eq!(result.historical_avg, Some(100.0));
        assert_eq!(result.latest_quote, None);
        assert_eq!(result.verdict(), BenchmarkVerdict::InsufficientData);
    }
}
