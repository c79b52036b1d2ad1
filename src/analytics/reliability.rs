//! Supplier reliability classification
//!
//! A pure mapping from (average days late, rejection rate) to a risk tier,
//! applied at two granularities: a part's aggregate history and each
//! (supplier, part) relationship.

use serde::{Deserialize, Serialize};

use crate::core::dataset::Dataset;

/// Average days late above which a relationship is high risk
pub const HIGH_RISK_DAYS_LATE: f64 = 10.0;
/// Rejection rate above which a relationship is high risk
pub const HIGH_RISK_REJECTION_RATE: f64 = 0.05;
/// Average days late above which a relationship is on watch
pub const WATCH_DAYS_LATE: f64 = 5.0;
/// Rejection rate above which a relationship is on watch
pub const WATCH_REJECTION_RATE: f64 = 0.02;

/// Reliability risk tier, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Stable,
    Watch,
    HighRisk,
}

impl Default for RiskTier {
    fn default() -> Self {
        RiskTier::Stable
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Stable => write!(f, "stable"),
            RiskTier::Watch => write!(f, "watch"),
            RiskTier::HighRisk => write!(f, "high_risk"),
        }
    }
}

impl std::str::FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stable" => Ok(RiskTier::Stable),
            "watch" => Ok(RiskTier::Watch),
            "high_risk" | "high-risk" => Ok(RiskTier::HighRisk),
            _ => Err(format!(
                "Invalid risk tier: {}. Use stable, watch, or high_risk",
                s
            )),
        }
    }
}

/// Classify a relationship by lateness and rejection history
///
/// Thresholds are strictly-greater-than: exactly 10 days late or exactly a
/// 5% rejection rate does not escalate.
pub fn classify(avg_days_late: f64, rejection_rate: f64) -> RiskTier {
    if avg_days_late > HIGH_RISK_DAYS_LATE || rejection_rate > HIGH_RISK_REJECTION_RATE {
        RiskTier::HighRisk
    } else if avg_days_late > WATCH_DAYS_LATE || rejection_rate > WATCH_REJECTION_RATE {
        RiskTier::Watch
    } else {
        RiskTier::Stable
    }
}

/// Aggregate reliability metrics for one part's full history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartReliability {
    pub avg_days_late: f64,
    /// Total rejected over total inspected across the part's orders
    pub rejection_rate: f64,
    pub tier: RiskTier,
}

/// Reliability metrics for a part's aggregate order history
///
/// None when the part has no orders.
pub fn part_reliability(dataset: &Dataset, part_number: &str) -> Option<PartReliability> {
    let rows: Vec<_> = dataset.master_for_part(part_number).collect();
    if rows.is_empty() {
        return None;
    }

    let avg_days_late =
        rows.iter().map(|r| r.days_late as f64).sum::<f64>() / rows.len() as f64;
    let inspected: u64 = rows.iter().map(|r| u64::from(r.parts_inspected)).sum();
    let rejected: u64 = rows.iter().map(|r| u64::from(r.parts_rejected)).sum();
    let rejection_rate = if inspected == 0 {
        0.0
    } else {
        rejected as f64 / inspected as f64
    };

    Some(PartReliability {
        avg_days_late,
        rejection_rate,
        tier: classify(avg_days_late, rejection_rate),
    })
}

/// One supplier's history for a given part, with an explicit risk field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierPartStats {
    /// Display name as it appears in the source data
    pub supplier_name: String,
    pub supplier_norm: String,
    pub total_quantity: u64,
    pub total_inspected: u64,
    pub total_rejected: u64,
    /// Total rejected over total inspected for this supplier; 0-guarded
    pub avg_rejection_rate: f64,
    pub avg_days_late: f64,
    pub risk: RiskTier,
}

/// Per-supplier reliability breakdown for one part
///
/// Groups the part's master rows by (supplier_norm, supplier_name) and
/// classifies each group independently. Rows are sorted by display name for
/// reproducible output.
pub fn supplier_breakdown(dataset: &Dataset, part_number: &str) -> Vec<SupplierPartStats> {
    // (stats, row count) per group; avg_days_late holds a sum until the end
    let mut groups: Vec<(SupplierPartStats, usize)> = Vec::new();

    for row in dataset.master_for_part(part_number) {
        let idx = groups
            .iter()
            .position(|(g, _)| {
                g.supplier_norm == row.supplier_norm && g.supplier_name == row.supplier_name
            })
            .unwrap_or_else(|| {
                groups.push((
                    SupplierPartStats {
                        supplier_name: row.supplier_name.clone(),
                        supplier_norm: row.supplier_norm.clone(),
                        total_quantity: 0,
                        total_inspected: 0,
                        total_rejected: 0,
                        avg_rejection_rate: 0.0,
                        avg_days_late: 0.0,
                        risk: RiskTier::Stable,
                    },
                    0,
                ));
                groups.len() - 1
            });
        let (stats, rows) = &mut groups[idx];
        stats.total_quantity += u64::from(row.quantity);
        stats.total_inspected += u64::from(row.parts_inspected);
        stats.total_rejected += u64::from(row.parts_rejected);
        stats.avg_days_late += row.days_late as f64;
        *rows += 1;
    }

    let mut breakdown: Vec<SupplierPartStats> = groups
        .into_iter()
        .map(|(mut stats, rows)| {
            stats.avg_days_late /= rows as f64;
            stats.avg_rejection_rate = if stats.total_inspected == 0 {
                0.0
            } else {
                stats.total_rejected as f64 / stats.total_inspected as f64
            };
            stats.risk = classify(stats.avg_days_late, stats.avg_rejection_rate);
            stats
        })
        .collect();

    breakdown.sort_by(|a, b| a.supplier_name.cmp(&b.supplier_name));
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{Inspection, Order};

    #[test]
    fn test_classify_high_risk() {
        assert_eq!(classify(11.0, 0.0), RiskTier::HighRisk);
        assert_eq!(classify(0.0, 0.051), RiskTier::HighRisk);
        // Either axis alone escalates
        assert_eq!(classify(6.0, 0.06), RiskTier::HighRisk);
    }

    #[test]
    fn test_classify_watch() {
        assert_eq!(classify(6.0, 0.0), RiskTier::Watch);
        assert_eq!(classify(0.0, 0.021), RiskTier::Watch);
    }

    #[test]
    fn test_classify_boundaries_do_not_escalate() {
        // Thresholds are strictly greater-than
        assert_eq!(classify(10.0, 0.0), RiskTier::Stable);
        assert_eq!(classify(5.0, 0.0), RiskTier::Stable);
        assert_eq!(classify(0.0, 0.05), RiskTier::Stable);
        assert_eq!(classify(0.0, 0.02), RiskTier::Stable);
    }

    #[test]
    fn test_risk_tier_ordering_and_parse() {
        assert!(RiskTier::Stable < RiskTier::Watch);
        assert!(RiskTier::Watch < RiskTier::HighRisk);
        assert_eq!("high_risk".parse::<RiskTier>().unwrap(), RiskTier::HighRisk);
        assert!("invalid".parse::<RiskTier>().is_err());
    }

    fn order(id: &str, part: &str, supplier: &str, days_late: i64, qty: u32) -> Order {
        use chrono::NaiveDate;
        let promised = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        Order {
            order_id: id.to_string(),
            part_number: part.to_string(),
            part_description: "Plate".to_string(),
            supplier_name: supplier.to_string(),
            supplier_norm: String::new(),
            quantity: qty,
            unit_price: Some(10.0),
            order_date: None,
            promised_date: Some(promised),
            actual_delivery_date: Some(promised + chrono::Duration::days(days_late)),
            days_late: 0,
        }
    }

    fn inspection(order_id: &str, inspected: u32, rejected: u32) -> Inspection {
        Inspection {
            order_id: order_id.to_string(),
            inspection_date: None,
            parts_inspected: inspected,
            parts_rejected: rejected,
            rejection_reason: None,
        }
    }

    #[test]
    fn test_part_reliability_aggregates_history() {
        let dataset = Dataset::from_tables(
            vec![
                order("PO-1", "HX-100", "Acme Inc.", 12, 10),
                order("PO-2", "HX-100", "Acme Inc.", 2, 10),
            ],
            vec![inspection("PO-1", 100, 1), inspection("PO-2", 100, 0)],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );

        let rel = part_reliability(&dataset, "HX-100").unwrap();
        assert_eq!(rel.avg_days_late, 7.0);
        assert!((rel.rejection_rate - 0.005).abs() < 1e-9);
        assert_eq!(rel.tier, RiskTier::Watch);
    }

    #[test]
    fn test_part_reliability_unknown_part_is_none() {
        let dataset = Dataset::from_tables(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new());
        assert!(part_reliability(&dataset, "HX-100").is_none());
    }

    #[test]
    fn test_supplier_breakdown_groups_and_classifies() {
        let dataset = Dataset::from_tables(
            vec![
                order("PO-1", "HX-100", "Acme Inc.", 15, 10),
                order("PO-2", "HX-100", "Acme Inc.", 13, 20),
                order("PO-3", "HX-100", "Vega Corp", 0, 30),
            ],
            vec![
                inspection("PO-1", 100, 0),
                inspection("PO-3", 100, 1),
            ],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        );

        let breakdown = supplier_breakdown(&dataset, "HX-100");
        assert_eq!(breakdown.len(), 2);

        let acme = &breakdown[0];
        assert_eq!(acme.supplier_name, "Acme Inc.");
        assert_eq!(acme.supplier_norm, "ACME");
        assert_eq!(acme.total_quantity, 30);
        assert_eq!(acme.avg_days_late, 14.0);
        assert_eq!(acme.risk, RiskTier::HighRisk);

        let vega = &breakdown[1];
        assert_eq!(vega.total_quantity, 30);
        assert!((vega.avg_rejection_rate - 0.01).abs() < 1e-9);
        assert_eq!(vega.risk, RiskTier::Stable);
    }

    #[test]
    fn test_supplier_breakdown_empty_for_unknown_part() {
        let dataset = Dataset::from_tables(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new());
        assert!(supplier_breakdown(&dataset, "HX-100").is_empty());
    }
}
