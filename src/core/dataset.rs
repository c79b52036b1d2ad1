//! Dataset builder - the joined analytics snapshot
//!
//! `Dataset::build` turns the five raw tables into one immutable snapshot:
//! supplier names normalized, dates parsed, per-row metrics derived, and the
//! master table left-joined from orders, drawing metadata, and inspections.
//! Building is a pure function of the source tables; everything downstream
//! (the four analytics) is a read over the result.
//!
//! Failure policy: per-row problems never abort the build. Malformed cells
//! are coerced to defined defaults and recorded as [`DataQualityIssue`]
//! rows, so the master table always has exactly one row per order.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::normalize::normalize_supplier;
use crate::tables::{
    DrawerMetadata, Inspection, Order, RawTables, RfqResponse, SimilarityEdge,
};

/// Date formats accepted by the tolerant parser, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y", "%d-%b-%Y"];

/// Parse a date cell, accepting any of [`DATE_FORMATS`]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// A non-fatal data problem found while building the snapshot
///
/// Issues are data, not errors: the offending row flows through with a
/// default value in place of the bad cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQualityIssue {
    /// Source table name
    pub table: String,
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub field: String,
    pub detail: String,
}

/// One row per purchase order, left-joined with drawing metadata on
/// (part_number, part_description) and with inspections on order_id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterRecord {
    pub order_id: String,
    pub part_number: String,
    pub part_description: String,
    pub supplier_name: String,
    pub supplier_norm: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promised_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_delivery_date: Option<NaiveDate>,
    pub days_late: i64,

    // Drawing metadata (None when the part has no drawing record)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_proxy: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tightest_tolerance_mm: Option<f64>,

    // Inspection fields (counts 0 when the order was never inspected)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_date: Option<NaiveDate>,
    pub parts_inspected: u32,
    pub parts_rejected: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// parts_rejected / parts_inspected, 0 when nothing was inspected
    pub rejection_rate: f64,
}

/// A distinct (part_number, part_description) pair from the order history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRef {
    pub part_number: String,
    pub part_description: String,
}

/// Dataset-wide health metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalHealth {
    pub order_count: usize,
    pub part_count: usize,
    pub supplier_count: usize,
    /// Total rejected over total inspected; 0 when nothing was inspected
    pub overall_rejection_rate: f64,
    /// Share of master rows more than 10 days late
    pub late_order_share: f64,
}

/// The immutable analytics snapshot
///
/// Built once per load of the source tables and shared read-only for the
/// rest of the session. Serializable so the snapshot cache can persist it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub orders: Vec<Order>,
    pub inspections: Vec<Inspection>,
    pub rfqs: Vec<RfqResponse>,
    pub drawer_meta: Vec<DrawerMetadata>,
    pub similarity_edges: Vec<SimilarityEdge>,
    pub master: Vec<MasterRecord>,
    #[serde(default)]
    pub issues: Vec<DataQualityIssue>,
}

impl Dataset {
    /// Build the snapshot from raw tables
    ///
    /// Never fails: every malformed cell is coerced to its default and
    /// recorded in `issues`. Structural problems (a missing table or
    /// column) are caught earlier, at CSV load.
    pub fn build(raw: RawTables) -> Dataset {
        let mut issues = Vec::new();

        let orders = coerce_orders(raw.orders, &mut issues);
        let inspections = coerce_inspections(raw.inspections, &mut issues);
        let rfqs = coerce_rfqs(raw.rfqs, &mut issues);
        let drawer_meta = coerce_drawer_meta(raw.drawer_meta, &mut issues);
        let similarity_edges = coerce_similarity_edges(raw.similarity_edges, &mut issues);

        Self::assemble(orders, inspections, rfqs, drawer_meta, similarity_edges, issues)
    }

    /// Build the snapshot from already-typed tables
    ///
    /// Derived fields (supplier_norm, days_late, the master table) are
    /// recomputed here, so callers only supply source values.
    pub fn from_tables(
        orders: Vec<Order>,
        inspections: Vec<Inspection>,
        rfqs: Vec<RfqResponse>,
        drawer_meta: Vec<DrawerMetadata>,
        similarity_edges: Vec<SimilarityEdge>,
    ) -> Dataset {
        Self::assemble(orders, inspections, rfqs, drawer_meta, similarity_edges, Vec::new())
    }

    fn assemble(
        mut orders: Vec<Order>,
        inspections: Vec<Inspection>,
        mut rfqs: Vec<RfqResponse>,
        drawer_meta: Vec<DrawerMetadata>,
        similarity_edges: Vec<SimilarityEdge>,
        issues: Vec<DataQualityIssue>,
    ) -> Dataset {
        for order in &mut orders {
            order.supplier_norm = normalize_supplier(Some(&order.supplier_name));
            order.days_late = order.computed_days_late();
        }
        for rfq in &mut rfqs {
            rfq.supplier_norm = normalize_supplier(Some(&rfq.supplier_name));
        }

        let master = build_master(&orders, &inspections, &drawer_meta);

        Dataset {
            orders,
            inspections,
            rfqs,
            drawer_meta,
            similarity_edges,
            master,
            issues,
        }
    }

    /// Master rows for one part
    pub fn master_for_part<'a>(
        &'a self,
        part_number: &'a str,
    ) -> impl Iterator<Item = &'a MasterRecord> {
        self.master.iter().filter(move |r| r.part_number == part_number)
    }

    /// Orders for one part
    pub fn orders_for_part<'a>(&'a self, part_number: &'a str) -> impl Iterator<Item = &'a Order> {
        self.orders.iter().filter(move |o| o.part_number == part_number)
    }

    /// Similarity edges whose source is the given part
    pub fn edges_for_part<'a>(
        &'a self,
        part_number: &'a str,
    ) -> impl Iterator<Item = &'a SimilarityEdge> {
        self.similarity_edges
            .iter()
            .filter(move |e| e.source_part_number == part_number)
    }

    /// Whether the part appears in the order history
    pub fn has_part(&self, part_number: &str) -> bool {
        self.orders.iter().any(|o| o.part_number == part_number)
    }

    /// Mean unit price over the part's master rows, ignoring unpriced rows
    ///
    /// None when the part has no priced history at all.
    pub fn avg_unit_price(&self, part_number: &str) -> Option<f64> {
        let prices: Vec<f64> = self
            .master_for_part(part_number)
            .filter_map(|r| r.unit_price)
            .collect();
        if prices.is_empty() {
            None
        } else {
            Some(prices.iter().sum::<f64>() / prices.len() as f64)
        }
    }

    /// Resolve a part's display description
    ///
    /// Prefers the drawing metadata; falls back to the most frequent
    /// description in the part's order history (ties broken by first
    /// encounter). None when the part is unknown to both tables.
    pub fn description_for_part(&self, part_number: &str) -> Option<String> {
        if let Some(meta) = self.drawer_meta.iter().find(|m| m.part_number == part_number) {
            return Some(meta.part_description.clone());
        }

        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (idx, order) in self.orders_for_part(part_number).enumerate() {
            if order.part_description.is_empty() {
                continue;
            }
            let entry = counts.entry(&order.part_description).or_insert((0, idx));
            entry.0 += 1;
        }
        counts
            .into_iter()
            .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then(b.1 .1.cmp(&a.1 .1)))
            .map(|(desc, _)| desc.to_string())
    }

    /// Distinct (part_number, part_description) pairs from the order
    /// history, sorted by description then number
    pub fn part_catalog(&self) -> Vec<PartRef> {
        let mut parts: Vec<PartRef> = Vec::new();
        for order in &self.orders {
            if order.part_number.is_empty() {
                continue;
            }
            let part = PartRef {
                part_number: order.part_number.clone(),
                part_description: order.part_description.clone(),
            };
            if !parts.contains(&part) {
                parts.push(part);
            }
        }
        parts.sort_by(|a, b| {
            a.part_description
                .cmp(&b.part_description)
                .then_with(|| a.part_number.cmp(&b.part_number))
        });
        parts
    }

    /// Dataset-wide health metrics
    pub fn global_health(&self) -> GlobalHealth {
        let total_inspected: u64 = self.master.iter().map(|r| u64::from(r.parts_inspected)).sum();
        let total_rejected: u64 = self.master.iter().map(|r| u64::from(r.parts_rejected)).sum();
        let overall_rejection_rate = if total_inspected == 0 {
            0.0
        } else {
            total_rejected as f64 / total_inspected as f64
        };

        let late_order_share = if self.master.is_empty() {
            0.0
        } else {
            let late = self.master.iter().filter(|r| r.days_late > 10).count();
            late as f64 / self.master.len() as f64
        };

        let mut suppliers: Vec<&str> = self
            .orders
            .iter()
            .map(|o| o.supplier_norm.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        suppliers.sort_unstable();
        suppliers.dedup();

        GlobalHealth {
            order_count: self.orders.len(),
            part_count: self.part_catalog().len(),
            supplier_count: suppliers.len(),
            overall_rejection_rate,
            late_order_share,
        }
    }
}

/// Left-join orders with drawing metadata and inspections
///
/// First matching row wins on duplicate join keys, so the master table
/// always has exactly one row per order.
fn build_master(
    orders: &[Order],
    inspections: &[Inspection],
    drawer_meta: &[DrawerMetadata],
) -> Vec<MasterRecord> {
    let mut meta_map: HashMap<(&str, &str), &DrawerMetadata> = HashMap::new();
    for meta in drawer_meta {
        meta_map
            .entry((meta.part_number.as_str(), meta.part_description.as_str()))
            .or_insert(meta);
    }

    let mut insp_map: HashMap<&str, &Inspection> = HashMap::new();
    for insp in inspections {
        insp_map.entry(insp.order_id.as_str()).or_insert(insp);
    }

    orders
        .iter()
        .map(|order| {
            let meta = meta_map
                .get(&(order.part_number.as_str(), order.part_description.as_str()))
                .copied();
            let insp = insp_map.get(order.order_id.as_str()).copied();

            let parts_inspected = insp.map_or(0, |i| i.parts_inspected);
            let parts_rejected = insp.map_or(0, |i| i.parts_rejected);
            let rejection_rate = if parts_inspected == 0 {
                0.0
            } else {
                f64::from(parts_rejected) / f64::from(parts_inspected)
            };

            MasterRecord {
                order_id: order.order_id.clone(),
                part_number: order.part_number.clone(),
                part_description: order.part_description.clone(),
                supplier_name: order.supplier_name.clone(),
                supplier_norm: order.supplier_norm.clone(),
                quantity: order.quantity,
                unit_price: order.unit_price,
                order_date: order.order_date,
                promised_date: order.promised_date,
                actual_delivery_date: order.actual_delivery_date,
                days_late: order.days_late,
                complexity_proxy: meta.and_then(|m| m.complexity_proxy),
                material: meta.and_then(|m| m.material.clone()),
                tightest_tolerance_mm: meta.and_then(|m| m.tightest_tolerance_mm),
                inspection_date: insp.and_then(|i| i.inspection_date),
                parts_inspected,
                parts_rejected,
                rejection_reason: insp.and_then(|i| i.rejection_reason.clone()),
                rejection_rate,
            }
        })
        .collect()
}

fn push_issue(issues: &mut Vec<DataQualityIssue>, table: &str, row: usize, field: &str, detail: String) {
    issues.push(DataQualityIssue {
        table: table.to_string(),
        row,
        field: field.to_string(),
        detail,
    });
}

/// Required text field: missing or blank becomes "" and is recorded
fn coerce_key(
    table: &str,
    row: usize,
    field: &str,
    value: Option<String>,
    issues: &mut Vec<DataQualityIssue>,
) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => {
            push_issue(issues, table, row, field, "missing value".to_string());
            String::new()
        }
    }
}

/// Count field: blank becomes 0 silently, malformed becomes 0 and is recorded
fn coerce_count(
    table: &str,
    row: usize,
    field: &str,
    value: Option<&String>,
    issues: &mut Vec<DataQualityIssue>,
) -> u32 {
    match value.map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => 0,
        Some(v) => match v.parse::<f64>() {
            // Counts sometimes arrive as "12.0" from spreadsheet exports
            Ok(n) if n >= 0.0 => n.round() as u32,
            _ => {
                push_issue(issues, table, row, field, format!("unparseable count {v:?}"));
                0
            }
        },
    }
}

/// Optional numeric field: blank stays None, malformed becomes None and is recorded
fn coerce_number(
    table: &str,
    row: usize,
    field: &str,
    value: Option<&String>,
    issues: &mut Vec<DataQualityIssue>,
) -> Option<f64> {
    let v = value.map(|v| v.trim()).filter(|v| !v.is_empty())?;
    match v.parse::<f64>() {
        Ok(n) => Some(n),
        Err(_) => {
            push_issue(issues, table, row, field, format!("unparseable number {v:?}"));
            None
        }
    }
}

/// Date field: blank stays None, unparseable becomes None and is recorded
fn coerce_date(
    table: &str,
    row: usize,
    field: &str,
    value: Option<&String>,
    issues: &mut Vec<DataQualityIssue>,
) -> Option<NaiveDate> {
    let v = value.map(|v| v.trim()).filter(|v| !v.is_empty())?;
    match parse_date(v) {
        Some(date) => Some(date),
        None => {
            push_issue(issues, table, row, field, format!("unparseable date {v:?}"));
            None
        }
    }
}

fn coerce_orders(
    raw: Vec<crate::tables::RawOrder>,
    issues: &mut Vec<DataQualityIssue>,
) -> Vec<Order> {
    let table = "orders";
    raw.into_iter()
        .enumerate()
        .map(|(idx, r)| {
            let row = idx + 1;
            Order {
                order_id: coerce_key(table, row, "order_id", r.order_id, issues),
                part_number: coerce_key(table, row, "part_number", r.part_number, issues),
                part_description: coerce_key(table, row, "part_description", r.part_description, issues),
                supplier_name: r.supplier_name.unwrap_or_default().trim().to_string(),
                supplier_norm: String::new(),
                quantity: coerce_count(table, row, "quantity", r.quantity.as_ref(), issues),
                unit_price: coerce_number(table, row, "unit_price", r.unit_price.as_ref(), issues),
                order_date: coerce_date(table, row, "order_date", r.order_date.as_ref(), issues),
                promised_date: coerce_date(table, row, "promised_date", r.promised_date.as_ref(), issues),
                actual_delivery_date: coerce_date(
                    table,
                    row,
                    "actual_delivery_date",
                    r.actual_delivery_date.as_ref(),
                    issues,
                ),
                days_late: 0,
            }
        })
        .collect()
}

fn coerce_inspections(
    raw: Vec<crate::tables::RawInspection>,
    issues: &mut Vec<DataQualityIssue>,
) -> Vec<Inspection> {
    let table = "inspections";
    raw.into_iter()
        .enumerate()
        .map(|(idx, r)| {
            let row = idx + 1;
            Inspection {
                order_id: coerce_key(table, row, "order_id", r.order_id, issues),
                inspection_date: coerce_date(table, row, "inspection_date", r.inspection_date.as_ref(), issues),
                parts_inspected: coerce_count(table, row, "parts_inspected", r.parts_inspected.as_ref(), issues),
                parts_rejected: coerce_count(table, row, "parts_rejected", r.parts_rejected.as_ref(), issues),
                rejection_reason: r.rejection_reason.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
            }
        })
        .collect()
}

fn coerce_rfqs(
    raw: Vec<crate::tables::RawRfqResponse>,
    issues: &mut Vec<DataQualityIssue>,
) -> Vec<RfqResponse> {
    let table = "rfq_responses";
    raw.into_iter()
        .enumerate()
        .map(|(idx, r)| {
            let row = idx + 1;
            RfqResponse {
                supplier_name: r.supplier_name.unwrap_or_default().trim().to_string(),
                supplier_norm: String::new(),
                part_description: coerce_key(table, row, "part_description", r.part_description, issues),
                quote_date: coerce_date(table, row, "quote_date", r.quote_date.as_ref(), issues),
                quoted_price: coerce_number(table, row, "quoted_price", r.quoted_price.as_ref(), issues),
            }
        })
        .collect()
}

fn coerce_drawer_meta(
    raw: Vec<crate::tables::RawDrawerMetadata>,
    issues: &mut Vec<DataQualityIssue>,
) -> Vec<DrawerMetadata> {
    let table = "drawer_metadata";
    raw.into_iter()
        .enumerate()
        .map(|(idx, r)| {
            let row = idx + 1;
            let complexity = coerce_number(table, row, "complexity_proxy", r.complexity_proxy.as_ref(), issues)
                .and_then(|n| {
                    if (1.0..=10.0).contains(&n) {
                        Some(n.round() as u8)
                    } else {
                        push_issue(
                            issues,
                            table,
                            row,
                            "complexity_proxy",
                            format!("out of 1-10 range: {n}"),
                        );
                        None
                    }
                });
            DrawerMetadata {
                part_number: coerce_key(table, row, "part_number", r.part_number, issues),
                part_description: coerce_key(table, row, "part_description", r.part_description, issues),
                complexity_proxy: complexity,
                material: r.material.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()),
                tightest_tolerance_mm: coerce_number(
                    table,
                    row,
                    "tightest_tolerance_mm",
                    r.tightest_tolerance_mm.as_ref(),
                    issues,
                ),
            }
        })
        .collect()
}

fn coerce_similarity_edges(
    raw: Vec<crate::tables::RawSimilarityEdge>,
    issues: &mut Vec<DataQualityIssue>,
) -> Vec<SimilarityEdge> {
    let table = "drawer_similarity";
    raw.into_iter()
        .enumerate()
        .map(|(idx, r)| {
            let row = idx + 1;
            let score = coerce_number(table, row, "similarity_score", r.similarity_score.as_ref(), issues)
                .map(|n| {
                    if (0.0..=1.0).contains(&n) {
                        n
                    } else {
                        push_issue(
                            issues,
                            table,
                            row,
                            "similarity_score",
                            format!("out of 0-1 range: {n}"),
                        );
                        n.clamp(0.0, 1.0)
                    }
                })
                .unwrap_or(0.0);
            SimilarityEdge {
                source_part_number: coerce_key(table, row, "source_part_number", r.source_part_number, issues),
                similar_part_number: coerce_key(table, row, "similar_part_number", r.similar_part_number, issues),
                similarity_score: score,
            }
        })
        .collect()
}
