//! CSV table loading
//!
//! Reads the five source tables from a data directory into their raw forms.
//! This is the structural boundary of the pipeline: a missing file, an
//! unreadable CSV, or an absent required column is a hard [`LoadError`].
//! Everything below that level (bad cells, blank values) is tolerated here
//! and resolved by the dataset builder.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use crate::tables::{
    RawDrawerMetadata, RawInspection, RawOrder, RawRfqResponse, RawSimilarityEdge, RawTables,
};

pub const ORDERS_FILE: &str = "supplier_orders.csv";
pub const INSPECTIONS_FILE: &str = "quality_inspections.csv";
pub const RFQ_FILE: &str = "rfq_responses.csv";
pub const DRAWER_META_FILE: &str = "drawer_metadata.csv";
pub const DRAWER_SIMILARITY_FILE: &str = "drawer_similarity.csv";

/// All five table files, in load order
pub const TABLE_FILES: &[&str] = &[
    ORDERS_FILE,
    INSPECTIONS_FILE,
    RFQ_FILE,
    DRAWER_META_FILE,
    DRAWER_SIMILARITY_FILE,
];

/// Structural load failures - these abort the pipeline
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("required table file not found: {path}")]
    MissingTable { path: PathBuf },

    #[error("table {table} is missing required column '{column}'")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("failed to read {table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load the five raw tables from a data directory
pub fn load_dir(dir: &Path) -> Result<RawTables, LoadError> {
    Ok(RawTables {
        orders: load_table(dir, ORDERS_FILE, &ORDER_COLUMNS, raw_order)?,
        inspections: load_table(dir, INSPECTIONS_FILE, &INSPECTION_COLUMNS, raw_inspection)?,
        rfqs: load_table(dir, RFQ_FILE, &RFQ_COLUMNS, raw_rfq)?,
        drawer_meta: load_table(dir, DRAWER_META_FILE, &DRAWER_META_COLUMNS, raw_drawer_meta)?,
        similarity_edges: load_table(
            dir,
            DRAWER_SIMILARITY_FILE,
            &SIMILARITY_COLUMNS,
            raw_similarity_edge,
        )?,
    })
}

const ORDER_COLUMNS: [&str; 9] = [
    "order_id",
    "part_number",
    "part_description",
    "supplier_name",
    "quantity",
    "unit_price",
    "order_date",
    "promised_date",
    "actual_delivery_date",
];

const INSPECTION_COLUMNS: [&str; 5] = [
    "order_id",
    "inspection_date",
    "parts_inspected",
    "parts_rejected",
    "rejection_reason",
];

const RFQ_COLUMNS: [&str; 4] = ["supplier_name", "part_description", "quote_date", "quoted_price"];

const DRAWER_META_COLUMNS: [&str; 3] = ["part_number", "part_description", "complexity_proxy"];

const SIMILARITY_COLUMNS: [&str; 3] =
    ["source_part_number", "similar_part_number", "similarity_score"];

/// Map from lowercased header name to column index
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_lowercase().trim().to_string(), i))
        .collect()
}

/// Get a field value from a CSV record; blank cells become None
fn get_field(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<String> {
    header_map
        .get(field)
        .and_then(|&i| record.get(i))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

fn load_table<T>(
    dir: &Path,
    file: &'static str,
    required: &[&'static str],
    from_record: impl Fn(&StringRecord, &HashMap<String, usize>) -> T,
) -> Result<Vec<T>, LoadError> {
    let path = dir.join(file);
    if !path.exists() {
        return Err(LoadError::MissingTable { path });
    }

    let handle = File::open(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(handle));

    let table = table_name(file);
    let headers = rdr
        .headers()
        .map_err(|source| LoadError::Csv { table, source })?
        .clone();
    let header_map = build_header_map(&headers);

    for column in required {
        if !header_map.contains_key(*column) {
            return Err(LoadError::MissingColumn { table, column });
        }
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|source| LoadError::Csv { table, source })?;
        rows.push(from_record(&record, &header_map));
    }
    Ok(rows)
}

fn table_name(file: &'static str) -> &'static str {
    match file {
        ORDERS_FILE => "orders",
        INSPECTIONS_FILE => "inspections",
        RFQ_FILE => "rfq_responses",
        DRAWER_META_FILE => "drawer_metadata",
        DRAWER_SIMILARITY_FILE => "drawer_similarity",
        other => other,
    }
}

fn raw_order(record: &StringRecord, map: &HashMap<String, usize>) -> RawOrder {
    RawOrder {
        order_id: get_field(record, map, "order_id"),
        part_number: get_field(record, map, "part_number"),
        part_description: get_field(record, map, "part_description"),
        supplier_name: get_field(record, map, "supplier_name"),
        quantity: get_field(record, map, "quantity"),
        unit_price: get_field(record, map, "unit_price"),
        order_date: get_field(record, map, "order_date"),
        promised_date: get_field(record, map, "promised_date"),
        actual_delivery_date: get_field(record, map, "actual_delivery_date"),
    }
}

fn raw_inspection(record: &StringRecord, map: &HashMap<String, usize>) -> RawInspection {
    RawInspection {
        order_id: get_field(record, map, "order_id"),
        inspection_date: get_field(record, map, "inspection_date"),
        parts_inspected: get_field(record, map, "parts_inspected"),
        parts_rejected: get_field(record, map, "parts_rejected"),
        rejection_reason: get_field(record, map, "rejection_reason"),
    }
}

fn raw_rfq(record: &StringRecord, map: &HashMap<String, usize>) -> RawRfqResponse {
    RawRfqResponse {
        supplier_name: get_field(record, map, "supplier_name"),
        part_description: get_field(record, map, "part_description"),
        quote_date: get_field(record, map, "quote_date"),
        quoted_price: get_field(record, map, "quoted_price"),
    }
}

fn raw_drawer_meta(record: &StringRecord, map: &HashMap<String, usize>) -> RawDrawerMetadata {
    RawDrawerMetadata {
        part_number: get_field(record, map, "part_number"),
        part_description: get_field(record, map, "part_description"),
        complexity_proxy: get_field(record, map, "complexity_proxy"),
        material: get_field(record, map, "material"),
        tightest_tolerance_mm: get_field(record, map, "tightest_tolerance_mm"),
    }
}

fn raw_similarity_edge(record: &StringRecord, map: &HashMap<String, usize>) -> RawSimilarityEdge {
    RawSimilarityEdge {
        source_part_number: get_field(record, map, "source_part_number"),
        similar_part_number: get_field(record, map, "similar_part_number"),
        similarity_score: get_field(record, map, "similarity_score"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_minimal_tables(dir: &Path) {
        fs::write(
            dir.join(ORDERS_FILE),
            "order_id,part_number,part_description,supplier_name,quantity,unit_price,order_date,promised_date,actual_delivery_date\n\
             PO-1,HX-100,Plate,Acme Inc.,10,12.50,2024-01-02,2024-02-01,2024-02-08\n",
        )
        .unwrap();
        fs::write(
            dir.join(INSPECTIONS_FILE),
            "order_id,inspection_date,parts_inspected,parts_rejected,rejection_reason\n\
             PO-1,2024-02-10,100,4,Burrs\n",
        )
        .unwrap();
        fs::write(
            dir.join(RFQ_FILE),
            "supplier_name,part_description,quote_date,quoted_price\n\
             Vega Corp,Plate,2024-03-01,14.00\n",
        )
        .unwrap();
        fs::write(
            dir.join(DRAWER_META_FILE),
            "part_number,part_description,complexity_proxy,material\nHX-100,Plate,6,Aluminum\n",
        )
        .unwrap();
        fs::write(
            dir.join(DRAWER_SIMILARITY_FILE),
            "source_part_number,similar_part_number,similarity_score\nHX-100,HX-110,0.97\n",
        )
        .unwrap();
    }

    #[test]
    fn test_load_dir_reads_all_tables() {
        let tmp = tempdir().unwrap();
        write_minimal_tables(tmp.path());

        let raw = load_dir(tmp.path()).unwrap();
        assert_eq!(raw.orders.len(), 1);
        assert_eq!(raw.inspections.len(), 1);
        assert_eq!(raw.rfqs.len(), 1);
        assert_eq!(raw.drawer_meta.len(), 1);
        assert_eq!(raw.similarity_edges.len(), 1);

        assert_eq!(raw.orders[0].order_id.as_deref(), Some("PO-1"));
        assert_eq!(raw.drawer_meta[0].material.as_deref(), Some("Aluminum"));
        assert_eq!(raw.similarity_edges[0].similarity_score.as_deref(), Some("0.97"));
    }

    #[test]
    fn test_missing_table_is_fatal() {
        let tmp = tempdir().unwrap();
        write_minimal_tables(tmp.path());
        fs::remove_file(tmp.path().join(RFQ_FILE)).unwrap();

        let err = load_dir(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingTable { .. }));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let tmp = tempdir().unwrap();
        write_minimal_tables(tmp.path());
        fs::write(
            tmp.path().join(DRAWER_SIMILARITY_FILE),
            "source_part_number,similar_part_number\nHX-100,HX-110\n",
        )
        .unwrap();

        let err = load_dir(tmp.path()).unwrap_err();
        match err {
            LoadError::MissingColumn { table, column } => {
                assert_eq!(table, "drawer_similarity");
                assert_eq!(column, "similarity_score");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_cells_become_none() {
        let tmp = tempdir().unwrap();
        write_minimal_tables(tmp.path());
        fs::write(
            tmp.path().join(ORDERS_FILE),
            "order_id,part_number,part_description,supplier_name,quantity,unit_price,order_date,promised_date,actual_delivery_date\n\
             PO-1,HX-100,Plate,,10,,2024-01-02,2024-02-01,\n",
        )
        .unwrap();

        let raw = load_dir(tmp.path()).unwrap();
        let order = &raw.orders[0];
        assert_eq!(order.supplier_name, None);
        assert_eq!(order.unit_price, None);
        assert_eq!(order.actual_delivery_date, None);
    }

    #[test]
    fn test_headers_matched_case_insensitively() {
        let tmp = tempdir().unwrap();
        write_minimal_tables(tmp.path());
        fs::write(
            tmp.path().join(DRAWER_SIMILARITY_FILE),
            "Source_Part_Number,Similar_Part_Number,Similarity_Score\nHX-100,HX-110,0.97\n",
        )
        .unwrap();

        let raw = load_dir(tmp.path()).unwrap();
        assert_eq!(raw.similarity_edges[0].source_part_number.as_deref(), Some("HX-100"));
    }
}
