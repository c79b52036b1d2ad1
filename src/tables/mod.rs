//! Input table row types
//!
//! One module per source table:
//! - [`Order`] - purchase order lines from supplier_orders.csv
//! - [`Inspection`] - incoming quality inspections from quality_inspections.csv
//! - [`RfqResponse`] - supplier quotations from rfq_responses.csv
//! - [`DrawerMetadata`] / [`SimilarityEdge`] - the geometric intelligence
//!   layer from drawer_metadata.csv and drawer_similarity.csv
//!
//! Each table has a `Raw*` form (untyped strings straight out of CSV) and a
//! built form with parsed dates, coerced numbers, and derived fields. The
//! dataset builder owns the raw-to-built conversion; built rows are never
//! mutated afterwards.

pub mod drawer;
pub mod inspection;
pub mod order;
pub mod rfq;

pub use drawer::{DrawerMetadata, RawDrawerMetadata, RawSimilarityEdge, SimilarityEdge};
pub use inspection::{Inspection, RawInspection};
pub use order::{Order, RawOrder};
pub use rfq::{RawRfqResponse, RfqResponse};

/// The five source tables in raw form, as handed to the dataset builder
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub orders: Vec<RawOrder>,
    pub inspections: Vec<RawInspection>,
    pub rfqs: Vec<RawRfqResponse>,
    pub drawer_meta: Vec<RawDrawerMetadata>,
    pub similarity_edges: Vec<RawSimilarityEdge>,
}
