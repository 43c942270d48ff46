//! Delivery-note ingestion: scanned documents persisted as a parent row plus
//! line items. Structurally unrelated to pricing; nothing here feeds the
//! quote engine.

pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;

pub use routes::router;
