//! Input ingestion for registry reconciliation.
//!
//! # Features
//!
//! - **Header Detection**: locate the real header row of a registry sheet by
//!   keyword counting
//! - **Registry Loading**: slice the data body and build normalized
//!   [`RegistryCandidate`](regcheck_model::RegistryCandidate)s from fixed
//!   column letters
//! - **Customer Schema**: fail fast when a required customer column is
//!   missing, then build [`CustomerRecord`](regcheck_model::CustomerRecord)s
//! - **File Readers**: CSV and JSON readers for matrices and customer rows
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use regcheck_ingest::{RegistryTableLoader, load_registry};
//!
//! let matrix = load_registry(Path::new("data/extremadura.csv"), None)?;
//! let loader = RegistryTableLoader::new(&config.columns, &config.header, &normalizer);
//! let loaded = loader.load(&matrix);
//! ```

mod customer;
mod error;
mod header;
mod matrix;
mod registry;

// === Error Types ===
pub use error::{IngestError, Result};

// === Registry Sources ===
pub use header::{HeaderDetection, detect_header};
pub use registry::{LoadedRegistry, RegistryTableLoader, authorization_date};

// === Customers ===
pub use customer::{ResolvedColumns, build_customer_records, resolve_columns};

// === File Readers ===
pub use matrix::{load_registry, read_customers, read_matrix};

// === Column Letters ===
pub use regcheck_model::column_index;
