//! Domain logic for the StudioNOVA dashboard backend.
//!
//! Everything here is independent of the HTTP layer, the database and the
//! worker transport: identifiers, the error taxonomy, slug and dataset path
//! derivation, request validation, generation defaults and file access rules.

pub mod dataset;
pub mod error;
pub mod file_access;
pub mod generation;
pub mod model;
pub mod types;
