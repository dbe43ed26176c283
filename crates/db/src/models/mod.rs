//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `New*` insert DTO carrying the fields the caller supplies

pub mod asset;
pub mod generation_job;
pub mod model;
pub mod training_job;
pub mod user;
