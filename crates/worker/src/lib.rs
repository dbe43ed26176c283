//! HTTP client for the StudioNOVA worker service.
//!
//! The worker owns LoRA training, image generation and upscaling. This
//! crate only builds requests, sends them, and turns the responses into
//! typed values or a [`api::WorkerApiError`]. It performs no persistence.

pub mod api;
pub mod config;
pub mod messages;

pub use api::{WorkerApi, WorkerApiError};
pub use config::WorkerConfig;
