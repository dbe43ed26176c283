pub mod assets;
pub mod datasets;
pub mod files;
pub mod generation;
pub mod jobs;
pub mod models;
pub mod training;
