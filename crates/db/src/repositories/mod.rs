//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod asset_repo;
pub mod generation_job_repo;
pub mod model_repo;
pub mod training_job_repo;
pub mod user_repo;

pub use asset_repo::AssetRepo;
pub use generation_job_repo::GenerationJobRepo;
pub use model_repo::ModelRepo;
pub use training_job_repo::TrainingJobRepo;
pub use user_repo::UserRepo;
