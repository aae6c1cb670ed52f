//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or an open connection) as the first argument.

pub mod project_image_repo;
pub mod project_repo;

pub use project_image_repo::ProjectImageRepo;
pub use project_repo::ProjectRepo;
