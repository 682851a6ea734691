//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument and return `AppResult`. Ownership is
//! enforced inside the queries: user-scoped reads and writes filter on the
//! caller's id, so a row the caller cannot see behaves as absent.

pub mod admin_repo;
pub mod profile_repo;
pub mod project_repo;
pub mod prompt_repo;
pub mod public_repo;
pub mod segment_repo;
pub mod validator_repo;

pub use admin_repo::AdminRepo;
pub use profile_repo::ProfileRepo;
pub use project_repo::ProjectRepo;
pub use prompt_repo::PromptRepo;
pub use public_repo::PublicRepo;
pub use segment_repo::SegmentRepo;
pub use validator_repo::ValidatorRepo;
