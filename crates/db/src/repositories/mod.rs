//! Table repositories: stateless unit structs, one per table.

pub mod concept_repo;
pub mod thumbnail_repo;
pub mod uploaded_image_repo;
pub mod usage_log_repo;
pub mod user_profile_repo;

pub use concept_repo::ConceptRepo;
pub use thumbnail_repo::ThumbnailRepo;
pub use uploaded_image_repo::UploadedImageRepo;
pub use usage_log_repo::UsageLogRepo;
pub use user_profile_repo::UserProfileRepo;
