//! Row models and create DTOs, one module per table.

pub mod concept;
pub mod image;
pub mod thumbnail;
pub mod usage_log;
pub mod user_profile;
