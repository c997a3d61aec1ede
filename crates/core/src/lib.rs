//! Domain logic shared by every Thumbsmith crate.
//!
//! Pure types and functions only: validation rules, pricing tables, prompt
//! templates, model-output extraction, and batch bookkeeping. No I/O lives
//! here so the API and worker layers can be tested against it directly.

pub mod analysis;
pub mod batch;
pub mod concepts;
pub mod error;
pub mod extract;
pub mod pricing;
pub mod prompts;
pub mod types;
pub mod validation;
