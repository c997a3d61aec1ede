//! Upload validation: MIME allow-list, size ceiling, and batch bounds.
//!
//! Ceilings come from [`UploadLimits`], read from the environment at startup,
//! so deployments can tune them without a rebuild.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// MIME types accepted for reference-photo uploads.
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Default per-file size ceiling in MiB (`MAX_UPLOAD_SIZE_MB`).
pub const DEFAULT_MAX_UPLOAD_SIZE_MB: u64 = 10;

/// Default batch-count ceiling (`MAX_IMAGES_PER_BATCH`).
pub const DEFAULT_MAX_IMAGES_PER_BATCH: usize = 20;

/// Minimum reference photos per upload request.
pub const MIN_UPLOAD_IMAGES: usize = 3;

/// Maximum reference photos per upload request (also the generation
/// reference-set cap).
pub const MAX_UPLOAD_IMAGES: usize = 5;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Configured upload ceilings.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    /// Per-file size ceiling in bytes.
    pub max_file_bytes: u64,
    /// Batch-count ceiling.
    pub max_images_per_batch: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            max_images_per_batch: DEFAULT_MAX_IMAGES_PER_BATCH,
        }
    }
}

impl UploadLimits {
    /// Load ceilings from the environment with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `MAX_UPLOAD_SIZE_MB`   | `10`    |
    /// | `MAX_IMAGES_PER_BATCH` | `20`    |
    pub fn from_env() -> Self {
        let max_mb: u64 = std::env::var("MAX_UPLOAD_SIZE_MB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);

        let max_batch: usize = std::env::var("MAX_IMAGES_PER_BATCH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_IMAGES_PER_BATCH);

        Self {
            max_file_bytes: max_mb * 1024 * 1024,
            max_images_per_batch: max_batch,
        }
    }

    /// The size ceiling expressed in whole MiB, for error messages.
    pub fn max_file_mb(&self) -> u64 {
        self.max_file_bytes / (1024 * 1024)
    }
}

// ---------------------------------------------------------------------------
// Single-file validation
// ---------------------------------------------------------------------------

/// Validate one candidate file's declared MIME type and byte size.
pub fn validate_image_file(
    mime_type: &str,
    size_bytes: u64,
    limits: &UploadLimits,
) -> Result<(), CoreError> {
    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(CoreError::Validation(format!(
            "Invalid file type '{mime_type}'. Allowed: {}",
            ALLOWED_MIME_TYPES.join(", ")
        )));
    }

    if size_bytes > limits.max_file_bytes {
        return Err(CoreError::Validation(format!(
            "File too large. Maximum size: {}MB",
            limits.max_file_mb()
        )));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Batch validation
// ---------------------------------------------------------------------------

/// Validate a whole batch of `(mime_type, size_bytes)` candidates.
///
/// The count ceiling is checked before any per-file check; after that the
/// single-file check runs on every member and fails fast with the first
/// violation's message.
pub fn validate_image_batch(
    files: &[(&str, u64)],
    limits: &UploadLimits,
) -> Result<(), CoreError> {
    if files.len() > limits.max_images_per_batch {
        return Err(CoreError::Validation(format!(
            "Too many files. Maximum: {} images",
            limits.max_images_per_batch
        )));
    }

    for (mime_type, size_bytes) in files {
        validate_image_file(mime_type, *size_bytes, limits)?;
    }

    Ok(())
}

/// Validate the reference-set bounds on an upload request (3..=5 files).
///
/// Applies to both raw-bytes and pre-uploaded-reference submissions, before
/// any storage or database call.
pub fn validate_upload_count(count: usize) -> Result<(), CoreError> {
    if !(MIN_UPLOAD_IMAGES..=MAX_UPLOAD_IMAGES).contains(&count) {
        return Err(CoreError::Validation(format!(
            "Please upload between {MIN_UPLOAD_IMAGES}-{MAX_UPLOAD_IMAGES} images"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn limits() -> UploadLimits {
        UploadLimits::default()
    }

    #[test]
    fn accepts_allowed_mime_types_under_ceiling() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(validate_image_file(mime, 1024, &limits()).is_ok());
        }
    }

    #[test]
    fn rejects_disallowed_mime_type() {
        let err = validate_image_file("image/gif", 1024, &limits()).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("image/gif"));
    }

    #[test]
    fn rejects_oversized_file() {
        let too_big = limits().max_file_bytes + 1;
        let err = validate_image_file("image/png", too_big, &limits()).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("10MB"));
    }

    #[test]
    fn accepts_file_exactly_at_ceiling() {
        let at_limit = limits().max_file_bytes;
        assert!(validate_image_file("image/jpeg", at_limit, &limits()).is_ok());
    }

    #[test]
    fn batch_count_ceiling_checked_before_per_file() {
        // 21 invalid files: the count violation must win.
        let files: Vec<(&str, u64)> = (0..21).map(|_| ("image/gif", 1)).collect();
        let err = validate_image_batch(&files, &limits()).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Too many files"));
    }

    #[test]
    fn batch_fails_fast_with_first_violation_message() {
        let files = vec![
            ("image/png", 10u64),
            ("text/plain", 10u64),
            ("image/bmp", 10u64),
        ];
        let err = validate_image_batch(&files, &limits()).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("text/plain"));
    }

    #[test]
    fn upload_count_bounds_are_inclusive() {
        assert!(validate_upload_count(2).is_err());
        assert!(validate_upload_count(3).is_ok());
        assert!(validate_upload_count(5).is_ok());
        assert!(validate_upload_count(6).is_err());
    }
}
