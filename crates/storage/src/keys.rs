//! Storage key construction.
//!
//! Keys are namespaced per user and carry a millisecond timestamp so
//! repeated uploads of the same file name never collide.

use uuid::Uuid;

/// Key for an uploaded reference photo: `{user_id}/{millis}-{file_name}`.
pub fn upload_key(user_id: Uuid, file_name: &str) -> String {
    format!(
        "{user_id}/{}-{}",
        chrono::Utc::now().timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

/// Key for a generated thumbnail:
/// `{user_id}/thumbnails/{millis}-{concept_number}.{extension}`.
pub fn thumbnail_key(user_id: Uuid, concept_number: i32, extension: &str) -> String {
    format!(
        "{user_id}/thumbnails/{}-{concept_number}.{extension}",
        chrono::Utc::now().timestamp_millis()
    )
}

/// Reduces a client-supplied file name to a safe key segment.
///
/// Path separators and anything outside `[A-Za-z0-9._-]` become `_`, and
/// leading dots are stripped so the segment can never be `..`.
fn sanitize_file_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}
