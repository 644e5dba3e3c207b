//! Key conventions.
//!
//! Pure string functions. These define the derived answer keys used by the
//! engine and the canonical layout of uploaded pictures in object storage.

/// Suffix appended to a `select_parent` id to address its inline child answer.
pub const CHILD_SUFFIX: &str = "_child";

pub fn child_answer(parent_id: &str) -> String {
    format!("{parent_id}{CHILD_SUFFIX}")
}

/// Returns the parent id when `key` addresses an inline child answer.
pub fn parent_of_child(key: &str) -> Option<&str> {
    key.strip_suffix(CHILD_SUFFIX)
}

pub const PICTURES_PREFIX: &str = "pictures/";

pub fn picture_object(form_id: i64, question_id: &str, attachment_id: &str, file_name: &str) -> String {
    format!(
        "{PICTURES_PREFIX}{form_id}/{question_id}/{attachment_id}-{}",
        sanitize_file_name(file_name)
    )
}

/// Keep object keys URL-safe: anything outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "picture".to_string()
    } else {
        cleaned
    }
}
