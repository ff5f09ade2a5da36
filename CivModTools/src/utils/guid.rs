//! GUID helpers
//!
//! Descriptor GUIDs compare case-insensitively. The canonical textual form is
//! lowercase, hyphenated and brace-wrapped: `{0d66d522-b624-4bc5-acfe-15a0c5b729f4}`.

use std::borrow::Cow;

use uuid::Uuid;

/// Canonicalize a GUID string, or `None` if it is not a GUID.
///
/// Accepts braced, hyphenated and simple forms in any case.
#[must_use]
pub fn canonical_guid(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Uuid::parse_str(trimmed)
        .ok()
        .map(|uuid| uuid.braced().to_string())
}

/// The form a writer emits: canonical when `value` is a GUID, verbatim otherwise.
#[must_use]
pub fn render_guid(value: &str) -> Cow<'_, str> {
    canonical_guid(value).map_or(Cow::Borrowed(value), Cow::Owned)
}

/// Whether `value` has GUID shape.
#[must_use]
pub fn is_guid(value: &str) -> bool {
    canonical_guid(value).is_some()
}

/// Generate a fresh random GUID in canonical form.
#[must_use]
pub fn new_guid() -> String {
    Uuid::new_v4().braced().to_string()
}
