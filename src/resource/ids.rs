//! Composite identifiers
//!
//! Relationship resources have no identity of their own; they are addressed
//! by a colon-joined pair of the owning entity IDs.

use crate::error::{Error, Result};

/// Encode a two-part identifier.
pub fn combine_id(left: &str, right: &str) -> String {
    format!("{left}:{right}")
}

/// Decode a two-part identifier.
///
/// Requires exactly two non-empty colon-separated segments; the error names
/// the expected pattern using the given segment names.
pub fn split_id(id: &str, left_name: &str, right_name: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = id.split(':').collect();

    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(Error::InvalidId {
            id: id.to_string(),
            expected: format!("{left_name}:{right_name}"),
        });
    }

    Ok((parts[0].to_string(), parts[1].to_string()))
}
