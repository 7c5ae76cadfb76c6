//! Location paths inside a parsed document
//!
//! Findings point at the value they are about with a dotted/bracketed path:
//! - `definition.actions.Compose.inputs` (object keys)
//! - `body.items[2].inputs` (array index)
//! - `[0].inputs` (array at the document root)
//!
//! Paths are built while walking, so they mirror traversal order. Keys that
//! themselves contain `.` or `[` are not escaped.

/// Path of an object member, given the path of its parent
pub fn child_field(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Path of an array element, given the path of its parent
pub fn child_index(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index)
}
