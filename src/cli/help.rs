//! Per-node help visibility
//!
//! Subcommands in the `image` family do not write audit entries yet, so
//! `--audit-file` is left out of their help. The flag is still accepted there.

/// Namespace whose help omits `--audit-file`
// TODO: drop once the image subcommands write audit entries
pub const AUDIT_FILE_HIDDEN_IN: &str = "image";

/// True when the node `name` (child of `parent`) should not show `--audit-file`.
pub fn hides_audit_file(name: &str, parent: Option<&str>) -> bool {
    name == AUDIT_FILE_HIDDEN_IN || parent == Some(AUDIT_FILE_HIDDEN_IN)
}
