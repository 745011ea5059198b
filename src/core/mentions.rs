//! Role mention rendering for config and template views.

use crate::features::autorole::RoleId;

/// Shown for an empty live configuration
pub const NOT_CONFIGURED_PLACEHOLDER: &str = "Not Configured Yet";

/// Shown for an empty list inside a saved template
pub const NONE_PLACEHOLDER: &str = "None";

/// Render roles as Discord mentions (`<@&id>`) joined by ", ", or `fallback` when empty.
pub fn render_role_mentions(roles: &[RoleId], fallback: &str) -> String {
    if roles.is_empty() {
        return fallback.to_string();
    }
    roles
        .iter()
        .map(|id| format!("<@&{id}>"))
        .collect::<Vec<_>>()
        .join(", ")
}
