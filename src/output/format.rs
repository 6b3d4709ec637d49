//! Label formatting helpers shared by the renderers.

/// Format a security-group rule's port range.
///
/// Protocol `"-1"` (all protocols) and any missing bound both render as
/// "All Ports"; equal bounds render a single port; otherwise a range.
pub fn port_label(protocol: &str, from_port: Option<i64>, to_port: Option<i64>) -> String {
    if protocol == "-1" {
        return "All Ports".to_string();
    }
    range_label(from_port, to_port)
}

/// Format a bare port range (used for NACL entries, which carry no
/// protocol shortcut in their range).
pub fn range_label(from_port: Option<i64>, to_port: Option<i64>) -> String {
    match (from_port, to_port) {
        (Some(from), Some(to)) if from == to => format!("Port {from}"),
        (Some(from), Some(to)) => format!("Ports {from}-{to}"),
        _ => "All Ports".to_string(),
    }
}

/// Derive a Mermaid node identifier from a resource id or CIDR.
///
/// Mermaid identifiers cannot contain `-`, `.` or `/`, so every
/// non-alphanumeric character maps to `_`.
pub fn mermaid_id(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
