//! Attachment index: security-group id → attached components.

use crate::collect::CollectedComponent;
use crate::models::{Component, ComponentKind};
use itertools::Itertools;
use std::collections::HashMap;

/// Mapping from security-group id to the components bound to it, in
/// discovery order. A group with no attachments is simply absent.
#[derive(Debug, Default)]
pub struct AttachmentIndex {
    by_group: HashMap<String, Vec<Component>>,
}

impl AttachmentIndex {
    /// Build the index from the collected component set. A component
    /// declaring several groups appears once under each of them.
    pub fn build(components: &[CollectedComponent]) -> Self {
        let mut by_group: HashMap<String, Vec<Component>> = HashMap::new();
        for item in components {
            for group_id in &item.security_groups {
                by_group
                    .entry(group_id.clone())
                    .or_default()
                    .push(item.component.clone());
            }
        }
        AttachmentIndex { by_group }
    }

    /// Components attached to `group_id`, in discovery order.
    pub fn components(&self, group_id: &str) -> &[Component] {
        self.by_group
            .get(group_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Human summary of a group's attachments, grouped by kind: the first
    /// name per kind plus a "+N more" suffix when a kind has several.
    ///
    /// Returns `None` when nothing is attached; callers omit the
    /// annotation entirely in that case.
    pub fn summary(&self, group_id: &str) -> Option<String> {
        let components = self.by_group.get(group_id)?;
        if components.is_empty() {
            return None;
        }

        // Kinds in first-seen order, names per kind in discovery order.
        let mut kind_order: Vec<ComponentKind> = Vec::new();
        let mut by_kind: HashMap<ComponentKind, Vec<&str>> = HashMap::new();
        for component in components {
            if !by_kind.contains_key(&component.kind) {
                kind_order.push(component.kind);
            }
            by_kind.entry(component.kind).or_default().push(&component.name);
        }

        let summary = kind_order
            .iter()
            .map(|kind| {
                let names = &by_kind[kind];
                if names.len() > 1 {
                    format!("{}: {} (+{} more)", kind.label(), names[0], names.len() - 1)
                } else {
                    format!("{}: {}", kind.label(), names[0])
                }
            })
            .join(", ");
        Some(summary)
    }
}
