//! Mermaid diagram rendering.

use crate::collect::Inventory;
use crate::models::{NaclRecord, SecurityGroupRecord};
use crate::output::format::mermaid_id;
use crate::processing::{build_edges, AttachmentIndex, Node};
use std::collections::HashMap;

/// Render the security-group topology diagram: one subgraph per VPC with
/// the group nodes inside, followed by every derived reachability edge.
pub fn security_groups_diagram(inventory: &Inventory, attachments: &AttachmentIndex) -> String {
    let mut lines = vec!["```mermaid".to_string(), "graph TB".to_string()];

    // Groups per VPC; groups without a VPC fall under "default".
    let mut vpc_groups: HashMap<&str, Vec<&SecurityGroupRecord>> = HashMap::new();
    for group in &inventory.security_groups {
        let vpc_id = group.vpc_id.as_deref().unwrap_or("default");
        vpc_groups.entry(vpc_id).or_default().push(group);
    }

    // Fetched VPCs render in fetch order, empty subgraphs included; any
    // VPC id only seen on a group follows after.
    let mut vpc_order: Vec<&str> = inventory.vpcs.iter().map(|v| v.vpc_id.as_str()).collect();
    for group in &inventory.security_groups {
        let vpc_id = group.vpc_id.as_deref().unwrap_or("default");
        if !vpc_order.contains(&vpc_id) {
            vpc_order.push(vpc_id);
        }
    }

    for vpc_id in &vpc_order {
        let vpc_name = inventory
            .vpcs
            .iter()
            .find(|v| v.vpc_id == *vpc_id)
            .map(|v| v.display_name())
            .unwrap_or(vpc_id);
        lines.push(format!(
            "    subgraph VPC_{id}[\"VPC: {vpc_name}\"]",
            id = mermaid_id(vpc_id)
        ));
        for group in vpc_groups.get(vpc_id).map(Vec::as_slice).unwrap_or_default() {
            let mut label = format!(
                "SG: {name}<br/>{id}<br/>Ingress: {ingress} | Egress: {egress}",
                name = group.group_name,
                id = group.group_id,
                ingress = group.ingress.len(),
                egress = group.egress.len()
            );
            if let Some(summary) = attachments.summary(&group.group_id) {
                label.push_str(&format!("<br/>{summary}"));
            }
            lines.push(format!(
                "        SG_{id}[\"{label}\"]",
                id = mermaid_id(&group.group_id)
            ));
        }
        lines.push("    end".to_string());
    }

    let edges = build_edges(&inventory.security_groups, attachments);

    // Synthetic nodes, declared once in first-reference order.
    let mut declared: Vec<String> = Vec::new();
    for edge in &edges {
        for node in [&edge.source, &edge.target] {
            let declaration = match node {
                Node::Internet => "    PublicInternet([\"Public Internet\"])".to_string(),
                Node::Cidr(cidr) => {
                    format!("    CIDR_{id}[\"{cidr}\"]", id = mermaid_id(cidr))
                }
                Node::Group(_) => continue,
            };
            if !declared.contains(&declaration) {
                declared.push(declaration);
            }
        }
    }
    if !declared.is_empty() {
        lines.push(String::new());
        lines.extend(declared);
    }

    lines.push(String::new());
    lines.push("    %% Derived reachability edges".to_string());
    for edge in &edges {
        let mut label = edge.label.clone();
        if let Some(note) = &edge.note {
            label.push_str(&format!("<br/>{note}"));
        }
        lines.push(format!(
            "    {source} -->|\"{label}\"| {target}",
            source = node_ref(&edge.source),
            target = node_ref(&edge.target)
        ));
    }

    lines.push("```".to_string());
    lines.join("\n")
}

/// Render the NACL overview diagram: one subgraph per VPC, one node per
/// NACL with its ingress/egress entry counts.
pub fn nacl_overview_diagram(inventory: &Inventory) -> String {
    let mut lines = vec!["```mermaid".to_string(), "graph TB".to_string()];

    let mut vpc_nacls: HashMap<&str, Vec<&NaclRecord>> = HashMap::new();
    let mut vpc_order: Vec<&str> = Vec::new();
    for nacl in &inventory.nacls {
        let vpc_id = nacl.vpc_id.as_deref().unwrap_or("default");
        if !vpc_order.contains(&vpc_id) {
            vpc_order.push(vpc_id);
        }
        vpc_nacls.entry(vpc_id).or_default().push(nacl);
    }

    for vpc_id in &vpc_order {
        let vpc_name = inventory
            .vpcs
            .iter()
            .find(|v| v.vpc_id == *vpc_id)
            .map(|v| v.display_name())
            .unwrap_or(vpc_id);
        lines.push(format!(
            "    subgraph VPC_{id}[\"VPC: {vpc_name}\"]",
            id = mermaid_id(vpc_id)
        ));
        for nacl in &vpc_nacls[vpc_id] {
            lines.push(format!(
                "        NACL_{id}[\"NACL: {name}<br/>{acl_id}<br/>Ingress: {ingress} | Egress: {egress}\"]",
                id = mermaid_id(&nacl.network_acl_id),
                name = nacl.display_name(),
                acl_id = nacl.network_acl_id,
                ingress = nacl.ingress_entries().len(),
                egress = nacl.egress_entries().len()
            ));
        }
        lines.push("    end".to_string());
    }

    lines.push("```".to_string());
    lines.join("\n")
}

/// Result of the point-to-point flow renderer.
#[derive(Debug)]
pub enum FlowOutcome {
    /// The rendered sequence diagram.
    Diagram(String),
    /// One or both security-group ids were not in the fetched set.
    NotFound(Vec<String>),
}

/// Render the point-to-point flow between two security groups as a
/// sequence diagram.
///
/// Only the target's ingress rules are consulted: a rule matches when it
/// references the source group as a peer, or when it admits a public CIDR
/// (reachable from anywhere). Scoped CIDRs cannot be attributed to a
/// source group and do not match.
pub fn flow_diagram(inventory: &Inventory, source_id: &str, target_id: &str) -> FlowOutcome {
    let (source, target) = match (inventory.group(source_id), inventory.group(target_id)) {
        (Some(source), Some(target)) => (source, target),
        (source, target) => {
            let mut missing = Vec::new();
            if source.is_none() {
                missing.push(source_id.to_string());
            }
            if target.is_none() {
                missing.push(target_id.to_string());
            }
            return FlowOutcome::NotFound(missing);
        }
    };

    let mut lines = vec!["```mermaid".to_string(), "sequenceDiagram".to_string()];
    lines.push(format!(
        "    participant Source as \"{name}<br/>{id}\"",
        name = source.group_name,
        id = source.group_id
    ));
    lines.push(format!(
        "    participant Target as \"{name}<br/>{id}\"",
        name = target.group_name,
        id = target.group_id
    ));
    lines.push(String::new());

    let mut can_reach = false;
    for rule in &target.ingress {
        for pair in &rule.group_pairs {
            if pair.group_id.as_deref() == Some(source_id) {
                lines.push(format!("    Source->>Target: {}", rule.traffic_label()));
                can_reach = true;
            }
        }
        for range in &rule.ip_ranges {
            if crate::processing::is_public_cidr(&range.cidr_ip) {
                lines.push(format!(
                    "    Source->>Target: {label} (via {cidr})",
                    label = rule.traffic_label(),
                    cidr = range.cidr_ip
                ));
                can_reach = true;
            }
        }
    }

    if !can_reach {
        lines.push("    Source-->>Target: ❌ Blocked".to_string());
    }

    lines.push("```".to_string());
    FlowOutcome::Diagram(lines.join("\n"))
}

fn node_ref(node: &Node) -> String {
    match node {
        Node::Group(id) => format!("SG_{}", mermaid_id(id)),
        Node::Internet => "PublicInternet".to_string(),
        Node::Cidr(cidr) => format!("CIDR_{}", mermaid_id(cidr)),
    }
}
