//! Full Markdown report rendering.
//!
//! Fixed section order: summary, topology diagram, NACL overview diagram,
//! per-group details in fetch order, per-NACL details in fetch order.

use crate::collect::Inventory;
use crate::output::mermaid::{nacl_overview_diagram, security_groups_diagram};
use crate::processing::AttachmentIndex;

pub fn full_report(inventory: &Inventory, attachments: &AttachmentIndex) -> String {
    let mut report: Vec<String> = Vec::new();

    report.push("# AWS Security Groups and NACLs Visualization".to_string());
    report.push(format!(
        "\nGenerated: {}",
        inventory.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    report.push(format!("Region: {}", inventory.region));
    report.push("\n## Summary".to_string());
    report.push(format!("- VPCs: {}", inventory.vpcs.len()));
    report.push(format!("- Security Groups: {}", inventory.security_groups.len()));
    report.push(format!("- Network ACLs: {}", inventory.nacls.len()));

    report.push("\n## Security Groups Overview".to_string());
    report.push(security_groups_diagram(inventory, attachments));

    report.push("\n## Network ACLs Overview".to_string());
    report.push(nacl_overview_diagram(inventory));

    report.push("\n## Security Groups Details".to_string());
    for group in &inventory.security_groups {
        report.push(format!("\n### {} ({})", group.group_name, group.group_id));
        report.push(format!(
            "- VPC: {}",
            group.vpc_id.as_deref().unwrap_or("N/A")
        ));
        report.push(format!("- Description: {}", group.description));
        if let Some(summary) = attachments.summary(&group.group_id) {
            report.push(format!("- Attached: {summary}"));
        }

        report.push("\n**Ingress Rules:**".to_string());
        for rule in &group.ingress {
            for range in &rule.ip_ranges {
                report.push(format!(
                    "  - Allow {label} from {cidr}",
                    label = rule.traffic_label(),
                    cidr = range.cidr_ip
                ));
            }
            for pair in &rule.group_pairs {
                let Some(peer_id) = pair.group_id.as_deref() else {
                    continue;
                };
                report.push(peer_line(inventory, attachments, rule, peer_id, "from"));
            }
        }

        report.push("\n**Egress Rules:**".to_string());
        for rule in &group.egress {
            for range in &rule.ip_ranges {
                report.push(format!(
                    "  - Allow {label} to {cidr}",
                    label = rule.traffic_label(),
                    cidr = range.cidr_ip
                ));
            }
            for pair in &rule.group_pairs {
                let Some(peer_id) = pair.group_id.as_deref() else {
                    continue;
                };
                report.push(peer_line(inventory, attachments, rule, peer_id, "to"));
            }
        }
    }

    report.push("\n## Network ACLs Details".to_string());
    for nacl in &inventory.nacls {
        let name = if nacl.is_default {
            "Default NACL".to_string()
        } else {
            nacl.network_acl_id.clone()
        };
        report.push(format!("\n### {} ({})", name, nacl.network_acl_id));
        report.push(format!("- VPC: {}", nacl.vpc_id.as_deref().unwrap_or("N/A")));
        report.push(format!("- Default: {}", nacl.is_default));

        report.push("\n**Ingress Rules:**".to_string());
        for entry in nacl.ingress_entries() {
            report.push(nacl_line(entry, "from"));
        }

        report.push("\n**Egress Rules:**".to_string());
        for entry in nacl.egress_entries() {
            report.push(nacl_line(entry, "to"));
        }
    }

    report.join("\n")
}

/// One peer-reference report line, annotated with the peer's name (when
/// fetched) and its attachment summary (when non-empty).
fn peer_line(
    inventory: &Inventory,
    attachments: &AttachmentIndex,
    rule: &crate::models::Rule,
    peer_id: &str,
    direction: &str,
) -> String {
    let peer_name = inventory
        .group(peer_id)
        .map(|g| g.group_name.as_str())
        .unwrap_or(peer_id);
    let mut line = format!(
        "  - Allow {label} {direction} SG: {peer_name} ({peer_id})",
        label = rule.traffic_label()
    );
    if let Some(summary) = attachments.summary(peer_id) {
        line.push_str(&format!(" [{summary}]"));
    }
    line
}

fn nacl_line(entry: &crate::models::NaclEntry, direction: &str) -> String {
    format!(
        "  - Rule {num}: {action} {protocol} {ports} {direction} {cidr}",
        num = entry.rule_number,
        action = entry.action_label(),
        protocol = entry.protocol,
        ports = entry.port_label(),
        cidr = entry.cidr_block.as_deref().unwrap_or("N/A")
    )
}
