//! Topology graph builder.
//!
//! Derives the directed reachability edge list from the fetched security
//! groups: nodes are groups plus the synthetic public-internet node and one
//! synthetic node per distinct non-public CIDR literal. The edge list is
//! recomputed on every render call; nothing here is cached or mutated.

use crate::models::SecurityGroupRecord;
use crate::processing::AttachmentIndex;
use std::collections::HashSet;

/// A node of the reachability graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A fetched security group, by id.
    Group(String),
    /// The public internet (0.0.0.0/0 and friends).
    Internet,
    /// A scoped network, one node per distinct CIDR literal.
    Cidr(String),
}

/// One directed edge with its display label.
#[derive(Debug, Clone)]
pub struct Edge {
    pub source: Node,
    pub target: Node,
    /// Protocol and port text, e.g. "tcp Port 443".
    pub label: String,
    /// Attachment summary of the peer endpoint, when non-empty.
    pub note: Option<String>,
}

/// Whether a CIDR counts as "public internet".
///
/// Matches any CIDR beginning `0.0.0.0`, not only the default route, so
/// `0.0.0.1/32` also classifies as public. This mirrors the established
/// report output; changing it would reshuffle existing diagrams.
pub fn is_public_cidr(cidr: &str) -> bool {
    cidr == "0.0.0.0/0" || cidr.starts_with("0.0.0.0")
}

/// Build the full edge list: an ingress pass and an egress pass per group
/// per rule.
///
/// Peer-group references that do not resolve against the fetched set are
/// dropped silently (cross-account or cross-region peers).
pub fn build_edges(
    groups: &[SecurityGroupRecord],
    attachments: &AttachmentIndex,
) -> Vec<Edge> {
    let known_ids: HashSet<&str> = groups.iter().map(|g| g.group_id.as_str()).collect();

    let mut edges = Vec::new();
    for group in groups {
        let group_node = Node::Group(group.group_id.clone());

        // Ingress pass: sources point at this group.
        for rule in &group.ingress {
            let label = rule.traffic_label();
            for range in &rule.ip_ranges {
                edges.push(Edge {
                    source: cidr_node(&range.cidr_ip),
                    target: group_node.clone(),
                    label: label.clone(),
                    note: None,
                });
            }
            for pair in &rule.group_pairs {
                let Some(peer_id) = pair.group_id.as_deref() else {
                    continue;
                };
                if !known_ids.contains(peer_id) {
                    continue;
                }
                edges.push(Edge {
                    source: Node::Group(peer_id.to_string()),
                    target: group_node.clone(),
                    label: label.clone(),
                    note: attachments.summary(peer_id),
                });
            }
        }

        // Egress pass: this group points at its destinations.
        for rule in &group.egress {
            let label = rule.traffic_label();
            for range in &rule.ip_ranges {
                edges.push(Edge {
                    source: group_node.clone(),
                    target: cidr_node(&range.cidr_ip),
                    label: label.clone(),
                    note: None,
                });
            }
            for pair in &rule.group_pairs {
                let Some(peer_id) = pair.group_id.as_deref() else {
                    continue;
                };
                if !known_ids.contains(peer_id) {
                    continue;
                }
                edges.push(Edge {
                    source: group_node.clone(),
                    target: Node::Group(peer_id.to_string()),
                    label: label.clone(),
                    note: attachments.summary(peer_id),
                });
            }
        }
    }
    edges
}

fn cidr_node(cidr: &str) -> Node {
    if is_public_cidr(cidr) {
        Node::Internet
    } else {
        Node::Cidr(cidr.to_string())
    }
}
