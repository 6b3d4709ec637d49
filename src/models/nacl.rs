//! Network ACL data model.

use crate::output::format::range_label;
use serde::{Deserialize, Serialize};

/// Represents a network ACL as returned by `ec2 describe-network-acls`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct NaclRecord {
    /// NACL identifier (`acl-...`).
    pub network_acl_id: String,
    /// Owning VPC.
    #[serde(default)]
    pub vpc_id: Option<String>,
    /// Whether this is the VPC's default NACL.
    #[serde(default)]
    pub is_default: bool,
    /// Numbered entries, ingress and egress mixed, in API order.
    #[serde(default)]
    pub entries: Vec<NaclEntry>,
}

/// One numbered entry of a network ACL.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct NaclEntry {
    pub rule_number: i64,
    #[serde(default = "all_protocols")]
    pub protocol: String,
    /// "allow" or "deny".
    pub rule_action: String,
    #[serde(default)]
    pub cidr_block: Option<String>,
    /// True for egress entries, false for ingress.
    #[serde(default)]
    pub egress: bool,
    #[serde(default)]
    pub port_range: Option<NaclPortRange>,
}

fn all_protocols() -> String {
    "-1".to_string()
}

/// Optional port range of a NACL entry.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct NaclPortRange {
    #[serde(default)]
    pub from: Option<i64>,
    #[serde(default)]
    pub to: Option<i64>,
}

impl NaclRecord {
    /// Display name: "Default" for the VPC default NACL, else the id.
    pub fn display_name(&self) -> &str {
        if self.is_default {
            "Default"
        } else {
            &self.network_acl_id
        }
    }

    /// Ingress entries sorted ascending by rule number.
    ///
    /// The sort is stable, so entries sharing a rule number keep their
    /// fetch order.
    pub fn ingress_entries(&self) -> Vec<&NaclEntry> {
        self.direction_entries(false)
    }

    /// Egress entries sorted ascending by rule number.
    pub fn egress_entries(&self) -> Vec<&NaclEntry> {
        self.direction_entries(true)
    }

    fn direction_entries(&self, egress: bool) -> Vec<&NaclEntry> {
        let mut entries: Vec<&NaclEntry> =
            self.entries.iter().filter(|e| e.egress == egress).collect();
        entries.sort_by_key(|e| e.rule_number);
        entries
    }
}

impl NaclEntry {
    /// Human label for the entry's port range.
    pub fn port_label(&self) -> String {
        match &self.port_range {
            Some(range) => range_label(range.from, range.to),
            None => "All Ports".to_string(),
        }
    }

    /// "ALLOW" or "DENY" for report lines.
    pub fn action_label(&self) -> &'static str {
        if self.rule_action == "allow" {
            "ALLOW"
        } else {
            "DENY"
        }
    }
}
