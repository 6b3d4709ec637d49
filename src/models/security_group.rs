//! Security group data model.

use crate::output::format::port_label;
use serde::{Deserialize, Serialize};

/// Represents a security group as returned by `ec2 describe-security-groups`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct SecurityGroupRecord {
    /// Group identifier (`sg-...`).
    pub group_id: String,
    /// Group name as set at creation.
    pub group_name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Owning VPC (None for EC2-Classic era groups).
    #[serde(default)]
    pub vpc_id: Option<String>,
    /// Ingress rules, in API order.
    #[serde(default, rename = "IpPermissions")]
    pub ingress: Vec<Rule>,
    /// Egress rules, in API order.
    #[serde(default, rename = "IpPermissionsEgress")]
    pub egress: Vec<Rule>,
}

/// One allow entry within a security group.
///
/// `protocol` is the wire value: `"-1"` means all protocols. Absent
/// from/to ports mean "all ports" for the protocol.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Rule {
    #[serde(rename = "IpProtocol", default = "all_protocols")]
    pub protocol: String,
    #[serde(default)]
    pub from_port: Option<i64>,
    #[serde(default)]
    pub to_port: Option<i64>,
    /// CIDR sources (ingress) or destinations (egress).
    #[serde(default, rename = "IpRanges")]
    pub ip_ranges: Vec<IpRange>,
    /// Peer security-group references.
    #[serde(default, rename = "UserIdGroupPairs")]
    pub group_pairs: Vec<GroupPair>,
}

fn all_protocols() -> String {
    "-1".to_string()
}

/// One CIDR entry of a rule.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct IpRange {
    pub cidr_ip: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One peer security-group reference of a rule.
///
/// `group_id` may reference a group in another account or region, in
/// which case it will not resolve against the fetched set.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct GroupPair {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Rule {
    /// Human label for the rule's port range, e.g. "Port 443",
    /// "Ports 1024-65535" or "All Ports".
    pub fn port_label(&self) -> String {
        port_label(&self.protocol, self.from_port, self.to_port)
    }

    /// Protocol and port text used on diagram edge labels and report lines.
    pub fn traffic_label(&self) -> String {
        if self.protocol == "-1" {
            "All Ports".to_string()
        } else {
            format!("{} {}", self.protocol, self.port_label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(protocol: &str, from: Option<i64>, to: Option<i64>) -> Rule {
        Rule {
            protocol: protocol.to_string(),
            from_port: from,
            to_port: to,
            ip_ranges: vec![],
            group_pairs: vec![],
        }
    }

    #[test]
    fn test_all_protocols_is_all_ports_regardless_of_bounds() {
        assert_eq!(rule("-1", Some(80), Some(80)).port_label(), "All Ports");
        assert_eq!(rule("-1", None, None).port_label(), "All Ports");
    }

    #[test]
    fn test_single_port() {
        assert_eq!(rule("tcp", Some(443), Some(443)).port_label(), "Port 443");
    }

    #[test]
    fn test_port_range() {
        assert_eq!(
            rule("tcp", Some(1024), Some(65535)).port_label(),
            "Ports 1024-65535"
        );
    }

    #[test]
    fn test_missing_bound_is_all_ports() {
        assert_eq!(rule("tcp", None, Some(443)).port_label(), "All Ports");
        assert_eq!(rule("udp", Some(53), None).port_label(), "All Ports");
    }

    #[test]
    fn test_traffic_label_includes_protocol() {
        assert_eq!(rule("tcp", Some(443), Some(443)).traffic_label(), "tcp Port 443");
        assert_eq!(rule("-1", None, None).traffic_label(), "All Ports");
    }

    #[test]
    fn test_deserialize_describe_security_groups_record() {
        let json = serde_json::json!({
            "GroupId": "sg-0a1b",
            "GroupName": "web",
            "Description": "web tier",
            "VpcId": "vpc-1",
            "IpPermissions": [{
                "IpProtocol": "tcp",
                "FromPort": 443,
                "ToPort": 443,
                "IpRanges": [{"CidrIp": "0.0.0.0/0", "Description": "world"}],
                "UserIdGroupPairs": [{"GroupId": "sg-0c2d", "UserId": "123456789012"}]
            }],
            "IpPermissionsEgress": []
        });
        let sg: SecurityGroupRecord =
            serde_json::from_value(json).expect("SecurityGroupRecord should deserialize");
        assert_eq!(sg.group_id, "sg-0a1b");
        assert_eq!(sg.ingress.len(), 1);
        assert_eq!(sg.ingress[0].ip_ranges[0].cidr_ip, "0.0.0.0/0");
        assert_eq!(
            sg.ingress[0].group_pairs[0].group_id.as_deref(),
            Some("sg-0c2d")
        );
        assert!(sg.egress.is_empty());
    }
}
