//! AWS VPC data model.

use serde::{Deserialize, Serialize};

/// Represents a VPC as returned by `ec2 describe-vpcs`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Vpc {
    /// VPC identifier (`vpc-...`).
    pub vpc_id: String,
    /// Primary CIDR block of the VPC.
    #[serde(default)]
    pub cidr_block: Option<String>,
    /// Whether this is the account's default VPC.
    #[serde(default)]
    pub is_default: bool,
    /// Resource tags as returned by the API.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A single resource tag.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Vpc {
    /// Display name: the `Name` tag value, falling back to the VPC id.
    pub fn display_name(&self) -> &str {
        self.tags
            .iter()
            .find(|t| t.key == "Name")
            .map(|t| t.value.as_str())
            .unwrap_or(&self.vpc_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vpc(tags: Vec<Tag>) -> Vpc {
        Vpc {
            vpc_id: "vpc-0abc".to_string(),
            cidr_block: Some("10.0.0.0/16".to_string()),
            is_default: false,
            tags,
        }
    }

    #[test]
    fn test_display_name_from_tag() {
        let v = vpc(vec![
            Tag {
                key: "env".to_string(),
                value: "prod".to_string(),
            },
            Tag {
                key: "Name".to_string(),
                value: "core-network".to_string(),
            },
        ]);
        assert_eq!(v.display_name(), "core-network");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let v = vpc(vec![]);
        assert_eq!(v.display_name(), "vpc-0abc");
    }

    #[test]
    fn test_deserialize_describe_vpcs_record() {
        let json = serde_json::json!({
            "VpcId": "vpc-1234",
            "CidrBlock": "172.16.0.0/16",
            "IsDefault": true,
            "Tags": [{"Key": "Name", "Value": "default"}]
        });
        let v: Vpc = serde_json::from_value(json).expect("Vpc should deserialize");
        assert_eq!(v.vpc_id, "vpc-1234");
        assert!(v.is_default);
        assert_eq!(v.display_name(), "default");
    }
}
