//! VPC endpoint collector.
//!
//! Only interface endpoints carry security groups. Gateway endpoints are
//! still recorded, with an explicit "no security groups" detail, so the
//! report shows them without contributing attachment edges.

use crate::aws::{paginate, ProviderApi};
use crate::collect::{group_ids, CollectedComponent};
use crate::models::{Component, ComponentKind};
use serde_json::Value;
use std::error::Error;

pub fn collect(api: &dyn ProviderApi) -> Result<Vec<CollectedComponent>, Box<dyn Error>> {
    let records = paginate(api, "ec2", "describe-vpc-endpoints", &[], "VpcEndpoints")?;

    let mut found = Vec::new();
    for record in &records {
        let Some(endpoint_id) = record.get("VpcEndpointId").and_then(Value::as_str) else {
            continue;
        };
        let service_name = record
            .get("ServiceName")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let short_service = service_name.rsplit('.').next().unwrap_or(service_name);
        let endpoint_type = record
            .get("VpcEndpointType")
            .and_then(Value::as_str)
            .unwrap_or("Gateway");

        let (detail, security_groups) = if endpoint_type == "Interface" {
            (
                format!("interface endpoint for {short_service}"),
                group_ids(record.get("Groups")),
            )
        } else {
            (
                format!("gateway endpoint for {short_service} (no security groups)"),
                vec![],
            )
        };

        found.push(CollectedComponent {
            component: Component {
                kind: ComponentKind::VpcEndpoint,
                id: endpoint_id.to_string(),
                name: short_service.to_string(),
                detail,
            },
            security_groups,
        });
    }
    Ok(found)
}
