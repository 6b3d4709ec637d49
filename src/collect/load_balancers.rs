//! Load balancer collectors.
//!
//! Classic load balancers live in the `elb` API, application and network
//! load balancers in `elbv2`. Network load balancers may carry no security
//! groups at all.

use crate::aws::{paginate, ProviderApi};
use crate::collect::{arn_tail, string_list, CollectedComponent};
use crate::models::{Component, ComponentKind};
use serde_json::Value;
use std::error::Error;

pub fn collect_classic(api: &dyn ProviderApi) -> Result<Vec<CollectedComponent>, Box<dyn Error>> {
    let records = paginate(
        api,
        "elb",
        "describe-load-balancers",
        &[],
        "LoadBalancerDescriptions",
    )?;

    let mut found = Vec::new();
    for record in &records {
        let Some(name) = record.get("LoadBalancerName").and_then(Value::as_str) else {
            continue;
        };
        let scheme = record
            .get("Scheme")
            .and_then(Value::as_str)
            .unwrap_or("internal");
        found.push(CollectedComponent {
            component: Component {
                kind: ComponentKind::ClassicLoadBalancer,
                id: name.to_string(),
                name: name.to_string(),
                detail: format!("classic, {scheme}"),
            },
            security_groups: string_list(record.get("SecurityGroups")),
        });
    }
    Ok(found)
}

pub fn collect_v2(api: &dyn ProviderApi) -> Result<Vec<CollectedComponent>, Box<dyn Error>> {
    let records = paginate(api, "elbv2", "describe-load-balancers", &[], "LoadBalancers")?;

    let mut found = Vec::new();
    for record in &records {
        let Some(arn) = record.get("LoadBalancerArn").and_then(Value::as_str) else {
            continue;
        };
        let name = record
            .get("LoadBalancerName")
            .and_then(Value::as_str)
            .unwrap_or_else(|| arn_tail(arn));
        let lb_type = record.get("Type").and_then(Value::as_str).unwrap_or("");
        let kind = if lb_type == "network" {
            ComponentKind::NetworkLoadBalancer
        } else {
            ComponentKind::ApplicationLoadBalancer
        };
        let scheme = record
            .get("Scheme")
            .and_then(Value::as_str)
            .unwrap_or("internal");
        found.push(CollectedComponent {
            component: Component {
                kind,
                id: arn.to_string(),
                name: name.to_string(),
                detail: format!("{lb_type}, {scheme}"),
            },
            security_groups: string_list(record.get("SecurityGroups")),
        });
    }
    Ok(found)
}
