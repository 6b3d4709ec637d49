//! EKS node group collector.
//!
//! Node groups only expose a security group directly when remote access is
//! configured. Otherwise the group set is resolved best-effort from the
//! EC2 instances tagged with the cluster's identity; clusters without such
//! tags simply contribute no attachments.

use crate::aws::{paginate, ProviderApi};
use crate::collect::{group_ids, CollectedComponent};
use crate::models::{Component, ComponentKind};
use serde_json::Value;
use std::error::Error;

pub fn collect(api: &dyn ProviderApi) -> Result<Vec<CollectedComponent>, Box<dyn Error>> {
    let clusters = string_values(paginate(api, "eks", "list-clusters", &[], "clusters")?);

    let mut found = Vec::new();
    for cluster in &clusters {
        let cluster_args = vec!["--cluster-name".to_string(), cluster.clone()];
        let nodegroups =
            string_values(paginate(api, "eks", "list-nodegroups", &cluster_args, "nodegroups")?);

        for nodegroup in &nodegroups {
            let mut args = cluster_args.clone();
            args.push("--nodegroup-name".to_string());
            args.push(nodegroup.clone());
            let response = api.call("eks", "describe-nodegroup", &args)?;
            let record = response.get("nodegroup").cloned().unwrap_or(Value::Null);

            let status = record
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or("unknown");

            let mut security_groups: Vec<String> = record
                .get("resources")
                .and_then(|r| r.get("remoteAccessSecurityGroup"))
                .and_then(Value::as_str)
                .map(|sg| vec![sg.to_string()])
                .unwrap_or_default();
            if security_groups.is_empty() {
                security_groups = cluster_instance_groups(api, cluster);
            }

            found.push(CollectedComponent {
                component: Component {
                    kind: ComponentKind::EksNodeGroup,
                    id: format!("{cluster}/{nodegroup}"),
                    name: nodegroup.clone(),
                    detail: format!("cluster {cluster}, {status}"),
                },
                security_groups,
            });
        }
    }
    Ok(found)
}

/// Distinct security groups of instances tagged `eks:cluster-name=<cluster>`.
/// Best effort: a failed lookup yields no attachments, not an error.
fn cluster_instance_groups(api: &dyn ProviderApi, cluster: &str) -> Vec<String> {
    let args = vec![
        "--filters".to_string(),
        format!("Name=tag:eks:cluster-name,Values={cluster}"),
    ];
    let reservations = match paginate(api, "ec2", "describe-instances", &args, "Reservations") {
        Ok(reservations) => reservations,
        Err(e) => {
            log::warn!("Could not cross-reference instances for EKS cluster {cluster}: {e}");
            return vec![];
        }
    };

    let mut groups: Vec<String> = Vec::new();
    for reservation in &reservations {
        let instances = reservation
            .get("Instances")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for instance in instances {
            for group in group_ids(instance.get("SecurityGroups")) {
                if !groups.contains(&group) {
                    groups.push(group);
                }
            }
        }
    }
    groups
}

fn string_values(values: Vec<Value>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}
