//! ECS service and task collector.
//!
//! Services declare their security groups directly in the awsvpc network
//! configuration. Tasks only expose an attached network interface, so task
//! security groups are resolved through `ec2 describe-network-interfaces`.

use crate::aws::{paginate, ProviderApi};
use crate::collect::{arn_tail, string_list, CollectedComponent};
use crate::models::{Component, ComponentKind};
use serde_json::Value;
use std::collections::HashMap;
use std::error::Error;

/// describe-services accepts at most this many services per call.
const DESCRIBE_SERVICES_CHUNK: usize = 10;
/// describe-tasks accepts at most this many tasks per call.
const DESCRIBE_TASKS_CHUNK: usize = 100;

pub fn collect(api: &dyn ProviderApi) -> Result<Vec<CollectedComponent>, Box<dyn Error>> {
    let cluster_arns = string_values(paginate(api, "ecs", "list-clusters", &[], "clusterArns")?);

    let mut found = Vec::new();
    // Index into `found` per network interface still awaiting resolution.
    let mut pending_enis: HashMap<String, usize> = HashMap::new();

    for cluster_arn in &cluster_arns {
        let cluster_name = arn_tail(cluster_arn);
        collect_services(api, cluster_arn, cluster_name, &mut found)?;
        collect_tasks(api, cluster_arn, cluster_name, &mut found, &mut pending_enis)?;
    }

    resolve_task_enis(api, &mut found, &pending_enis);
    Ok(found)
}

fn collect_services(
    api: &dyn ProviderApi,
    cluster_arn: &str,
    cluster_name: &str,
    found: &mut Vec<CollectedComponent>,
) -> Result<(), Box<dyn Error>> {
    let cluster_args = vec!["--cluster".to_string(), cluster_arn.to_string()];
    let service_arns =
        string_values(paginate(api, "ecs", "list-services", &cluster_args, "serviceArns")?);

    for chunk in service_arns.chunks(DESCRIBE_SERVICES_CHUNK) {
        let mut args = cluster_args.clone();
        args.push("--services".to_string());
        args.extend(chunk.iter().cloned());
        let response = api.call("ecs", "describe-services", &args)?;

        let services = response
            .get("services")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for service in services {
            let Some(arn) = service.get("serviceArn").and_then(Value::as_str) else {
                continue;
            };
            let name = service
                .get("serviceName")
                .and_then(Value::as_str)
                .unwrap_or_else(|| arn_tail(arn));
            let launch_type = service
                .get("launchType")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            found.push(CollectedComponent {
                component: Component {
                    kind: ComponentKind::EcsService,
                    id: arn.to_string(),
                    name: name.to_string(),
                    detail: format!("cluster {cluster_name}, {launch_type}"),
                },
                security_groups: string_list(awsvpc_security_groups(service)),
            });
        }
    }
    Ok(())
}

fn collect_tasks(
    api: &dyn ProviderApi,
    cluster_arn: &str,
    cluster_name: &str,
    found: &mut Vec<CollectedComponent>,
    pending_enis: &mut HashMap<String, usize>,
) -> Result<(), Box<dyn Error>> {
    let cluster_args = vec!["--cluster".to_string(), cluster_arn.to_string()];
    let task_arns = string_values(paginate(api, "ecs", "list-tasks", &cluster_args, "taskArns")?);

    for chunk in task_arns.chunks(DESCRIBE_TASKS_CHUNK) {
        let mut args = cluster_args.clone();
        args.push("--tasks".to_string());
        args.extend(chunk.iter().cloned());
        let response = api.call("ecs", "describe-tasks", &args)?;

        let tasks = response
            .get("tasks")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for task in tasks {
            let Some(arn) = task.get("taskArn").and_then(Value::as_str) else {
                continue;
            };
            let status = task
                .get("lastStatus")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            found.push(CollectedComponent {
                component: Component {
                    kind: ComponentKind::EcsTask,
                    id: arn.to_string(),
                    name: arn_tail(arn).to_string(),
                    detail: format!("cluster {cluster_name}, {status}"),
                },
                security_groups: vec![],
            });
            let at = found.len() - 1;
            for eni in task_network_interfaces(task) {
                pending_enis.insert(eni, at);
            }
        }
    }
    Ok(())
}

/// Look up the security groups of each pending task network interface.
/// Best effort: a lookup failure leaves the tasks without attachments.
fn resolve_task_enis(
    api: &dyn ProviderApi,
    found: &mut [CollectedComponent],
    pending_enis: &HashMap<String, usize>,
) {
    if pending_enis.is_empty() {
        return;
    }
    let mut args = vec!["--network-interface-ids".to_string()];
    args.extend(pending_enis.keys().cloned());

    let response = match api.call("ec2", "describe-network-interfaces", &args) {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Could not resolve ECS task network interfaces: {e}");
            return;
        }
    };

    let interfaces = response
        .get("NetworkInterfaces")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for interface in interfaces {
        let Some(eni_id) = interface.get("NetworkInterfaceId").and_then(Value::as_str) else {
            continue;
        };
        if let Some(&at) = pending_enis.get(eni_id) {
            found[at]
                .security_groups
                .extend(crate::collect::group_ids(interface.get("Groups")));
        }
    }
}

fn awsvpc_security_groups(service: &Value) -> Option<&Value> {
    service
        .get("networkConfiguration")?
        .get("awsvpcConfiguration")?
        .get("securityGroups")
}

/// Network interface ids from a task's ENI attachments.
fn task_network_interfaces(task: &Value) -> Vec<String> {
    let mut enis = Vec::new();
    let attachments = task
        .get("attachments")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for attachment in attachments {
        if attachment.get("type").and_then(Value::as_str) != Some("ElasticNetworkInterface") {
            continue;
        }
        let details = attachment
            .get("details")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for detail in details {
            if detail.get("name").and_then(Value::as_str) == Some("networkInterfaceId") {
                if let Some(eni) = detail.get("value").and_then(Value::as_str) {
                    enis.push(eni.to_string());
                }
            }
        }
    }
    enis
}

fn string_values(values: Vec<Value>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::FixtureApi;
    use serde_json::json;

    fn fixture() -> FixtureApi {
        let mut api = FixtureApi::new();
        api.insert(
            "ecs list-clusters",
            json!({"clusterArns": ["arn:aws:ecs:us-east-1:1:cluster/prod"]}),
        );
        api.insert(
            "ecs list-services",
            json!({"serviceArns": ["arn:aws:ecs:us-east-1:1:service/prod/web"]}),
        );
        api.insert(
            "ecs describe-services",
            json!({"services": [{
                "serviceArn": "arn:aws:ecs:us-east-1:1:service/prod/web",
                "serviceName": "web",
                "launchType": "FARGATE",
                "networkConfiguration": {
                    "awsvpcConfiguration": {"securityGroups": ["sg-svc"]}
                }
            }]}),
        );
        api.insert(
            "ecs list-tasks",
            json!({"taskArns": ["arn:aws:ecs:us-east-1:1:task/prod/abc123"]}),
        );
        api.insert(
            "ecs describe-tasks",
            json!({"tasks": [{
                "taskArn": "arn:aws:ecs:us-east-1:1:task/prod/abc123",
                "lastStatus": "RUNNING",
                "attachments": [{
                    "type": "ElasticNetworkInterface",
                    "details": [
                        {"name": "subnetId", "value": "subnet-1"},
                        {"name": "networkInterfaceId", "value": "eni-1"}
                    ]
                }]
            }]}),
        );
        api.insert(
            "ec2 describe-network-interfaces",
            json!({"NetworkInterfaces": [{
                "NetworkInterfaceId": "eni-1",
                "Groups": [{"GroupId": "sg-task"}]
            }]}),
        );
        api
    }

    #[test]
    fn test_collect_services_and_tasks() {
        let found = collect(&fixture()).expect("collect should succeed");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].component.kind, ComponentKind::EcsService);
        assert_eq!(found[0].security_groups, vec!["sg-svc"]);
        assert_eq!(found[1].component.kind, ComponentKind::EcsTask);
        assert_eq!(found[1].component.name, "abc123");
        assert_eq!(found[1].security_groups, vec!["sg-task"]);
    }

    #[test]
    fn test_missing_eni_data_leaves_task_without_attachments() {
        let mut api = fixture();
        // Null response yields no interfaces to resolve against.
        api.insert("ec2 describe-network-interfaces", json!(null));
        let found = collect(&api).expect("collect should succeed");
        assert!(found[1].security_groups.is_empty());
    }
}
