//! EC2 instance collector.

use crate::aws::{paginate, ProviderApi};
use crate::collect::{group_ids, name_tag, CollectedComponent};
use crate::models::{Component, ComponentKind};
use serde_json::Value;
use std::error::Error;

pub fn collect(api: &dyn ProviderApi) -> Result<Vec<CollectedComponent>, Box<dyn Error>> {
    let reservations = paginate(api, "ec2", "describe-instances", &[], "Reservations")?;

    let mut found = Vec::new();
    for reservation in &reservations {
        let instances = reservation
            .get("Instances")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for instance in instances {
            let Some(instance_id) = instance.get("InstanceId").and_then(Value::as_str) else {
                continue;
            };
            let instance_type = instance
                .get("InstanceType")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            let state = instance
                .get("State")
                .and_then(|s| s.get("Name"))
                .and_then(Value::as_str)
                .unwrap_or("unknown");

            found.push(CollectedComponent {
                component: Component {
                    kind: ComponentKind::Ec2Instance,
                    id: instance_id.to_string(),
                    name: name_tag(instance.get("Tags"), instance_id),
                    detail: format!("{instance_type}, {state}"),
                },
                security_groups: group_ids(instance.get("SecurityGroups")),
            });
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::FixtureApi;
    use serde_json::json;

    #[test]
    fn test_collect_instances_across_reservations() {
        let mut api = FixtureApi::new();
        api.insert(
            "ec2 describe-instances",
            json!({"Reservations": [
                {"Instances": [{
                    "InstanceId": "i-1",
                    "InstanceType": "t3.micro",
                    "State": {"Name": "running"},
                    "Tags": [{"Key": "Name", "Value": "web-1"}],
                    "SecurityGroups": [{"GroupId": "sg-web"}]
                }]},
                {"Instances": [{
                    "InstanceId": "i-2",
                    "InstanceType": "m5.large",
                    "State": {"Name": "stopped"},
                    "SecurityGroups": [{"GroupId": "sg-web"}, {"GroupId": "sg-admin"}]
                }]}
            ]}),
        );
        let found = collect(&api).expect("collect should succeed");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].component.name, "web-1");
        assert_eq!(found[0].component.detail, "t3.micro, running");
        assert_eq!(found[1].component.name, "i-2");
        assert_eq!(found[1].security_groups, vec!["sg-web", "sg-admin"]);
    }
}
