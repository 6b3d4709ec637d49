//! Resource collection.
//!
//! Fetches everything the renderers need in one pass:
//! - [`core`] - VPCs, security groups and NACLs (fatal on failure)
//! - one sub-collector per bindable resource kind, each independent and
//!   individually failure-tolerant (a denied or unavailable API degrades
//!   that kind to an empty contribution, logged as a warning)
//!
//! The result is an immutable [`Inventory`] passed by reference into the
//! attachment index, the graph builder and the renderers.

mod clusters;
mod containers;
mod core;
mod databases;
mod endpoints;
mod functions;
mod instances;
mod load_balancers;

use crate::aws::ProviderApi;
use crate::models::{Component, NaclRecord, SecurityGroupRecord, Vpc};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::error::Error;

/// One discovered component together with the security-group ids it
/// declares.
#[derive(Debug, Clone)]
pub struct CollectedComponent {
    pub component: Component,
    pub security_groups: Vec<String>,
}

/// The complete fetched data set for one account/region scope.
///
/// Read-only after collection; render calls never mutate it.
#[derive(Debug)]
pub struct Inventory {
    pub region: String,
    /// Capture time, recorded once so repeated renders are byte-identical.
    pub fetched_at: DateTime<Utc>,
    pub vpcs: Vec<Vpc>,
    pub security_groups: Vec<SecurityGroupRecord>,
    pub nacls: Vec<NaclRecord>,
    pub components: Vec<CollectedComponent>,
}

impl Inventory {
    /// Look up a fetched security group by id.
    pub fn group(&self, group_id: &str) -> Option<&SecurityGroupRecord> {
        self.security_groups.iter().find(|g| g.group_id == group_id)
    }
}

/// A per-kind collector sub-routine.
pub type KindCollector = fn(&dyn ProviderApi) -> Result<Vec<CollectedComponent>, Box<dyn Error>>;

/// The registered component collectors, one per bindable resource kind.
pub fn component_collectors() -> Vec<(&'static str, KindCollector)> {
    vec![
        ("EC2 instances", instances::collect as KindCollector),
        ("Classic load balancers", load_balancers::collect_classic),
        ("ALB/NLB load balancers", load_balancers::collect_v2),
        ("RDS instances", databases::collect),
        ("Lambda functions", functions::collect),
        ("ECS services and tasks", containers::collect),
        ("EKS node groups", clusters::collect),
        ("VPC endpoints", endpoints::collect),
    ]
}

/// Fetch the complete inventory for the scope behind `api`.
///
/// Core entities (VPCs, security groups, NACLs) are fatal on failure;
/// per-kind component collectors degrade to an empty contribution.
pub fn fetch_all(api: &dyn ProviderApi, region: &str) -> Result<Inventory, Box<dyn Error>> {
    println!("  - Fetching VPCs...");
    let vpcs = core::fetch_vpcs(api)?;
    println!("  - Fetching Security Groups...");
    let security_groups = core::fetch_security_groups(api)?;
    println!("  - Fetching Network ACLs...");
    let nacls = core::fetch_nacls(api)?;

    let mut components = ComponentSet::new();
    for (label, collect) in component_collectors() {
        println!("  - Fetching {label}...");
        match collect(api) {
            Ok(found) => {
                log::info!("{label}: {} component(s)", found.len());
                for item in found {
                    components.insert(item);
                }
            }
            Err(e) => {
                log::warn!("Skipping {label}: {e}");
            }
        }
    }

    println!(
        "  ✓ Found {} VPCs, {} Security Groups, {} NACLs",
        vpcs.len(),
        security_groups.len(),
        nacls.len()
    );

    Ok(Inventory {
        region: region.to_string(),
        fetched_at: Utc::now(),
        vpcs,
        security_groups,
        nacls,
        components: components.into_vec(),
    })
}

/// Insertion-ordered component set keyed by natural resource id.
/// Re-inserting an id overwrites the earlier record in place.
struct ComponentSet {
    items: Vec<CollectedComponent>,
    index: HashMap<String, usize>,
}

impl ComponentSet {
    fn new() -> Self {
        ComponentSet {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn insert(&mut self, item: CollectedComponent) {
        match self.index.get(&item.component.id) {
            Some(&at) => self.items[at] = item,
            None => {
                self.index.insert(item.component.id.clone(), self.items.len());
                self.items.push(item);
            }
        }
    }

    fn into_vec(self) -> Vec<CollectedComponent> {
        self.items
    }
}

/// Extract `GroupId` values from an array of `{ "GroupId": ... }` objects.
pub(crate) fn group_ids(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("GroupId").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Extract an array of plain strings.
pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Resolve the `Name` tag from a `Tags` array, falling back to `fallback`.
pub(crate) fn name_tag(tags: Option<&Value>, fallback: &str) -> String {
    tags.and_then(Value::as_array)
        .and_then(|tags| {
            tags.iter()
                .find(|t| t.get("Key").and_then(Value::as_str) == Some("Name"))
                .and_then(|t| t.get("Value").and_then(Value::as_str))
        })
        .unwrap_or(fallback)
        .to_string()
}

/// Last `/`-separated segment of an ARN or service name.
pub(crate) fn arn_tail(arn: &str) -> &str {
    arn.rsplit('/').next().unwrap_or(arn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentKind;
    use serde_json::json;

    fn component(id: &str, name: &str) -> CollectedComponent {
        CollectedComponent {
            component: Component {
                kind: ComponentKind::Ec2Instance,
                id: id.to_string(),
                name: name.to_string(),
                detail: String::new(),
            },
            security_groups: vec![],
        }
    }

    #[test]
    fn test_component_set_overwrites_duplicates_in_place() {
        let mut set = ComponentSet::new();
        set.insert(component("i-1", "first"));
        set.insert(component("i-2", "second"));
        set.insert(component("i-1", "first-again"));
        let items = set.into_vec();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].component.name, "first-again");
        assert_eq!(items[1].component.name, "second");
    }

    #[test]
    fn test_group_ids_helper() {
        let value = json!([{"GroupId": "sg-1"}, {"GroupName": "no-id"}, {"GroupId": "sg-2"}]);
        assert_eq!(group_ids(Some(&value)), vec!["sg-1", "sg-2"]);
        assert!(group_ids(None).is_empty());
    }

    #[test]
    fn test_name_tag_helper() {
        let tags = json!([{"Key": "env", "Value": "prod"}, {"Key": "Name", "Value": "web-1"}]);
        assert_eq!(name_tag(Some(&tags), "i-1"), "web-1");
        assert_eq!(name_tag(None, "i-1"), "i-1");
    }

    #[test]
    fn test_arn_tail() {
        assert_eq!(
            arn_tail("arn:aws:ecs:us-east-1:123:service/prod/web"),
            "web"
        );
        assert_eq!(arn_tail("plain-name"), "plain-name");
    }
}
