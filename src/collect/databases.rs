//! RDS instance collector.

use crate::aws::{paginate, ProviderApi};
use crate::collect::CollectedComponent;
use crate::models::{Component, ComponentKind};
use serde_json::Value;
use std::error::Error;

pub fn collect(api: &dyn ProviderApi) -> Result<Vec<CollectedComponent>, Box<dyn Error>> {
    let records = paginate(api, "rds", "describe-db-instances", &[], "DBInstances")?;

    let mut found = Vec::new();
    for record in &records {
        let Some(identifier) = record.get("DBInstanceIdentifier").and_then(Value::as_str) else {
            continue;
        };
        let engine = record
            .get("Engine")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let class = record
            .get("DBInstanceClass")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        let security_groups = record
            .get("VpcSecurityGroups")
            .and_then(Value::as_array)
            .map(|groups| {
                groups
                    .iter()
                    .filter_map(|g| g.get("VpcSecurityGroupId").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        found.push(CollectedComponent {
            component: Component {
                kind: ComponentKind::DatabaseInstance,
                id: identifier.to_string(),
                name: identifier.to_string(),
                detail: format!("{engine}, {class}"),
            },
            security_groups,
        });
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::FixtureApi;
    use serde_json::json;

    #[test]
    fn test_collect_databases() {
        let mut api = FixtureApi::new();
        api.insert(
            "rds describe-db-instances",
            json!({"DBInstances": [{
                "DBInstanceIdentifier": "orders-db",
                "Engine": "postgres",
                "DBInstanceClass": "db.r6g.large",
                "VpcSecurityGroups": [
                    {"VpcSecurityGroupId": "sg-db", "Status": "active"}
                ]
            }]}),
        );
        let found = collect(&api).expect("collect should succeed");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].component.name, "orders-db");
        assert_eq!(found[0].component.detail, "postgres, db.r6g.large");
        assert_eq!(found[0].security_groups, vec!["sg-db"]);
    }
}
