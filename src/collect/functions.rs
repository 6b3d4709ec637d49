//! Lambda function collector.
//!
//! Only VPC-bound functions carry security groups; functions without a
//! VPC config are skipped entirely.

use crate::aws::{paginate, ProviderApi};
use crate::collect::{string_list, CollectedComponent};
use crate::models::{Component, ComponentKind};
use serde_json::Value;
use std::error::Error;

pub fn collect(api: &dyn ProviderApi) -> Result<Vec<CollectedComponent>, Box<dyn Error>> {
    let records = paginate(api, "lambda", "list-functions", &[], "Functions")?;

    let mut found = Vec::new();
    for record in &records {
        let Some(name) = record.get("FunctionName").and_then(Value::as_str) else {
            continue;
        };
        let security_groups =
            string_list(record.get("VpcConfig").and_then(|c| c.get("SecurityGroupIds")));
        if security_groups.is_empty() {
            continue;
        }
        let runtime = record
            .get("Runtime")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        found.push(CollectedComponent {
            component: Component {
                kind: ComponentKind::LambdaFunction,
                id: name.to_string(),
                name: name.to_string(),
                detail: format!("runtime {runtime}"),
            },
            security_groups,
        });
    }
    Ok(found)
}
