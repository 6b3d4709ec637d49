//! Read-only provider API surface.
//!
//! The collectors consume the provider exclusively through [`ProviderApi`],
//! a single list/describe call returning decoded JSON. The production
//! implementation shells out to the AWS CLI ([`crate::aws::CliApi`]); tests
//! use [`crate::aws::FixtureApi`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::error::Error;

/// Page size requested per list/describe call.
const PAGE_SIZE: usize = 200;

/// One read-only list/describe operation against the provider.
pub trait ProviderApi {
    /// Invoke `service operation` with extra arguments, returning the
    /// decoded JSON response.
    fn call(&self, service: &str, operation: &str, args: &[String])
        -> Result<Value, Box<dyn Error>>;
}

/// Run a paginated list/describe operation to exhaustion.
///
/// Pages are requested sequentially with `--starting-token`; the loop ends
/// when the response carries no `NextToken`. A token that does not advance
/// between pages is treated as a fatal error rather than looping forever.
///
/// # Arguments
/// * `list_key` - Response key holding the page's array of records
pub fn paginate(
    api: &dyn ProviderApi,
    service: &str,
    operation: &str,
    args: &[String],
    list_key: &str,
) -> Result<Vec<Value>, Box<dyn Error>> {
    let mut items: Vec<Value> = Vec::new();
    let mut token: Option<String> = None;
    let mut page = 0usize;

    loop {
        let mut call_args: Vec<String> = args.to_vec();
        call_args.push("--max-items".to_string());
        call_args.push(PAGE_SIZE.to_string());
        if let Some(t) = &token {
            call_args.push("--starting-token".to_string());
            call_args.push(t.clone());
        }

        let response = api.call(service, operation, &call_args)?;
        let batch = response
            .get(list_key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        log::debug!(
            "{service} {operation}: page#{page} returned {count} {list_key}",
            count = batch.len()
        );
        items.extend(batch);

        match response.get("NextToken").and_then(Value::as_str) {
            Some(next) => {
                if token.as_deref() == Some(next) {
                    return Err(format!(
                        "pagination token did not advance for {service} {operation}"
                    )
                    .into());
                }
                token = Some(next.to_string());
            }
            None => break,
        }
        page += 1;
    }

    log::info!(
        "{service} {operation}: {count} {list_key} over {pages} page(s)",
        count = items.len(),
        pages = page + 1
    );
    Ok(items)
}

/// Decode one JSON record into a typed model, reporting the JSON path on
/// failure.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, Box<dyn Error>> {
    let result: Result<T, serde_path_to_error::Error<serde_json::Error>> =
        serde_path_to_error::deserialize(value);
    result.map_err(|e| {
        let json_path = e.path().to_string();
        format!("Error decoding record at {json_path}: {e}").into()
    })
}
