//! AWS CLI command execution.
//!
//! Provides the production [`ProviderApi`] implementation, which shells out
//! to the `aws` executable and parses its JSON output. Credentials and
//! retries are the CLI's concern; this layer only runs commands.

use crate::aws::ProviderApi;
use colored::Colorize;
use regex::Regex;
use serde_json::Value;
use std::error::Error;
use std::process::Command;
use std::sync::OnceLock;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// [`ProviderApi`] backed by the AWS CLI.
pub struct CliApi {
    region: String,
}

impl CliApi {
    pub fn new(region: &str) -> Self {
        CliApi {
            region: region.to_string(),
        }
    }
}

impl ProviderApi for CliApi {
    fn call(
        &self,
        service: &str,
        operation: &str,
        args: &[String],
    ) -> Result<Value, Box<dyn Error>> {
        let mut cmd = format!(
            "aws {service} {operation} --region {region} --output json",
            region = self.region
        );
        for arg in args {
            if arg.contains(char::is_whitespace) {
                cmd.push_str(&format!(" '{arg}'"));
            } else {
                cmd.push_str(&format!(" {arg}"));
            }
        }

        let stdout = run(&cmd)?;
        // Some operations print nothing when there is nothing to list.
        if stdout.trim().is_empty() {
            return Ok(Value::Null);
        }
        let value: Value = serde_json::from_str(&stdout)
            .map_err(|e| format!("Error parsing {service} {operation} output: {e}"))?;
        Ok(value)
    }
}

/// Run a shell command and return its stdout.
///
/// The command string is split on spaces, with quoted substrings preserved.
///
/// # Arguments
/// * `cmd` - The command string to execute
///
/// # Returns
/// * `Ok(String)` - The stdout output on success
/// * `Err` - If the command fails or cannot be started
pub fn run(cmd: &str) -> Result<String, Box<dyn Error>> {
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let cmds: Vec<&str> = split_and_strip(cmd);
    log::trace!("split cmds={:?}", cmds);

    // Build command and add args
    let mut command = Command::new(cmds[0]);
    for arg in cmds.iter().skip(1) {
        command.arg(arg);
    }

    let output = command.output().map_err(|e| {
        log::error!("Command execution failed: {}", e);
        format!("Failed to execute command: {}", e)
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\n┎######\nstderr=\n{stderr}\n┖######",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(format!("ERROR running: {stderr}").into());
    }

    log::debug!("Success cmd: {cmd}");
    log::debug!("Success output.stdout.len(): {}", output.stdout.len());

    let stdout = String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8: {}", e))?;

    Ok(stdout)
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .collect()
}
