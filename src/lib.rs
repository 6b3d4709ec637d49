// cargo watch -x 'fmt' -x 'run'  // 'run -- --some-arg'

pub mod aws;
pub mod cli;
pub mod collect;
pub mod models;
pub mod output;
pub mod processing;

use cli::OutputFormat;
use collect::Inventory;
use output::FlowOutcome;
use processing::AttachmentIndex;

/// Render the requested output from a fetched inventory.
///
/// A source/target pair overrides the format and produces only the
/// point-to-point flow diagram; an unknown id renders as a user-visible
/// message rather than an error.
pub fn render(inventory: &Inventory, format: OutputFormat, flow: Option<(&str, &str)>) -> String {
    let attachments = AttachmentIndex::build(&inventory.components);

    if let Some((source_id, target_id)) = flow {
        return match output::flow_diagram(inventory, source_id, target_id) {
            FlowOutcome::Diagram(diagram) => diagram,
            FlowOutcome::NotFound(missing) => {
                log::warn!(
                    "Flow diagram: unknown security group(s) {}",
                    missing.join(", ")
                );
                format!("Error: security group(s) not found: {}", missing.join(", "))
            }
        };
    }

    match format {
        OutputFormat::Mermaid => [
            "# Security Groups Diagram".to_string(),
            output::security_groups_diagram(inventory, &attachments),
            "\n# Network ACLs Diagram".to_string(),
            output::nacl_overview_diagram(inventory),
        ]
        .join("\n"),
        OutputFormat::Report => output::full_report(inventory, &attachments),
    }
}
