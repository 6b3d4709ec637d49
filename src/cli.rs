//! Command-line options.

use clap::{Parser, ValueEnum};

/// Visualize AWS Security Groups and NACLs as Mermaid diagrams and reports.
#[derive(Parser, Debug)]
#[command(name = "aws-security-summary", version)]
pub struct RunOptions {
    /// AWS region to query.
    #[arg(long, default_value = "us-east-1")]
    pub region: String,

    /// Output file.
    #[arg(short, long, default_value = "security-visualization.md")]
    pub output: String,

    /// Output format: mermaid (diagrams only) or report (full report).
    #[arg(long, value_enum, default_value_t = OutputFormat::Report)]
    pub format: OutputFormat,

    /// Source security group id for the point-to-point flow diagram.
    #[arg(long)]
    pub source_sg: Option<String>,

    /// Target security group id for the point-to-point flow diagram.
    #[arg(long)]
    pub target_sg: Option<String>,
}

impl RunOptions {
    /// The source/target pair, when both are given. Overrides `--format`.
    pub fn flow_pair(&self) -> Option<(&str, &str)> {
        match (&self.source_sg, &self.target_sg) {
            (Some(source), Some(target)) => Some((source, target)),
            _ => None,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Diagrams only.
    Mermaid,
    /// Full report with diagrams and per-rule details.
    Report,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Mermaid => "mermaid",
            OutputFormat::Report => "report",
        }
    }
}
