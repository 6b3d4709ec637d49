use aws_security_summary::aws::CliApi;
use aws_security_summary::cli::RunOptions;
use aws_security_summary::{collect, render};
use clap::Parser;
use colored::Colorize;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())
        .map_err(|e| format!("Error initializing log4rs: {e}"))?;
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let options = RunOptions::parse();

    println!("Fetching AWS resources...");
    let api = CliApi::new(&options.region);
    let inventory = collect::fetch_all(&api, &options.region)?;

    let output = render(&inventory, options.format, options.flow_pair());
    std::fs::write(&options.output, &output)
        .map_err(|e| format!("Error writing {}: {e}", options.output))?;

    println!();
    println!(
        "{} Visualization saved to {}",
        "✓".green(),
        options.output
    );
    println!("  Format: {}", options.format.as_str());
    println!("  Region: {}", options.region);

    Ok(())
}
