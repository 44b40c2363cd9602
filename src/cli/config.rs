//! Config command handlers

use crate::cli::ConfigInitArgs;
use crate::config::VigilConfig;
use std::error::Error;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};

const EXAMPLE_CONFIG: &str = include_str!("../../vigil.example.toml");

/// Handle `vigil config init` command
///
/// Without `--force` the file is created exclusively, so an existing config
/// is never truncated.
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn Error>> {
    let mut options = OpenOptions::new();
    options.write(true);
    if args.force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(&args.output).map_err(|e| -> Box<dyn Error> {
        if e.kind() == ErrorKind::AlreadyExists {
            format!(
                "File already exists: {}. Use --force to overwrite.",
                args.output.display()
            )
            .into()
        } else {
            e.into()
        }
    })?;
    file.write_all(EXAMPLE_CONFIG.as_bytes())?;

    let template: VigilConfig = toml::from_str(EXAMPLE_CONFIG)?;
    println!("✓ Configuration file created: {}", args.output.display());
    println!(
        "  Model {} with {} routing strategies; contradiction check {}.",
        template.generation.model,
        template.routing.strategies.len(),
        if template.validation.nli.enabled { "on" } else { "off" }
    );
    println!("  Edit this file to choose the model, strategies and validators.");

    Ok(())
}
