//! Run command implementation

use crate::cli::output::{format_records_table, format_report_json, format_summary_table};
use crate::cli::RunArgs;
use crate::config::{LogFormat, VigilConfig};
use crate::dataset;
use crate::pipeline::{self, write_records_jsonl};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &RunArgs,
) -> Result<VigilConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        VigilConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        VigilConfig::default()
    };

    config = config.with_env_overrides();

    // CLI overrides (highest priority)
    if let Some(ref model) = args.model {
        config.generation.model = model.clone();
    }
    if let Some(seed) = args.seed {
        config.generation.seed = Some(seed);
    }
    if let Some(limit) = args.limit {
        config.runner.prompt_limit = limit;
    }
    if let Some(budget) = args.budget {
        config.runner.call_budget = budget;
    }
    if let Some(interval) = args.interval_ms {
        config.runner.min_interval_ms = interval;
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.no_nli {
        config.validation.nli.enabled = false;
    }

    Ok(config)
}

/// Initialize tracing based on configuration
///
/// Events go to stderr so stdout carries only the report.
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    if config.enable_content_logging {
        eprintln!("WARNING: Content logging is enabled. Prompt previews will be logged.");
        eprintln!("         Datasets may contain sensitive data. Use only for debugging.");
    }

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Main run command handler
///
/// Partial results of an aborted run are still written and printed before
/// the abort is returned as an error.
pub async fn run_eval(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load and merge configuration
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;
    tracing::debug!(?config, "Loaded configuration");

    // 3. Prompts
    let prompts = match &args.prompts {
        Some(path) => dataset::load_prompts(path)?,
        None => {
            tracing::info!("No dataset given, using sample prompts");
            dataset::sample_prompts()
        }
    };

    // 4. Run
    let client = Arc::new(reqwest::Client::builder().build()?);
    let mut runner = pipeline::build_runner(&config, client);
    let report = runner.run(&prompts).await;

    // 5. Persist and print
    if let Some(ref path) = args.output {
        write_records_jsonl(path, &report.records)?;
        tracing::info!(path = %path.display(), records = report.records.len(), "Records written");
    }

    if args.json {
        println!("{}", format_report_json(&report)?);
    } else {
        println!("{}", format_records_table(&report.records));
        println!("{}", format_summary_table(&report.summary()));
    }

    match report.abort {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
