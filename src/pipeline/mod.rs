//! Evaluation pipeline
//!
//! Drives prompts sequentially through generation, feature extraction,
//! routing and validation, producing one [`PipelineRecord`] per prompt.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vigil::config::VigilConfig;
//! use vigil::pipeline;
//!
//! # async fn example() {
//! let config = VigilConfig::default();
//! let client = Arc::new(reqwest::Client::new());
//! let mut runner = pipeline::build_runner(&config, client);
//!
//! let report = runner.run(&["What is 2+2?".to_string()]).await;
//! println!("{} records", report.records.len());
//! # }
//! ```

pub mod budget;
pub mod error;
pub mod rate_limit;
pub mod record;
pub mod runner;
pub mod summary;

pub use budget::CallBudget;
pub use error::PipelineError;
pub use rate_limit::RateLimiter;
pub use record::{write_records_jsonl, PipelineRecord};
pub use runner::{PromptState, Runner};
pub use summary::RunSummary;

use chrono::{DateTime, Utc};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::agent::OpenAIAgent;
use crate::config::{resolve_model, StrategyConfig, VigilConfig};
use crate::generation::GenerationAdapter;
use crate::routing::Strategy;
use crate::validation::{ContradictionValidator, FactualityValidator, HostedClassifier, Validator};

/// Immutable parameters of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub seed: Option<u64>,
    pub model: String,
    pub strategies: Vec<StrategyConfig>,
    /// Already clamped to `MAX_PROMPT_LIMIT`
    pub prompt_limit: usize,
    pub min_interval: Duration,
    pub call_budget: u32,
    pub temperature: f32,
    pub max_tokens: u32,
    pub cache_key: bool,
}

impl RunConfig {
    pub fn from_config(config: &VigilConfig) -> Self {
        Self {
            seed: config.generation.seed,
            model: resolve_model(&config.generation.model),
            strategies: config.routing.strategies.clone(),
            prompt_limit: config.runner.effective_prompt_limit(),
            min_interval: Duration::from_millis(config.runner.min_interval_ms),
            call_budget: config.runner.call_budget,
            temperature: config.generation.temperature,
            max_tokens: config.generation.max_tokens,
            cache_key: config.generation.cache_key,
        }
    }

    pub fn build_strategies(&self) -> Vec<Box<dyn Strategy>> {
        self.strategies.iter().map(Into::into).collect()
    }
}

/// Outcome of [`Runner::run`]. Records produced before an abort are kept.
#[derive(Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub records: Vec<PipelineRecord>,
    pub abort: Option<PipelineError>,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.abort.is_none()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_records(&self.records)
    }
}

/// Enabled fallback-path validators, contradiction first.
pub fn build_validators(config: &VigilConfig, client: Arc<Client>) -> Vec<Box<dyn Validator>> {
    let mut validators: Vec<Box<dyn Validator>> = Vec::new();

    let nli = &config.validation.nli;
    if nli.enabled {
        let classifier = HostedClassifier::new(&nli.endpoint(), Arc::clone(&client));
        validators.push(Box::new(ContradictionValidator::new(Arc::new(classifier))));
    }

    let factuality = &config.validation.factuality;
    if factuality.enabled {
        let classifier = HostedClassifier::new(&factuality.endpoint(), client);
        validators.push(Box::new(FactualityValidator::new(
            Arc::new(classifier),
            &factuality.consistent_label,
            factuality.threshold,
        )));
    }

    validators
}

/// Runner wired to the configured provider, strategy chain and classifiers.
pub fn build_runner(config: &VigilConfig, client: Arc<Client>) -> Runner {
    let agent = OpenAIAgent::from_config(&config.provider, Arc::clone(&client));
    let adapter = GenerationAdapter::new(Arc::new(agent));

    let runner = build_validators(config, client)
        .into_iter()
        .fold(Runner::new(adapter, RunConfig::from_config(config)), |runner, validator| {
            runner.with_validator(validator)
        })
        .with_content_logging(config.logging.enable_content_logging);

    tracing::debug!(
        strategies = runner.scheduler().strategy_count(),
        validators = ?runner.scheduler().validator_names(),
        "Runner built"
    );
    runner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_PROMPT_LIMIT;

    #[test]
    fn run_config_resolves_model_and_clamps_limit() {
        let mut config = VigilConfig::default();
        config.generation.model = "not-a-model".to_string();
        config.generation.seed = Some(42);
        config.runner.prompt_limit = 5_000;
        config.runner.min_interval_ms = 250;

        let run = RunConfig::from_config(&config);

        assert_eq!(run.model, "gpt-4.1-nano");
        assert_eq!(run.seed, Some(42));
        assert_eq!(run.prompt_limit, MAX_PROMPT_LIMIT);
        assert_eq!(run.min_interval, Duration::from_millis(250));
        assert_eq!(run.build_strategies().len(), 2);
    }

    #[test]
    fn runner_registers_enabled_validators_in_order() {
        let mut config = VigilConfig::default();
        config.validation.factuality.enabled = true;
        let client = Arc::new(Client::new());

        let runner = build_runner(&config, client);
        assert_eq!(
            runner.scheduler().validator_names(),
            vec!["contradiction", "factuality"]
        );
    }

    #[test]
    fn runner_without_validators() {
        let mut config = VigilConfig::default();
        config.validation.nli.enabled = false;

        let runner = build_runner(&config, Arc::new(Client::new()));
        assert!(runner.scheduler().validator_names().is_empty());
        assert_eq!(runner.scheduler().strategy_count(), 2);
    }

    #[test]
    fn runner_uses_configured_chain() {
        let mut config = VigilConfig::default();
        config.routing.strategies = vec![StrategyConfig::DirectResponse];

        let runner = build_runner(&config, Arc::new(Client::new()));
        assert_eq!(runner.scheduler().strategy_count(), 1);
        assert_eq!(runner.config().strategies, config.routing.strategies);
    }

    #[test]
    fn report_summary_reflects_records() {
        let report = RunReport {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            records: vec![PipelineRecord::errored(0, "p", "m", 0.1, "boom".to_string())],
            abort: Some(PipelineError::BudgetExhausted { budget: 1 }),
        };
        assert!(!report.is_complete());
        assert_eq!(report.summary().errors, 1);
    }
}
