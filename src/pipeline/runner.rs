//! Sequential execution loop

use std::fmt;

use tokio::time::Instant;
use uuid::Uuid;

use super::{
    CallBudget, PipelineError, PipelineRecord, RateLimiter, RunConfig, RunReport,
};
use crate::agent::{AgentError, ChatMessage};
use crate::generation::{prompt_cache_key, GenerationAdapter, GenerationRequest};
use crate::logging::truncate_prompt;
use crate::routing::Scheduler;
use crate::validation::Validator;

/// Lifecycle of one prompt inside the loop, traced at `trace` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Pending,
    Generating,
    Generated,
    Errored,
    Routed,
    Validated,
    Direct,
    Recorded,
}

impl fmt::Display for PromptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PromptState::Pending => "pending",
            PromptState::Generating => "generating",
            PromptState::Generated => "generated",
            PromptState::Errored => "errored",
            PromptState::Routed => "routed",
            PromptState::Validated => "validated",
            PromptState::Direct => "direct",
            PromptState::Recorded => "recorded",
        };
        f.write_str(s)
    }
}

/// Drives prompts one at a time through generation, routing and validation.
///
/// The strategy chain is built from [`RunConfig::strategies`]. Budget and
/// rate limiter are per run and start fresh on every [`Runner::run`].
pub struct Runner {
    adapter: GenerationAdapter,
    scheduler: Scheduler,
    config: RunConfig,
    limiter: RateLimiter,
    budget: CallBudget,
    content_logging: bool,
}

impl Runner {
    pub fn new(adapter: GenerationAdapter, config: RunConfig) -> Self {
        Self {
            scheduler: Scheduler::new(config.build_strategies()),
            limiter: RateLimiter::new(config.min_interval),
            budget: CallBudget::new(config.call_budget),
            adapter,
            config,
            content_logging: false,
        }
    }

    /// Append a fallback-path validator. Registration order is run order.
    pub fn with_validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.scheduler = self.scheduler.with_validator(validator);
        self
    }

    /// Include truncated prompt text in per-prompt log events.
    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.content_logging = enabled;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Budget of the current or most recent run.
    pub fn budget(&self) -> &CallBudget {
        &self.budget
    }

    /// Process `prompts` in order until the prompt limit, the end of input,
    /// or a run-aborting error.
    pub async fn run(&mut self, prompts: &[String]) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = chrono::Utc::now();
        self.limiter = RateLimiter::new(self.config.min_interval);
        self.budget = CallBudget::new(self.config.call_budget);
        let limit = self.config.prompt_limit.min(prompts.len());
        let mut records = Vec::with_capacity(limit);
        let mut abort = None;

        tracing::info!(
            run_id = %run_id,
            model = %self.config.model,
            prompts = limit,
            call_budget = self.budget.limit(),
            interval_ms = self.config.min_interval.as_millis() as u64,
            "Run started"
        );

        for (index, prompt) in prompts.iter().take(limit).enumerate() {
            match self.process(index, prompt).await {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::error!(
                        run_id = %run_id,
                        index,
                        error = %e,
                        completed = records.len(),
                        "Run aborted"
                    );
                    abort = Some(e);
                    break;
                }
            }
        }

        tracing::info!(
            run_id = %run_id,
            records = records.len(),
            calls = self.budget.used(),
            aborted = abort.is_some(),
            "Run finished"
        );

        RunReport {
            run_id,
            started_at,
            records,
            abort,
        }
    }

    /// One prompt from `Pending` to `Recorded`. `Err` aborts the run.
    async fn process(&mut self, index: usize, prompt: &str) -> Result<PipelineRecord, PipelineError> {
        let preview = truncate_prompt(prompt, self.content_logging);
        trace_state(index, PromptState::Pending);

        self.limiter.wait().await;
        let call = self.budget.try_acquire()?;

        let request = self.build_request(prompt);
        trace_state(index, PromptState::Generating);
        metrics::counter!("vigil_generation_calls_total").increment(1);

        let start = Instant::now();
        let outcome = self.adapter.generate(&request).await;
        let elapsed = start.elapsed().as_secs_f64();
        metrics::histogram!("vigil_generation_latency_seconds").record(elapsed);

        let result = match outcome {
            Ok(result) => result,
            Err(AgentError::QuotaExceeded(message)) => {
                metrics::counter!("vigil_generation_errors_total", "kind" => "quota").increment(1);
                return Err(PipelineError::QuotaExceeded(message));
            }
            Err(e) => {
                metrics::counter!("vigil_generation_errors_total", "kind" => "transient")
                    .increment(1);
                trace_state(index, PromptState::Errored);
                tracing::warn!(
                    index,
                    call,
                    prompt = ?preview,
                    error = %e,
                    latency_ms = (elapsed * 1000.0) as u64,
                    "Generation failed, recording error and continuing"
                );
                let record =
                    PipelineRecord::errored(index, prompt, &self.config.model, elapsed, e.to_string());
                self.count_decision(&record);
                trace_state(index, PromptState::Recorded);
                return Ok(record);
            }
        };
        trace_state(index, PromptState::Generated);

        let routed = self.scheduler.dispatch(&result).await;
        trace_state(index, PromptState::Routed);
        trace_state(
            index,
            if routed.validated {
                PromptState::Validated
            } else {
                PromptState::Direct
            },
        );

        tracing::info!(
            index,
            call,
            prompt = ?preview,
            entropy = ?result.entropy,
            decision = %routed.decision,
            contradiction = routed.verdict.contradiction_flag,
            latency_ms = (result.latency * 1000.0) as u64,
            "Prompt processed"
        );

        let record = PipelineRecord::completed(index, prompt, &self.config.model, result, routed);
        self.count_decision(&record);
        trace_state(index, PromptState::Recorded);
        Ok(record)
    }

    fn build_request(&self, prompt: &str) -> GenerationRequest {
        let cache_key = self
            .config
            .cache_key
            .then(|| prompt_cache_key(&self.config.model, self.config.seed, prompt));

        GenerationRequest::new(self.config.model.clone(), vec![ChatMessage::user(prompt)])
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens)
            .with_seed(self.config.seed)
            .with_cache_key(cache_key)
    }

    fn count_decision(&self, record: &PipelineRecord) {
        metrics::counter!(
            "vigil_routing_decisions_total",
            "decision" => record.routing_decision.as_str(),
        )
        .increment(1);
    }
}

fn trace_state(index: usize, state: PromptState) {
    tracing::trace!(index, state = %state, "Prompt state");
}
