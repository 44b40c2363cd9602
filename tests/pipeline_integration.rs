//! End-to-end pipeline tests against scripted agents.

mod common;

use common::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use vigil::agent::{AgentError, ChatMessage};
use vigil::generation::GenerationResult;
use vigil::pipeline::PipelineError;
use vigil::routing::{RoutingDecision, Scheduler};
use vigil::validation::{ContradictionValidator, NliLabel, ValidationVerdict};

fn result_with_entropy(prompt: &str, answer: &str, entropy: Option<f64>) -> GenerationResult {
    GenerationResult {
        text: answer.to_string(),
        raw: json!({}),
        entropy,
        tool_flag: false,
        messages: vec![ChatMessage::user(prompt)],
        latency: 0.1,
    }
}

fn scheduler_for(threshold: f64) -> Scheduler {
    Scheduler::new(entropy_chain(threshold).iter().map(Into::into).collect())
}

// Low-entropy answer is accepted directly and never reaches the classifier
#[tokio::test]
async fn test_low_entropy_scenario_is_direct() {
    let classifier = Arc::new(FixedClassifier::new("contradiction", 0.9));
    let scheduler = scheduler_for(0.5)
        .with_validator(Box::new(ContradictionValidator::new(classifier.clone())));

    let outcome = scheduler
        .dispatch(&result_with_entropy("2+2=?", "4", Some(0.2)))
        .await;

    assert_eq!(outcome.decision, RoutingDecision::DirectResponse);
    assert_eq!(outcome.verdict, ValidationVerdict::default());
    assert!(outcome.verdict.nli_scores.is_empty());
    assert!(classifier.inputs().is_empty());
}

// High-entropy answer contradicted by NLI is flagged with the full score map
#[tokio::test]
async fn test_high_entropy_contradiction_scenario() {
    let classifier = Arc::new(FixedClassifier::new("contradiction", 0.9));
    let scheduler = scheduler_for(0.5)
        .with_validator(Box::new(ContradictionValidator::new(classifier.clone())));

    let outcome = scheduler
        .dispatch(&result_with_entropy("X", "not X", Some(0.8)))
        .await;

    assert_eq!(outcome.decision.as_str(), "fallback_validation");
    assert!(outcome.verdict.contradiction_flag);
    assert_eq!(outcome.verdict.nli_scores[&NliLabel::Entailment], 0.0);
    assert_eq!(outcome.verdict.nli_scores[&NliLabel::Neutral], 0.0);
    assert_eq!(outcome.verdict.nli_scores[&NliLabel::Contradiction], 0.9);
    assert_eq!(classifier.inputs(), vec!["X [SEP] not X".to_string()]);
}

// Quota error on prompt 3 of 5 keeps the first two records and aborts
#[tokio::test]
async fn test_quota_exceeded_aborts_run() {
    let agent = Arc::new(ScriptedAgent::new(vec![
        Ok(completion("a", &[CONFIDENT_LOGPROB])),
        Ok(completion("b", &[CONFIDENT_LOGPROB])),
        Err(AgentError::QuotaExceeded("monthly limit".to_string())),
    ]));
    let mut runner = runner_with(agent.clone(), entropy_chain(0.5), run_config());

    let report = runner.run(&prompts(&["p1", "p2", "p3", "p4", "p5"])).await;

    assert_eq!(report.records.len(), 2);
    assert_eq!(
        report.abort,
        Some(PipelineError::QuotaExceeded("monthly limit".to_string()))
    );
    assert_eq!(agent.calls(), 3);
    assert!(report.records.iter().all(|r| !r.is_error()));
}

// Generic error on prompt 2 of 3 is recorded and the run continues
#[tokio::test(start_paused = true)]
async fn test_transient_error_is_recorded_and_run_continues() {
    let agent = Arc::new(
        ScriptedAgent::new(vec![
            Ok(completion("a", &[CONFIDENT_LOGPROB])),
            Err(AgentError::Upstream {
                status: 500,
                message: "internal".to_string(),
            }),
            Ok(completion("c", &[CONFIDENT_LOGPROB])),
        ])
        .with_delay(Duration::from_millis(250)),
    );
    let mut runner = runner_with(agent.clone(), entropy_chain(0.5), run_config());

    let report = runner.run(&prompts(&["p1", "p2", "p3"])).await;

    assert!(report.is_complete());
    assert_eq!(report.records.len(), 3);

    let failed = &report.records[1];
    assert_eq!(failed.routing_decision, RoutingDecision::Error);
    assert_eq!(failed.prompt, "p2");
    assert!(failed.entropy.is_none());
    assert!(!failed.contradiction_flag);
    assert!(failed.nli_scores.is_empty());
    assert_eq!(failed.latency, 0.25);
    assert_eq!(failed.error.as_deref(), Some("Backend error 500: internal"));

    assert_eq!(report.records[2].answer, "c");
    assert_eq!(
        report.records.iter().map(|r| r.index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

// Budget of two stops the third call before it is issued
#[tokio::test]
async fn test_budget_exhaustion_aborts_before_call() {
    let agent = Arc::new(ScriptedAgent::new(vec![]));
    let mut config = run_config();
    config.call_budget = 2;
    let mut runner = runner_with(agent.clone(), vec![], config);

    let report = runner.run(&prompts(&["a", "b", "c", "d"])).await;

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.abort, Some(PipelineError::BudgetExhausted { budget: 2 }));
    assert_eq!(agent.calls(), 2);
    assert_eq!(runner.budget().remaining(), 0);
}

// Errored calls still consume budget
#[tokio::test]
async fn test_errored_calls_consume_budget() {
    let agent = Arc::new(ScriptedAgent::new(vec![
        Err(AgentError::Timeout(1000)),
        Err(AgentError::Network("refused".to_string())),
    ]));
    let mut config = run_config();
    config.call_budget = 2;
    let mut runner = runner_with(agent, vec![], config);

    let report = runner.run(&prompts(&["a", "b", "c"])).await;

    assert_eq!(report.records.len(), 2);
    assert!(report.records.iter().all(|r| r.is_error()));
    assert!(matches!(report.abort, Some(PipelineError::BudgetExhausted { .. })));
}

// Pacing: N prompts take (N - 1) intervals of waiting plus call time
#[tokio::test(start_paused = true)]
async fn test_rate_limit_spaces_calls() {
    let agent = Arc::new(ScriptedAgent::new(vec![]));
    let mut config = run_config();
    config.min_interval = Duration::from_secs(1);
    let mut runner = runner_with(agent, vec![], config);

    let start = Instant::now();
    let report = runner.run(&prompts(&["a", "b", "c"])).await;

    assert_eq!(report.records.len(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(2));
}

// Only uncertain answers go down the validation path
#[tokio::test]
async fn test_routing_follows_generated_entropy() {
    let agent = Arc::new(ScriptedAgent::new(vec![
        Ok(completion("sure", &[CONFIDENT_LOGPROB])),
        Ok(completion("maybe", &[UNCERTAIN_LOGPROB])),
        Ok(completion_without_logprobs("no data")),
    ]));
    let classifier = Arc::new(FixedClassifier::new("entailment", 0.7));
    let mut runner = runner_with(agent, entropy_chain(0.3), run_config())
        .with_validator(Box::new(ContradictionValidator::new(classifier.clone())));

    let report = runner.run(&prompts(&["q1", "q2", "q3"])).await;
    let decisions: Vec<_> = report
        .records
        .iter()
        .map(|r| r.routing_decision.as_str())
        .collect();

    assert_eq!(
        decisions,
        vec!["direct_response", "fallback_validation", "direct_response"]
    );
    assert_eq!(classifier.inputs(), vec!["q2 [SEP] maybe".to_string()]);
    assert_eq!(report.records[1].nli_scores.len(), 3);
    assert!(!report.records[1].contradiction_flag);
    assert!(report.records[2].entropy.is_none());

    let summary = report.summary();
    assert_eq!(summary.fallback_count, 1);
    assert_eq!(summary.contradiction_count, 0);
}

// Same seed, model and prompts against a deterministic agent serialize identically
#[tokio::test(start_paused = true)]
async fn test_runs_are_idempotent() {
    let items = prompts(&["Why is the sky blue?", "2+2=?", "Name a prime", "Define entropy"]);

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let classifier = Arc::new(FixedClassifier::new("neutral", 0.6));
        let mut runner = runner_with(Arc::new(EchoAgent), entropy_chain(0.2), run_config())
            .with_validator(Box::new(ContradictionValidator::new(classifier)));
        let report = runner.run(&items).await;
        outputs.push(serde_json::to_string(&report.records).unwrap());
    }

    assert_eq!(outputs[0], outputs[1]);
}

// Limit caps the number of prompts even when more are supplied
#[tokio::test]
async fn test_prompt_limit_respected() {
    let agent = Arc::new(ScriptedAgent::new(vec![]));
    let mut config = run_config();
    config.prompt_limit = 3;
    let mut runner = runner_with(agent.clone(), vec![], config);

    let items: Vec<String> = (0..10).map(|i| format!("prompt {}", i)).collect();
    let report = runner.run(&items).await;

    assert_eq!(report.records.len(), 3);
    assert_eq!(agent.calls(), 3);
}

// Empty input produces an empty, complete report
#[tokio::test]
async fn test_empty_prompt_list() {
    let agent = Arc::new(ScriptedAgent::new(vec![]));
    let mut runner = runner_with(agent.clone(), entropy_chain(0.5), run_config());

    let report = runner.run(&[]).await;

    assert!(report.is_complete());
    assert!(report.records.is_empty());
    assert_eq!(agent.calls(), 0);
}
