//! Mean token entropy of a completion.

use serde_json::Value;

/// Average per-token Shannon term `-p·ln(p)` over `choices[0].logprobs.content`.
///
/// `p` is recovered from each entry's `logprob`. The denominator counts only
/// entries that carried a numeric `logprob`; entries whose probability is not
/// strictly positive add nothing to the sum but still count. Positive
/// log-probabilities are clamped to zero (`p = 1`).
///
/// Returns `None` when the response carries no log-probability data at all,
/// which is distinct from `Some(0.0)` (a fully confident response).
///
/// ```
/// use serde_json::json;
/// use vigil::features::mean_token_entropy;
///
/// let raw = json!({"choices": [{"logprobs": {"content": [{"token": "4", "logprob": 0.0}]}}]});
/// assert_eq!(mean_token_entropy(&raw), Some(0.0));
/// assert_eq!(mean_token_entropy(&json!({"choices": [{}]})), None);
/// ```
pub fn mean_token_entropy(raw: &Value) -> Option<f64> {
    let tokens = raw
        .pointer("/choices/0/logprobs/content")
        .and_then(Value::as_array)?;

    let mut total = 0.0;
    let mut counted = 0usize;
    for token in tokens {
        let Some(logprob) = token.get("logprob").and_then(Value::as_f64) else {
            continue;
        };
        counted += 1;
        total += token_entropy(logprob);
    }

    if counted == 0 {
        return None;
    }
    Some(total / counted as f64)
}

fn token_entropy(logprob: f64) -> f64 {
    if logprob.is_nan() {
        return 0.0;
    }
    let logprob = logprob.min(0.0);
    let p = logprob.exp();
    if p > 0.0 {
        -p * logprob
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn response_with(logprobs: Vec<Value>) -> Value {
        json!({
            "choices": [{
                "message": {"role": "assistant", "content": "x"},
                "logprobs": {"content": logprobs}
            }]
        })
    }

    #[test]
    fn no_logprobs_is_none() {
        assert_eq!(mean_token_entropy(&json!({})), None);
        assert_eq!(mean_token_entropy(&json!({"choices": []})), None);
        assert_eq!(
            mean_token_entropy(&json!({"choices": [{"logprobs": null}]})),
            None
        );
        assert_eq!(mean_token_entropy(&response_with(vec![])), None);
    }

    #[test]
    fn entries_without_logprob_values_is_none() {
        let raw = response_with(vec![json!({"token": "a"}), json!({"token": "b", "logprob": null})]);
        assert_eq!(mean_token_entropy(&raw), None);
    }

    #[test]
    fn certain_single_token_is_zero() {
        let raw = response_with(vec![json!({"token": "4", "logprob": 0.0})]);
        assert_eq!(mean_token_entropy(&raw), Some(0.0));
    }

    #[test]
    fn averages_over_present_logprobs_only() {
        let half = 0.5f64.ln();
        let raw = response_with(vec![
            json!({"token": "a", "logprob": half}),
            json!({"token": "b", "logprob": 0.0}),
            json!({"token": "c"}),
        ]);

        let expected = (-0.5 * half) / 2.0;
        let entropy = mean_token_entropy(&raw).unwrap();
        assert!((entropy - expected).abs() < 1e-12);
    }

    #[test]
    fn zero_probability_counts_in_denominator() {
        let half = 0.5f64.ln();
        let raw = response_with(vec![
            json!({"token": "a", "logprob": half}),
            json!({"token": "b", "logprob": -1.0e308}),
        ]);

        let expected = (-0.5 * half) / 2.0;
        let entropy = mean_token_entropy(&raw).unwrap();
        assert!((entropy - expected).abs() < 1e-12);
    }

    #[test]
    fn positive_logprob_clamped() {
        let raw = response_with(vec![json!({"token": "a", "logprob": 0.7})]);
        assert_eq!(mean_token_entropy(&raw), Some(0.0));
    }

    #[test]
    fn malformed_payload_is_none() {
        assert_eq!(mean_token_entropy(&json!("not an object")), None);
        assert_eq!(
            mean_token_entropy(&json!({"choices": [{"logprobs": {"content": "oops"}}]})),
            None
        );
    }

    proptest! {
        #[test]
        fn entropy_is_finite_and_non_negative(logprobs in prop::collection::vec(-50.0f64..=0.0, 1..64)) {
            let raw = response_with(logprobs.iter().map(|lp| json!({"logprob": lp})).collect());
            let entropy = mean_token_entropy(&raw).unwrap();
            prop_assert!(entropy.is_finite());
            prop_assert!(entropy >= 0.0);
            // -p ln p peaks at 1/e
            prop_assert!(entropy <= (-1.0f64).exp() + 1e-12);
        }
    }
}
