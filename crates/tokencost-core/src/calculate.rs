use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pricing::TOKENS_PER_MILLION;

const UNKNOWN: &str = "Unknown";

/// Body of a cost calculation request.
///
/// Fields are kept as raw JSON: bad numbers are coerced to 0 instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CostRequest {
    #[serde(default)]
    pub input_tokens: Value,
    #[serde(default)]
    pub output_tokens: Value,
    #[serde(default)]
    pub custom_providers: Vec<Value>,
}

/// Cost breakdown for one provider, in USD rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub provider: String,
    pub model: String,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

/// Per-provider costs, in the order the providers were given.
pub fn calculate(req: &CostRequest) -> Vec<CostResult> {
    let input_tokens = token_count(&req.input_tokens);
    let output_tokens = token_count(&req.output_tokens);

    req.custom_providers
        .iter()
        .map(|p| {
            let input_cost = cost(input_tokens, rate(p.get("inputCost")));
            let output_cost = cost(output_tokens, rate(p.get("outputCost")));
            CostResult {
                provider: label(p.get("name")),
                model: label(p.get("model")),
                input_cost,
                output_cost,
                total_cost: round2(input_cost + output_cost),
            }
        })
        .collect()
}

/// `tokens / 1M * rate_per_million`, rounded to two decimals.
pub fn cost(tokens: u64, rate_per_million: f64) -> f64 {
    round2(tokens as f64 / TOKENS_PER_MILLION * rate_per_million)
}

/// Two decimals, ties to even: 0.125 -> 0.12, 0.375 -> 0.38.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

fn number(v: Option<&Value>) -> Option<f64> {
    let n = match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|x| x.is_finite())
}

/// Token count: fractional values truncate, negatives clamp to 0.
fn token_count(v: &Value) -> u64 {
    number(Some(v)).map(|n| n.max(0.0) as u64).unwrap_or(0)
}

fn rate(v: Option<&Value>) -> f64 {
    number(v).unwrap_or(0.0)
}

fn label(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
