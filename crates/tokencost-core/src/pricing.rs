use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::benchmark::BenchmarkRecord;
use crate::error::{Result, TcError};

/// Upstream prices are USD per token; everything here is USD per 1M tokens.
pub const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// A live price entry from the external model catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRecord {
    pub name: String,
    pub model: String,
    #[serde(rename = "inputCost")]
    pub input_cost: f64,
    #[serde(rename = "outputCost")]
    pub output_cost: f64,
}

/// Parse a catalog response body (`{"data": [...]}`).
///
/// The body must carry a `data` array. Entries that are not objects or
/// have neither `name` nor `id` are dropped.
pub fn parse_pricing(body: &Value) -> Result<Vec<PricingRecord>> {
    let data = body
        .get("data")
        .and_then(|v| v.as_array())
        .ok_or_else(|| TcError::Other("pricing response has no `data` array".into()))?;
    Ok(data.iter().filter_map(parse_entry).collect())
}

fn parse_entry(entry: &Value) -> Option<PricingRecord> {
    let id = entry
        .get("id")
        .or_else(|| entry.get("model"))
        .and_then(|v| v.as_str());
    let name = entry.get("name").and_then(|v| v.as_str()).or(id)?;
    let pricing = entry.get("pricing");

    Some(PricingRecord {
        name: name.to_string(),
        model: id.unwrap_or(name).to_string(),
        input_cost: per_million(pricing.and_then(|p| p.get("prompt"))),
        output_cost: per_million(pricing.and_then(|p| p.get("completion"))),
    })
}

/// Per-token price (string-encoded upstream) scaled to per-1M. Unparseable is 0.
fn per_million(v: Option<&Value>) -> f64 {
    let per_token = match v {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };
    per_token
        .filter(|p| p.is_finite())
        .map(|p| p * TOKENS_PER_MILLION)
        .unwrap_or(0.0)
}

/// Overwrite catalog costs with live prices, joined on lowercased name.
///
/// When several pricing records share a name the last one wins. Records
/// without a match come back unchanged.
pub fn merge(mut benchmarks: Vec<BenchmarkRecord>, pricing: &[PricingRecord]) -> Vec<BenchmarkRecord> {
    let by_name: HashMap<String, &PricingRecord> = pricing
        .iter()
        .map(|p| (p.name.to_lowercase(), p))
        .collect();

    for rec in &mut benchmarks {
        if let Some(p) = by_name.get(&rec.key()) {
            rec.input_cost = Some(p.input_cost.into());
            rec.output_cost = Some(p.output_cost.into());
        }
    }
    benchmarks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::Field;
    use serde_json::json;

    fn price(name: &str, input: f64, output: f64) -> PricingRecord {
        PricingRecord {
            name: name.to_string(),
            model: name.to_lowercase(),
            input_cost: input,
            output_cost: output,
        }
    }

    fn bench(name: &str) -> BenchmarkRecord {
        BenchmarkRecord {
            name: Some(name.into()),
            input_cost: Some(Field::Typed(1.0)),
            output_cost: Some(Field::Typed(2.0)),
            ..Default::default()
        }
    }

    #[test]
    fn per_million_parses_strings_and_numbers() {
        assert!((per_million(Some(&json!("0.000003"))) - 3.0).abs() < 1e-9);
        assert!((per_million(Some(&json!(0.000015))) - 15.0).abs() < 1e-9);
        assert_eq!(per_million(Some(&json!("n/a"))), 0.0);
        assert_eq!(per_million(Some(&json!(null))), 0.0);
        assert_eq!(per_million(None), 0.0);
    }

    #[test]
    fn merge_last_duplicate_wins() {
        let merged = merge(
            vec![bench("GPT-4o")],
            &[price("gpt-4o", 5.0, 15.0), price("GPT-4O", 2.5, 10.0)],
        );
        assert_eq!(merged[0].input_cost(), 2.5);
        assert_eq!(merged[0].output_cost(), 10.0);
    }

    #[test]
    fn merge_leaves_unmatched_untouched() {
        let original = bench("Llama 3.1 405B");
        let merged = merge(vec![original.clone()], &[price("Mistral Large", 2.0, 6.0)]);
        assert_eq!(merged, vec![original]);
    }

    #[test]
    fn merge_with_no_pricing_is_identity() {
        let input = vec![bench("a"), bench("b")];
        assert_eq!(merge(input.clone(), &[]), input);
    }

    #[test]
    fn merge_sets_costs_on_records_without_them() {
        let rec = BenchmarkRecord {
            name: Some("Gemini 1.5 Pro".into()),
            ..Default::default()
        };
        let merged = merge(vec![rec], &[price("gemini 1.5 pro", 1.25, 5.0)]);
        assert_eq!(merged[0].input_cost(), 1.25);
        assert_eq!(merged[0].output_cost(), 5.0);
    }
}
