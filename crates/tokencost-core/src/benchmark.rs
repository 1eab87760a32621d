use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

pub const DEFAULT_NAME: &str = "";
pub const DEFAULT_ORGANIZATION: &str = "";
pub const DEFAULT_LICENSE: &str = "";
pub const DEFAULT_PARAM_COUNT: f64 = 0.0;
pub const DEFAULT_CONTEXT_SIZE: f64 = 0.0;
/// USD per 1M tokens.
pub const DEFAULT_COST: f64 = 0.0;
pub const DEFAULT_MULTIMODAL: bool = false;
pub const DEFAULT_SCORE: f64 = 0.0;

/// A known catalog field: the expected type, or whatever JSON was there
/// instead. Off-type values are kept so they serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field<T> {
    Typed(T),
    Raw(Value),
}

impl<T> Field<T> {
    pub fn typed(&self) -> Option<&T> {
        match self {
            Field::Typed(v) => Some(v),
            Field::Raw(_) => None,
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(v: T) -> Self {
        Field::Typed(v)
    }
}

impl From<&str> for Field<String> {
    fn from(s: &str) -> Self {
        Field::Typed(s.to_string())
    }
}

/// Present keys, `null` included, become `Some`; only a missing key is `None`.
fn present<'de, D, T>(d: D) -> Result<Option<Field<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Field::deserialize(d).map(Some)
}

/// Loose JSON truthiness: `false`, `null`, `0`, `""`, `[]` and `{}` are false.
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// One model entry from the on-disk catalog (`model.json`).
///
/// Known fields are typed; everything else is kept in `extra` and written
/// back out untouched. A known field holding the wrong type is kept as
/// [`Field::Raw`]. The accessors below resolve absent or off-type values to
/// the `DEFAULT_*` constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Field<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub organization: Option<Field<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub license: Option<Field<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub param_count: Option<Field<Number>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub input_context_size: Option<Field<Number>>,
    #[serde(
        rename = "inputCost",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub input_cost: Option<Field<f64>>,
    #[serde(
        rename = "outputCost",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_cost: Option<Field<f64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub multimodal: Option<Field<bool>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub qualitative_metrics: Option<Field<Vec<Metric>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single benchmark score, e.g. `{"dataset_name": "GPQA", "score": 0.59}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub dataset_name: Option<Field<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub score: Option<Field<f64>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn text<'a>(f: &'a Option<Field<String>>, default: &'static str) -> &'a str {
    f.as_ref()
        .and_then(Field::typed)
        .map(String::as_str)
        .unwrap_or(default)
}

fn float(f: &Option<Field<f64>>, default: f64) -> f64 {
    f.as_ref().and_then(Field::typed).copied().unwrap_or(default)
}

fn number(f: &Option<Field<Number>>, default: f64) -> f64 {
    f.as_ref()
        .and_then(Field::typed)
        .and_then(Number::as_f64)
        .unwrap_or(default)
}

impl Metric {
    pub fn new(dataset_name: impl Into<String>, score: f64) -> Self {
        Self {
            dataset_name: Some(Field::Typed(dataset_name.into())),
            score: Some(Field::Typed(score)),
            extra: Map::new(),
        }
    }

    pub fn dataset_name(&self) -> &str {
        text(&self.dataset_name, "")
    }

    pub fn score(&self) -> f64 {
        float(&self.score, DEFAULT_SCORE)
    }
}

impl BenchmarkRecord {
    pub fn name(&self) -> &str {
        text(&self.name, DEFAULT_NAME)
    }

    pub fn organization(&self) -> &str {
        text(&self.organization, DEFAULT_ORGANIZATION)
    }

    pub fn license(&self) -> &str {
        text(&self.license, DEFAULT_LICENSE)
    }

    pub fn param_count(&self) -> f64 {
        number(&self.param_count, DEFAULT_PARAM_COUNT)
    }

    pub fn input_context_size(&self) -> f64 {
        number(&self.input_context_size, DEFAULT_CONTEXT_SIZE)
    }

    pub fn input_cost(&self) -> f64 {
        float(&self.input_cost, DEFAULT_COST)
    }

    pub fn output_cost(&self) -> f64 {
        float(&self.output_cost, DEFAULT_COST)
    }

    pub fn multimodal(&self) -> bool {
        match &self.multimodal {
            None => DEFAULT_MULTIMODAL,
            Some(Field::Typed(b)) => *b,
            Some(Field::Raw(v)) => truthy(v),
        }
    }

    /// Metrics list; empty when absent or not a list of objects.
    pub fn metrics(&self) -> &[Metric] {
        self.qualitative_metrics
            .as_ref()
            .and_then(Field::typed)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Score for `dataset`, matched case-insensitively. First entry wins.
    pub fn score(&self, dataset: &str) -> Option<f64> {
        self.metrics()
            .iter()
            .find(|m| m.dataset_name().eq_ignore_ascii_case(dataset))
            .map(Metric::score)
    }

    /// Lowercased name, the join key for pricing merges and lookups.
    pub fn key(&self) -> String {
        self.name().to_lowercase()
    }
}
