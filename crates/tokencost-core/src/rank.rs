use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

use crate::benchmark::{BenchmarkRecord, DEFAULT_SCORE};

/// Benchmark datasets the table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Gpqa,
    Mmlu,
    MmluPro,
    Drop,
    HumanEval,
}

impl Dataset {
    /// Name matched (ignoring case) against `dataset_name` in the catalog.
    pub fn dataset_name(self) -> &'static str {
        match self {
            Dataset::Gpqa => "GPQA",
            Dataset::Mmlu => "MMLU",
            Dataset::MmluPro => "MMLUPro",
            Dataset::Drop => "DROP",
            Dataset::HumanEval => "HumanEval",
        }
    }
}

/// Column the benchmark table is sorted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Organization,
    Name,
    License,
    Parameters,
    Context,
    InputCost,
    OutputCost,
    Benchmark(Dataset),
    Multimodal,
    /// Unrecognized key; every record sorts equal.
    Other(String),
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "organization" => SortKey::Organization,
            "name" => SortKey::Name,
            "license" => SortKey::License,
            "parameters" => SortKey::Parameters,
            "context" => SortKey::Context,
            "inputCost" => SortKey::InputCost,
            "outputCost" => SortKey::OutputCost,
            "GPQA" => SortKey::Benchmark(Dataset::Gpqa),
            "MMLU" => SortKey::Benchmark(Dataset::Mmlu),
            "MMLUPro" => SortKey::Benchmark(Dataset::MmluPro),
            "DROP" => SortKey::Benchmark(Dataset::Drop),
            "HumanEval" => SortKey::Benchmark(Dataset::HumanEval),
            "multimodal" => SortKey::Multimodal,
            other => SortKey::Other(other.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

impl FromStr for Direction {
    type Err = Infallible;

    /// `desc` in any case is descending, anything else ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Ok(Direction::Asc)
        }
    }
}

/// Comparable value extracted from a record for one sort key.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
}

impl SortValue {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            // A single key always yields one variant; keep numbers first regardless.
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl SortKey {
    pub fn value(&self, rec: &BenchmarkRecord) -> SortValue {
        match self {
            SortKey::Organization => SortValue::Text(rec.organization().to_lowercase()),
            SortKey::Name => SortValue::Text(rec.name().to_lowercase()),
            SortKey::License => SortValue::Text(rec.license().to_lowercase()),
            SortKey::Parameters => SortValue::Number(rec.param_count()),
            SortKey::Context => SortValue::Number(rec.input_context_size()),
            SortKey::InputCost => SortValue::Number(rec.input_cost()),
            SortKey::OutputCost => SortValue::Number(rec.output_cost()),
            SortKey::Benchmark(ds) => {
                SortValue::Number(rec.score(ds.dataset_name()).unwrap_or(DEFAULT_SCORE))
            }
            SortKey::Multimodal => SortValue::Number(if rec.multimodal() { 1.0 } else { 0.0 }),
            SortKey::Other(_) => SortValue::Text(String::new()),
        }
    }
}

/// Order records by `key`. Stable in both directions: ties keep input order.
pub fn rank(
    benchmarks: Vec<BenchmarkRecord>,
    key: &SortKey,
    direction: Direction,
) -> Vec<BenchmarkRecord> {
    let mut keyed: Vec<(SortValue, BenchmarkRecord)> = benchmarks
        .into_iter()
        .map(|rec| (key.value(&rec), rec))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match direction {
        Direction::Asc => a.compare(b),
        Direction::Desc => b.compare(a),
    });

    keyed.into_iter().map(|(_, rec)| rec).collect()
}
