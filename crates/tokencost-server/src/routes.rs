use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tokencost_core::calculate::{calculate as compute_costs, CostRequest, CostResult};
use tokencost_core::pricing::{merge, PricingRecord};
use tokencost_core::rank::{rank, Direction, SortKey};
use tokencost_core::{BenchmarkRecord, Metric};

use crate::error::ApiError;
use crate::AppState;

type Shared = State<Arc<AppState>>;

const DEFAULT_SORT_KEY: &str = "name";

pub async fn calculate(Json(req): Json<CostRequest>) -> Json<Vec<CostResult>> {
    Json(compute_costs(&req))
}

pub async fn pricing(State(state): Shared) -> Json<Vec<PricingRecord>> {
    Json(state.pricing.fetch_pricing_or_empty().await)
}

pub async fn benchmarks(
    State(state): Shared,
    Path(model_name): Path<String>,
) -> Result<Json<Vec<Metric>>, ApiError> {
    let catalog = state.catalog.clone();
    let metrics =
        tokio::task::spawn_blocking(move || catalog.find_benchmarks_by_name(&model_name))
            .await??;
    Ok(Json(metrics))
}

#[derive(Debug, Deserialize)]
pub struct TableParams {
    sort_key: Option<String>,
    direction: Option<String>,
}

pub async fn benchmark_table(
    State(state): Shared,
    Query(params): Query<TableParams>,
) -> Result<Json<Vec<BenchmarkRecord>>, ApiError> {
    let key: SortKey = params
        .sort_key
        .as_deref()
        .unwrap_or(DEFAULT_SORT_KEY)
        .parse::<SortKey>()
        .unwrap_or_else(|e| match e {});
    let direction: Direction = params
        .direction
        .as_deref()
        .map(|d| d.parse::<Direction>().unwrap_or_else(|e| match e {}))
        .unwrap_or_default();

    let catalog = state.catalog.clone();
    let records = tokio::task::spawn_blocking(move || catalog.load_benchmarks()).await??;
    let pricing = state.pricing.fetch_pricing_or_empty().await;

    let merged = merge(records, &pricing);
    tracing::debug!(?key, ?direction, count = merged.len(), "ranking benchmark table");
    Ok(Json(rank(merged, &key, direction)))
}
