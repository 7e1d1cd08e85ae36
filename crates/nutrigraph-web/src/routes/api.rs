//! REST API endpoints over the loaded graph.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use nutrigraph_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Health response. Always `200`, whatever the load status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: LoadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: state.status(),
        error: state.session().error().map(str::to_string),
    })
}

/// The whole graph as loaded.
pub async fn get_graph(State(state): State<AppState>) -> ApiResult<GraphData> {
    let store = state.store()?;
    Ok(Json(store.data().clone()))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub async fn search_nodes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<Node>> {
    let store = state.store()?;
    Ok(Json(search(&store, &params.q).into_iter().cloned().collect()))
}

pub async fn get_node(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<NodeDetails> {
    let store = state.store()?;
    let details = node_details(&store, &id).ok_or_else(|| NutriError::node_not_found(&id))?;
    Ok(Json(details))
}

/// Subgraph query parameters. Empty values mean "no restriction".
#[derive(Debug, Deserialize)]
pub struct SubgraphParams {
    #[serde(default, rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub group: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubgraphResponse {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub counts: TypeCounts,
}

pub async fn get_subgraph(
    State(state): State<AppState>,
    Query(params): Query<SubgraphParams>,
) -> ApiResult<SubgraphResponse> {
    let node_type: TypeFilter = params
        .node_type
        .parse()
        .map_err(|reason: String| NutriError::invalid_config("type", &params.node_type, reason))?;
    let store = state.store()?;

    let view = SubgraphFilter::new(node_type, params.group).apply(store.data());
    let counts = view.type_counts();
    Ok(Json(SubgraphResponse {
        nodes: view.nodes,
        links: view.links,
        counts,
    }))
}

#[derive(Debug, Serialize)]
pub struct NeighborsResponse {
    pub id: NodeId,
    /// Includes `id` itself. Sorted.
    pub neighbors: Vec<NodeId>,
    pub connectivity: usize,
}

pub async fn get_neighbors(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<NeighborsResponse> {
    let store = state.store()?;
    if !store.contains(&id) {
        return Err(NutriError::node_not_found(&id).into());
    }
    let index = ConnectivityIndex::build(&store);

    let mut neighbors: Vec<NodeId> = index.neighbors_of(&id).into_iter().collect();
    neighbors.sort();
    Ok(Json(NeighborsResponse {
        connectivity: index.connectivity_count(&id),
        id: NodeId::from(id),
        neighbors,
    }))
}

/// Recommendation request body.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub targets: Vec<NodeId>,
    #[serde(default)]
    pub directions: HashMap<NodeId, Direction>,
    #[serde(default)]
    pub default_direction: Direction,
    #[serde(default = "default_limit_preview")]
    pub limit_preview: usize,
}

fn default_limit_preview() -> usize {
    ScoringWeights::default().limit_preview
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    #[serde(flatten)]
    pub set: RecommendationSet,
    pub summary: RecommendationSummary,
}

pub async fn recommend_foods(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> ApiResult<RecommendResponse> {
    let store = state.store()?;
    let query = RecommendQuery {
        targets: req.targets,
        directions: req.directions,
        default_direction: req.default_direction,
    };
    let weights = ScoringWeights {
        limit_preview: req.limit_preview,
        ..ScoringWeights::default()
    };

    let set = recommend_with(&store, &query, &weights);
    let summary = set.summary();
    Ok(Json(RecommendResponse { set, summary }))
}

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_top() -> usize {
    8
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CatalogStats,
    pub top_foods: Vec<RankedNode>,
    pub top_biomarkers: Vec<RankedNode>,
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> ApiResult<StatsResponse> {
    let store = state.store()?;
    let index = ConnectivityIndex::build(&store);
    Ok(Json(StatsResponse {
        stats: catalog_stats(&store),
        top_foods: top_connected(&store, &index, NodeType::Food, params.top),
        top_biomarkers: top_connected(&store, &index, NodeType::Biomarker, params.top),
    }))
}

#[derive(Debug, Serialize)]
pub struct GroupsResponse {
    pub foods: Vec<GroupCount>,
    pub biomarkers: Vec<GroupCount>,
}

pub async fn get_groups(State(state): State<AppState>) -> ApiResult<GroupsResponse> {
    let store = state.store()?;
    Ok(Json(GroupsResponse {
        foods: groups(&store, NodeType::Food),
        biomarkers: groups(&store, NodeType::Biomarker),
    }))
}

pub async fn get_papers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<PaperEntry>> {
    let store = state.store()?;
    Ok(Json(search_papers(&store, &params.q)))
}

pub async fn get_food_evidence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<EvidenceEntry>> {
    let store = state.store()?;
    if store.food(&id).is_none() {
        return Err(NutriError::node_not_found(&id).into());
    }
    Ok(Json(food_evidence(&store, &id)))
}

pub async fn get_biomarker_evidence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<EvidenceEntry>> {
    let store = state.store()?;
    if !store.node_by_id(&id).is_some_and(Node::is_biomarker) {
        return Err(NutriError::node_not_found(&id).into());
    }
    Ok(Json(biomarker_evidence(&store, &id)))
}

#[derive(Debug, Deserialize)]
pub struct QuickParams {
    #[serde(default = "default_quick")]
    pub n: usize,
}

fn default_quick() -> usize {
    10
}

pub async fn get_quick_biomarkers(
    State(state): State<AppState>,
    Query(params): Query<QuickParams>,
) -> ApiResult<Vec<RankedNode>> {
    let store = state.store()?;
    Ok(Json(quick_biomarkers(&store, params.n)))
}
