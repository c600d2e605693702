use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use ci_core::views::{self, DatasetStatus, FilterOptions};
use ci_core::{Dataset, DatasetStore, Error, FilterCriteria, SessionId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppState;

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Selector values as sent by the dashboard; `All` or a missing value leaves
/// the dimension open.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub competitor: Option<String>,
    pub category: Option<String>,
    pub bu: Option<String>,
}

impl FilterParams {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_selections(self.competitor.as_deref(), self.category.as_deref(), self.bu.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub filename: String,
}

/// Either the view or the "nothing loaded yet" placeholder.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewResponse<T> {
    NoData { message: String },
    Ready { view: T },
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session: SessionId,
    pub status: DatasetStatus,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: DatasetStatus,
    pub message: String,
}

impl StatusResponse {
    fn of(dataset: Option<&Dataset>) -> Self {
        let status = DatasetStatus::of(dataset);
        Self {
            message: status.message(),
            status,
        }
    }
}

async fn dataset_for(state: &AppState, session: &str) -> Result<Option<Arc<Dataset>>, ApiError> {
    let id: SessionId = session.parse()?;
    Ok(state.store.current(&id).await?)
}

fn render<T, F>(dataset: Option<Arc<Dataset>>, view: F) -> Json<ViewResponse<T>>
where
    F: FnOnce(&Dataset) -> T,
{
    match dataset {
        Some(dataset) => Json(ViewResponse::Ready { view: view(dataset.as_ref()) }),
        None => Json(ViewResponse::NoData {
            message: DatasetStatus::NoData.message(),
        }),
    }
}

pub async fn open_session(State(state): State<Arc<AppState>>) -> ApiResult<SessionCreated> {
    let session = state.store.open_session().await?;
    let dataset = state.store.current(&session).await?;
    Ok(Json(SessionCreated {
        session,
        status: DatasetStatus::of(dataset.as_deref()),
    }))
}

pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: SessionId = session.parse()?;
    state.store.close_session(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn status(State(state): State<Arc<AppState>>, Path(session): Path<String>) -> ApiResult<StatusResponse> {
    let dataset = dataset_for(&state, &session).await?;
    Ok(Json(StatusResponse::of(dataset.as_deref())))
}

/// Replaces the session's dataset with the uploaded file. On failure the
/// previous dataset stays active.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> ApiResult<StatusResponse> {
    let id: SessionId = session.parse()?;
    let filename = params.filename;
    let loaded = tokio::task::spawn_blocking(move || ci_ingest::load_bytes(&filename, body.to_vec()))
        .await
        .map_err(|e| Error::External(e.into()))?;

    let dataset = state.store.replace_with(&id, loaded).await?;
    Ok(Json(StatusResponse::of(Some(dataset.as_ref()))))
}

pub async fn filters(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
) -> ApiResult<ViewResponse<FilterOptions>> {
    let dataset = dataset_for(&state, &session).await?;
    Ok(render(dataset, |d| FilterOptions::of(d).selectors()))
}

pub async fn major_moves(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Query(params): Query<FilterParams>,
) -> ApiResult<ViewResponse<views::MajorMoves>> {
    let dataset = dataset_for(&state, &session).await?;
    Ok(render(dataset, |d| views::major_moves(d, &params.criteria())))
}

pub async fn competitor_profile(
    State(state): State<Arc<AppState>>,
    Path((session, competitor)): Path<(String, String)>,
) -> ApiResult<ViewResponse<views::CompetitorProfile>> {
    let dataset = dataset_for(&state, &session).await?;
    Ok(render(dataset, |d| views::competitor_profile(d, &competitor)))
}

pub async fn business_unit_profile(
    State(state): State<Arc<AppState>>,
    Path((session, business_unit)): Path<(String, String)>,
) -> ApiResult<ViewResponse<views::BusinessUnitProfile>> {
    let dataset = dataset_for(&state, &session).await?;
    Ok(render(dataset, |d| views::business_unit_profile(d, &business_unit)))
}

pub async fn industry_updates(
    State(state): State<Arc<AppState>>,
    Path(session): Path<String>,
    Query(params): Query<FilterParams>,
) -> ApiResult<ViewResponse<views::IndustryUpdates>> {
    let dataset = dataset_for(&state, &session).await?;
    Ok(render(dataset, |d| views::industry_updates(d, &params.criteria())))
}
