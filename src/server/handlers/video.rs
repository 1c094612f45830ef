use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    Result,
    model::{PlatformContext, VideoDetail, VideoInfo, VideoStream},
    server::{
        params::{HomeParams, RankingParams, RelatedParams, SearchParams, StreamParams},
        state::AppState,
    },
};

/// Handle GET /api/home.
pub async fn handle_home(
    State(state): State<AppState>,
    Query(params): Query<HomeParams>,
) -> Result<Json<Vec<VideoInfo>>> {
    let videos = state
        .service
        .get_home_recommendations(params.page_size, params.page)
        .await?;
    Ok(Json(videos))
}

/// Handle GET /api/videos/{id}.
pub async fn handle_video_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VideoDetail>> {
    tracing::info!("Video detail request: {}", id);
    Ok(Json(state.service.get_video_detail(&id).await?))
}

/// Handle GET /api/videos/{id}/stream.
pub async fn handle_video_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<StreamParams>,
) -> Result<Json<VideoStream>> {
    tracing::info!("Stream request: {} cid={} qn={}", id, params.cid, params.quality);
    let stream = state
        .service
        .get_video_stream(&id, params.quality, params.cid)
        .await?;
    Ok(Json(stream))
}

/// Handle GET /api/videos/{id}/related.
pub async fn handle_related(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<RelatedParams>,
) -> Result<Json<Vec<VideoInfo>>> {
    let videos = state
        .service
        .get_related_videos(&id, params.page_size)
        .await?;
    Ok(Json(videos))
}

/// Handle GET /api/ranking.
pub async fn handle_ranking(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> Result<Json<Vec<VideoInfo>>> {
    let videos = state
        .service
        .get_hot_ranking(params.category, params.day)
        .await?;
    Ok(Json(videos))
}

/// Handle GET /api/search.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<VideoInfo>>> {
    tracing::info!("Search request: {}", params.keyword);
    let videos = state
        .service
        .search_videos(&params.keyword, params.page, params.page_size)
        .await?;
    Ok(Json(videos))
}

/// Handle GET /api/context.
pub async fn handle_context(State(state): State<AppState>) -> Result<Json<PlatformContext>> {
    Ok(Json(state.service.get_platform_context().await?))
}
