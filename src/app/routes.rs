// ==========================================
// 实验室设备管理系统 - HTTP 路由层
// ==========================================
// 职责: axum 路由装配、ApiError → HTTP 状态码/JSON 信封映射
// 信封契约:
// - 400 { "error": "Missing fields" } / { "error": <消息> }
// - 404 { "error": <消息> }
// - 409 { "error": "Conflict", "conflicts": [...] }
// - 500 { "error": <消息> }（传感器代理为 { "error", "details" }）
// ==========================================

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::api::error::{ApiError, ApiResult};
use crate::api::{CreateLoanRequest, UpsertItemRequest};
use crate::app::state::AppState;
use crate::proxy::sensor_gateway::{
    SensorGatewayError, CURRENT_READINGS_PATH, READING_HISTORY_PATH, STATIONS_PATH,
};

/// 装配路由
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        // 借用
        .route("/api/loans", get(list_loans).post(create_loan))
        .route("/api/loans/{id}", axum::routing::delete(delete_loan))
        // 设备台账
        .route("/api/items", get(list_items).post(create_item))
        .route(
            "/api/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        // 目录
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", get(get_user))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{id}", get(get_project))
        // 传感器代理
        .route("/api/sensors/current", get(sensor_current))
        .route("/api/sensors/history", get(sensor_history))
        .route("/api/sensors/stations", get(sensor_stations))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ==========================================
// 错误映射
// ==========================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // 固定信封，对齐对外契约
            ApiError::MissingFields => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing fields" }),
            ),
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::LoanConflict { conflicts } => (
                StatusCode::CONFLICT,
                json!({ "error": "Conflict", "conflicts": conflicts }),
            ),
            // 其余一律 500，上游消息原样透出
            err => {
                tracing::error!("请求处理失败: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": err.to_string() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// 数据库访问为阻塞调用，统一挪到 blocking 线程池执行
async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::InternalError(format!("阻塞任务执行失败: {}", e)))?
}

// ==========================================
// 健康检查
// ==========================================

async fn health() -> &'static str {
    "OK"
}

// ==========================================
// 借用
// ==========================================

async fn list_loans(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let api = state.loan_api.clone();
    let loans = run_blocking(move || api.list_loans()).await?;
    Ok(Json(json!({ "loans": loans })).into_response())
}

async fn create_loan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateLoanRequest>,
) -> ApiResult<Response> {
    let api = state.loan_api.clone();
    let loan = run_blocking(move || api.create_loan(request)).await?;
    Ok((StatusCode::CREATED, Json(json!({ "loan": loan }))).into_response())
}

async fn delete_loan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Response> {
    let api = state.loan_api.clone();
    run_blocking(move || api.delete_loan(id)).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

// ==========================================
// 设备台账
// ==========================================

async fn list_items(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let api = state.inventory_api.clone();
    let items = run_blocking(move || api.list_items()).await?;
    Ok(Json(json!({ "items": items })).into_response())
}

async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let api = state.inventory_api.clone();
    let item = run_blocking(move || api.get_item(&id)).await?;
    Ok(Json(json!({ "item": item })).into_response())
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpsertItemRequest>,
) -> ApiResult<Response> {
    let api = state.inventory_api.clone();
    let item = run_blocking(move || api.create_item(request)).await?;
    Ok((StatusCode::CREATED, Json(json!({ "item": item }))).into_response())
}

async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<UpsertItemRequest>,
) -> ApiResult<Response> {
    let api = state.inventory_api.clone();
    let item = run_blocking(move || api.update_item(&id, request)).await?;
    Ok(Json(json!({ "item": item })).into_response())
}

async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let api = state.inventory_api.clone();
    run_blocking(move || api.delete_item(&id)).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

// ==========================================
// 目录
// ==========================================

async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let api = state.user_api.clone();
    let users = run_blocking(move || api.list_users()).await?;
    Ok(Json(json!({ "users": users })).into_response())
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let api = state.user_api.clone();
    let user = run_blocking(move || api.get_user(&id)).await?;
    Ok(Json(json!({ "user": user })).into_response())
}

async fn list_projects(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let api = state.project_api.clone();
    let projects = run_blocking(move || api.list_projects()).await?;
    Ok(Json(json!({ "projects": projects })).into_response())
}

async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let api = state.project_api.clone();
    let project = run_blocking(move || api.get_project(&id)).await?;
    Ok(Json(json!({ "project": project })).into_response())
}

// ==========================================
// 传感器代理
// ==========================================
// 透传上游 JSON；响应带 Cache-Control: no-store（遥测数据不缓存）

async fn sensor_current(State(state): State<Arc<AppState>>) -> Response {
    relay_sensor(&state, CURRENT_READINGS_PATH).await
}

async fn sensor_history(State(state): State<Arc<AppState>>) -> Response {
    relay_sensor(&state, READING_HISTORY_PATH).await
}

async fn sensor_stations(State(state): State<Arc<AppState>>) -> Response {
    relay_sensor(&state, STATIONS_PATH).await
}

/// 透传一个上游路径；失败映射为 500 { error, details }
async fn relay_sensor(state: &AppState, path: &str) -> Response {
    match state.sensor_gateway.fetch_json(path).await {
        Ok(payload) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, "no-store")],
            Json(payload),
        )
            .into_response(),
        Err(SensorGatewayError::Upstream { details }) => {
            tracing::error!("传感器代理失败: path={}, details={}", path, details);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Sensor upstream request failed",
                    "details": details,
                })),
            )
                .into_response()
        }
    }
}
