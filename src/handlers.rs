use axum::extract::{FromRequest, Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use axum_extra::extract::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use chrono::Utc;
use serde::Deserialize;
use tracing::error;

use crate::{
    AppState,
    auth::verify_token,
    error::ApiError,
    i18n::Locale,
    models::{ClassInput, ClassSchedule},
    validation::validate_class,
};

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub locale: Option<String>,
}

/// `Json` whose rejections (missing fields, wrong types, bad content type)
/// answer as a JSON 400 like every other [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

#[utoipa::path(get, path = "/healthz/live", tag = "health")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/healthz/ready",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unavailable")
    ),
    tag = "health"
)]
pub async fn healthz_ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))),
        Err(err) => {
            error!(error = %err, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({"status": "unavailable"})),
            )
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "Active classes ordered by day of week and start time", body = [ClassSchedule]),
        (status = 500, description = "Failed to fetch classes")
    ),
    tag = "schedule"
)]
pub async fn list_classes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassSchedule>>, ApiError> {
    let classes = state
        .store
        .list_active()
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to fetch classes"))?;
    Ok(Json(classes))
}

#[utoipa::path(
    get,
    path = "/api/classes.ics",
    params(
        ("locale" = Option<String>, Query, description = "Locale for titles: en (default) or ru")
    ),
    responses(
        (status = 200, description = "Weekly classes as iCal feed", content_type = "text/calendar"),
        (status = 400, description = "Unsupported locale"),
        (status = 404, description = "No weekly classes")
    ),
    tag = "schedule"
)]
pub async fn get_ical(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let locale = match query.locale.as_deref() {
        Some(raw) => raw.parse::<Locale>().map_err(ApiError::BadRequest)?,
        None => Locale::default(),
    };

    let classes = state
        .store
        .list_active()
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to fetch classes"))?;

    let today = Utc::now().with_timezone(&state.settings.tz()).date_naive();
    let body = state.exporter.generate(&classes, locale, today);
    if body.is_empty() {
        return Err(ApiError::NotFound("No classes found".into()));
    }

    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar; charset=utf-8"),
            (
                "content-disposition",
                "attachment; filename=yoga_schedule.ics",
            ),
        ],
        body,
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/classes",
    params(
        ("token" = Option<String>, Query, description = "Authentication token (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "All classes including inactive ones", body = [ClassSchedule]),
        (status = 401, description = "Invalid authentication token")
    ),
    security((), ("bearer_auth" = []), ("query_token" = [])),
    tag = "admin"
)]
pub async fn list_all_classes(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Vec<ClassSchedule>>, ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_token(&state.settings, auth_header, query.token.as_deref())?;

    let classes = state
        .store
        .list_all()
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to fetch classes"))?;
    Ok(Json(classes))
}

#[utoipa::path(
    get,
    path = "/api/admin/classes/{id}",
    params(
        ("id" = String, Path, description = "Class identifier"),
        ("token" = Option<String>, Query, description = "Authentication token (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "The class", body = ClassSchedule),
        (status = 401, description = "Invalid authentication token"),
        (status = 404, description = "Class not found")
    ),
    security((), ("bearer_auth" = []), ("query_token" = [])),
    tag = "admin"
)]
pub async fn get_class(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<ClassSchedule>, ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_token(&state.settings, auth_header, query.token.as_deref())?;

    let class = state
        .store
        .get(&id)
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to fetch class"))?;
    Ok(Json(class))
}

#[utoipa::path(
    post,
    path = "/api/admin/classes",
    request_body = ClassInput,
    responses(
        (status = 201, description = "Class created", body = ClassSchedule),
        (status = 400, description = "Invalid class data"),
        (status = 401, description = "Invalid authentication token"),
        (status = 500, description = "Failed to create class")
    ),
    security((), ("bearer_auth" = []), ("query_token" = [])),
    tag = "admin"
)]
pub async fn create_class(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Query(query): Query<TokenQuery>,
    JsonBody(input): JsonBody<ClassInput>,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_token(&state.settings, auth_header, query.token.as_deref())?;

    let draft = validate_class(input)?;
    let created = state
        .store
        .create(&draft)
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to create class"))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/admin/classes/{id}",
    params(
        ("id" = String, Path, description = "Class identifier"),
        ("token" = Option<String>, Query, description = "Authentication token (alternative to Bearer header)")
    ),
    request_body = ClassInput,
    responses(
        (status = 200, description = "Class updated", body = ClassSchedule),
        (status = 400, description = "Invalid class data"),
        (status = 401, description = "Invalid authentication token"),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Failed to update class")
    ),
    security((), ("bearer_auth" = []), ("query_token" = [])),
    tag = "admin"
)]
pub async fn update_class(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
    JsonBody(input): JsonBody<ClassInput>,
) -> Result<Json<ClassSchedule>, ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_token(&state.settings, auth_header, query.token.as_deref())?;

    let draft = validate_class(input)?;
    let updated = state
        .store
        .update(&id, &draft)
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to update class"))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/admin/classes/{id}",
    params(
        ("id" = String, Path, description = "Class identifier"),
        ("token" = Option<String>, Query, description = "Authentication token (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 401, description = "Invalid authentication token"),
        (status = 404, description = "Class not found"),
        (status = 500, description = "Failed to delete class")
    ),
    security((), ("bearer_auth" = []), ("query_token" = [])),
    tag = "admin"
)]
pub async fn delete_class(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
    Path(id): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = auth.map(|TypedHeader(a)| a);
    verify_token(&state.settings, auth_header, query.token.as_deref())?;

    state
        .store
        .delete(&id)
        .await
        .map_err(|err| ApiError::from_store(err, "Failed to delete class"))?;
    Ok(Json(serde_json::json!({"success": true})))
}
