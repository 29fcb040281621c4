use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthActor,
    health_profiles::{
        dto::{CreateHealthProfileRequest, HealthProfileDto, UpdateHealthProfileRequest},
        repo_types::HealthProfile,
    },
    state::AppState,
    users::repo_types::User,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/healthprofiles",
            get(list_health_profiles).post(create_health_profile),
        )
        .route(
            "/healthprofiles/:id",
            get(get_health_profile)
                .put(update_health_profile)
                .delete(delete_health_profile),
        )
        .route("/healthprofiles/user/:user_id", get(get_by_user))
}

#[instrument(skip(state))]
pub async fn list_health_profiles(
    State(state): State<AppState>,
    _actor: AuthActor,
) -> Result<Json<Vec<HealthProfileDto>>, (StatusCode, String)> {
    let profiles = HealthProfile::list(&state.db).await.map_err(internal)?;
    Ok(Json(
        profiles.into_iter().map(HealthProfileDto::from).collect(),
    ))
}

#[instrument(skip(state))]
pub async fn get_health_profile(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<Json<HealthProfileDto>, (StatusCode, String)> {
    match HealthProfile::find_by_id(&state.db, id).await.map_err(internal)? {
        Some(p) => Ok(Json(HealthProfileDto::from(p))),
        None => Err((StatusCode::NOT_FOUND, "Health profile not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn get_by_user(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(user_id): Path<Uuid>,
) -> Result<Json<HealthProfileDto>, (StatusCode, String)> {
    match HealthProfile::find_by_user(&state.db, user_id)
        .await
        .map_err(internal)?
    {
        Some(p) => Ok(Json(HealthProfileDto::from(p))),
        None => Err((StatusCode::NOT_FOUND, "Health profile not found".into())),
    }
}

#[instrument(skip(state, payload))]
pub async fn create_health_profile(
    State(state): State<AppState>,
    actor: AuthActor,
    Json(payload): Json<CreateHealthProfileRequest>,
) -> Result<(StatusCode, HeaderMap, Json<HealthProfileDto>), (StatusCode, String)> {
    let user_ok = User::exists(&state.db, payload.user_id)
        .await
        .map_err(internal)?;
    if !user_ok {
        warn!(user_id = %payload.user_id, "unknown user");
        return Err((StatusCode::BAD_REQUEST, "Invalid user ID".into()));
    }

    // one profile per user; the unique index backs this up
    if let Ok(Some(_)) = HealthProfile::find_by_user(&state.db, payload.user_id).await {
        warn!(user_id = %payload.user_id, "user already has a health profile");
        return Err((
            StatusCode::CONFLICT,
            "User already has a health profile".into(),
        ));
    }

    let profile = HealthProfile::create(
        &state.db,
        payload.user_id,
        payload.age,
        payload.height,
        payload.weight,
        payload.comments.as_deref(),
    )
    .await
    .map_err(internal)?;

    info!(profile_id = %profile.id, user_id = %profile.user_id, actor = %actor.id, "health profile created");

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/api/healthprofiles/{}", profile.id).parse().unwrap(),
    );

    Ok((
        StatusCode::CREATED,
        headers,
        Json(HealthProfileDto::from(profile)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_health_profile(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHealthProfileRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if id != payload.id {
        return Err((StatusCode::BAD_REQUEST, "ID mismatch".into()));
    }

    let updated = HealthProfile::update(
        &state.db,
        id,
        payload.age,
        payload.height,
        payload.weight,
        payload.comments.as_deref(),
    )
    .await
    .map_err(internal)?;

    match updated {
        Some(p) => {
            info!(profile_id = %p.id, actor = %actor.id, "health profile updated");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err((StatusCode::NOT_FOUND, "Health profile not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn delete_health_profile(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = HealthProfile::delete(&state.db, id).await.map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Health profile not found".into()));
    }
    info!(profile_id = %id, actor = %actor.id, "health profile deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
