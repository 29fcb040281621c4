use axum::{
    extract::{FromRef, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        claims::ActorKind,
        dto::{LoginRequest, LoginResponse},
        extractors::AuthActor,
        is_valid_email,
        jwt::JwtKeys,
        password,
    },
    nutritionists::{
        dto::{CreateNutritionistRequest, NutritionistDto, UpdateNutritionistRequest},
        repo_types::Nutritionist,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/nutritionists", get(list_nutritionists).post(create_nutritionist))
        .route(
            "/nutritionists/:id",
            get(get_nutritionist)
                .put(update_nutritionist)
                .delete(delete_nutritionist),
        )
        .route("/nutritionists/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let nutritionist = match Nutritionist::find_by_email(&state.db, &payload.email).await {
        Ok(Some(n)) => n,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => return Err(internal(e)),
    };

    let ok = password::verify_password(&payload.password, &nutritionist.password_hash)
        .map_err(internal)?;
    if !ok {
        warn!(email = %payload.email, nutritionist_id = %nutritionist.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(nutritionist.id, &nutritionist.email, ActorKind::Nutritionist)
        .map_err(internal)?;

    info!(nutritionist_id = %nutritionist.id, "nutritionist logged in");
    Ok(Json(LoginResponse {
        token,
        id: nutritionist.id,
        email: nutritionist.email,
    }))
}

#[instrument(skip(state))]
pub async fn list_nutritionists(
    State(state): State<AppState>,
    _actor: AuthActor,
) -> Result<Json<Vec<NutritionistDto>>, (StatusCode, String)> {
    let nutritionists = Nutritionist::list(&state.db).await.map_err(internal)?;
    Ok(Json(
        nutritionists.into_iter().map(NutritionistDto::from).collect(),
    ))
}

#[instrument(skip(state))]
pub async fn get_nutritionist(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<Json<NutritionistDto>, (StatusCode, String)> {
    match Nutritionist::find_by_id(&state.db, id).await.map_err(internal)? {
        Some(n) => Ok(Json(NutritionistDto::from(n))),
        None => Err((StatusCode::NOT_FOUND, "Nutritionist not found".into())),
    }
}

/// Registration stays open so the system can be bootstrapped.
#[instrument(skip(state, payload))]
pub async fn create_nutritionist(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateNutritionistRequest>,
) -> Result<(StatusCode, HeaderMap, Json<NutritionistDto>), (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }
    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
    }

    if let Ok(Some(_)) = Nutritionist::find_by_email(&state.db, &payload.email).await {
        warn!(email = %payload.email, "email already registered");
        return Err((StatusCode::CONFLICT, "Email already registered".into()));
    }

    let hash = password::hash_password(&payload.password).map_err(internal)?;

    let nutritionist =
        Nutritionist::create(&state.db, &payload.name, &payload.email, &hash, &payload.crn)
            .await
            .map_err(internal)?;

    info!(nutritionist_id = %nutritionist.id, "nutritionist registered");

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/api/nutritionists/{}", nutritionist.id).parse().unwrap(),
    );

    Ok((
        StatusCode::CREATED,
        headers,
        Json(NutritionistDto::from(nutritionist)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_nutritionist(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UpdateNutritionistRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if id != payload.id {
        return Err((StatusCode::BAD_REQUEST, "ID mismatch".into()));
    }

    payload.email = payload.email.trim().to_lowercase();
    if !is_valid_email(&payload.email) {
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    if let Some(existing) = Nutritionist::find_by_email(&state.db, &payload.email)
        .await
        .map_err(internal)?
    {
        if existing.id != id {
            return Err((StatusCode::CONFLICT, "Email already registered".into()));
        }
    }

    let hash = match payload.password.as_deref() {
        Some(p) => Some(password::hash_password(p).map_err(internal)?),
        None => None,
    };

    let updated = Nutritionist::update(
        &state.db,
        id,
        &payload.name,
        &payload.email,
        hash.as_deref(),
        &payload.crn,
    )
    .await
    .map_err(internal)?;

    match updated {
        Some(n) => {
            info!(nutritionist_id = %n.id, actor = %actor.id, "nutritionist updated");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err((StatusCode::NOT_FOUND, "Nutritionist not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn delete_nutritionist(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = Nutritionist::delete(&state.db, id).await.map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Nutritionist not found".into()));
    }
    info!(nutritionist_id = %id, actor = %actor.id, "nutritionist deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
