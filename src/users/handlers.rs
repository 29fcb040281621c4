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
    nutritionists::repo_types::Nutritionist,
    state::AppState,
    users::{
        dto::{CreateUserRequest, UpdateUserRequest, UserDto},
        repo_types::User,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/byemail/:email", get(get_user_by_email))
        .route("/users/login", post(login))
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

    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
        }
        Err(e) => return Err(internal(e)),
    };

    let ok = password::verify_password(&payload.password, &user.password_hash).map_err(internal)?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys
        .sign(user.id, &user.email, ActorKind::User)
        .map_err(internal)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        token,
        id: user.id,
        email: user.email,
    }))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    _actor: AuthActor,
) -> Result<Json<Vec<UserDto>>, (StatusCode, String)> {
    let users = User::list(&state.db).await.map_err(internal)?;
    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDto>, (StatusCode, String)> {
    match User::find_by_id(&state.db, id).await.map_err(internal)? {
        Some(u) => Ok(Json(UserDto::from(u))),
        None => Err((StatusCode::NOT_FOUND, "User not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(email): Path<String>,
) -> Result<Json<UserDto>, (StatusCode, String)> {
    let email = email.trim().to_lowercase();
    match User::find_by_email(&state.db, &email).await.map_err(internal)? {
        Some(u) => Ok(Json(UserDto::from(u))),
        None => Err((StatusCode::NOT_FOUND, "User not found".into())),
    }
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    actor: AuthActor,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, HeaderMap, Json<UserDto>), (StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let nutritionist_ok = Nutritionist::exists(&state.db, payload.nutritionist_id)
        .await
        .map_err(internal)?;
    if !nutritionist_ok {
        warn!(nutritionist_id = %payload.nutritionist_id, "unknown nutritionist");
        return Err((StatusCode::BAD_REQUEST, "Invalid nutritionist ID".into()));
    }

    if let Ok(Some(_)) = User::find_by_email(&state.db, &payload.email).await {
        warn!(email = %payload.email, "email already registered");
        return Err((StatusCode::CONFLICT, "Email already registered".into()));
    }

    let hash = password::hash_password(&payload.password).map_err(internal)?;

    let user = User::create(&state.db, &payload.email, &hash, payload.nutritionist_id)
        .await
        .map_err(internal)?;

    info!(user_id = %user.id, actor = %actor.id, actor_kind = ?actor.kind, "user created");

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/api/users/{}", user.id).parse().unwrap(),
    );

    Ok((StatusCode::CREATED, headers, Json(UserDto::from(user))))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UpdateUserRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if id != payload.id {
        return Err((StatusCode::BAD_REQUEST, "ID mismatch".into()));
    }

    payload.email = payload.email.trim().to_lowercase();
    if !is_valid_email(&payload.email) {
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let nutritionist_ok = Nutritionist::exists(&state.db, payload.nutritionist_id)
        .await
        .map_err(internal)?;
    if !nutritionist_ok {
        return Err((StatusCode::BAD_REQUEST, "Invalid nutritionist ID".into()));
    }

    if let Some(existing) = User::find_by_email(&state.db, &payload.email)
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

    let updated = User::update(
        &state.db,
        id,
        &payload.email,
        hash.as_deref(),
        payload.nutritionist_id,
    )
    .await
    .map_err(internal)?;

    match updated {
        Some(u) => {
            info!(user_id = %u.id, actor = %actor.id, "user updated");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err((StatusCode::NOT_FOUND, "User not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = User::delete(&state.db, id).await.map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "User not found".into()));
    }
    info!(user_id = %id, actor = %actor.id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
