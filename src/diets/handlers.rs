use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use sqlx::PgPool;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthActor,
    diets::{
        dto::{
            CreateDietRequest, CreateWeekRequest, DietDetailsDto, DietDto, UpdateDietRequest,
            UpdateWeekRequest, WeekDto,
        },
        repo_types::{Diet, Week},
    },
    meals::{dto::MealDto, repo_types::{FoodItem, Meal}},
    state::AppState,
    users::repo_types::User,
};

pub fn diet_routes() -> Router<AppState> {
    Router::new()
        .route("/diets", get(list_diets).post(create_diet))
        .route(
            "/diets/:id",
            get(get_diet).put(update_diet).delete(delete_diet),
        )
        .route("/diets/user/:user_id", get(list_diets_by_user))
}

pub fn week_routes() -> Router<AppState> {
    Router::new()
        .route("/weeks", post(create_week))
        .route(
            "/weeks/:id",
            get(get_week).put(update_week).delete(delete_week),
        )
        .route("/weeks/diet/:diet_id", get(list_weeks_by_diet))
}

/// Loads every meal of a week together with its food items.
async fn load_week_meals(db: &PgPool, week_id: Uuid) -> anyhow::Result<Vec<MealDto>> {
    let meals = Meal::list_by_week(db, week_id).await?;
    let mut dtos = Vec::with_capacity(meals.len());
    for meal in meals {
        let items = FoodItem::list_by_meal(db, meal.id).await?;
        dtos.push(MealDto::from_parts(meal, items));
    }
    Ok(dtos)
}

// --- diets ---

#[instrument(skip(state))]
pub async fn list_diets(
    State(state): State<AppState>,
    _actor: AuthActor,
) -> Result<Json<Vec<DietDto>>, (StatusCode, String)> {
    let diets = Diet::list(&state.db).await.map_err(internal)?;
    Ok(Json(diets.into_iter().map(DietDto::from).collect()))
}

#[instrument(skip(state))]
pub async fn list_diets_by_user(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<DietDto>>, (StatusCode, String)> {
    let diets = Diet::list_by_user(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(diets.into_iter().map(DietDto::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_diet(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<Json<DietDetailsDto>, (StatusCode, String)> {
    let diet = match Diet::find_by_id(&state.db, id).await.map_err(internal)? {
        Some(d) => d,
        None => return Err((StatusCode::NOT_FOUND, "Diet not found".into())),
    };

    let weeks = Week::list_by_diet(&state.db, diet.id)
        .await
        .map_err(internal)?;
    let mut week_dtos = Vec::with_capacity(weeks.len());
    for week in weeks {
        let meals = load_week_meals(&state.db, week.id).await.map_err(internal)?;
        week_dtos.push(WeekDto::from_parts(week, meals));
    }

    Ok(Json(DietDetailsDto::from_parts(diet, week_dtos)))
}

#[instrument(skip(state, payload))]
pub async fn create_diet(
    State(state): State<AppState>,
    actor: AuthActor,
    Json(payload): Json<CreateDietRequest>,
) -> Result<(StatusCode, HeaderMap, Json<DietDto>), (StatusCode, String)> {
    let user_ok = User::exists(&state.db, payload.user_id)
        .await
        .map_err(internal)?;
    if !user_ok {
        warn!(user_id = %payload.user_id, "unknown user");
        return Err((StatusCode::BAD_REQUEST, "Invalid user ID".into()));
    }

    let diet = Diet::create(&state.db, payload.user_id)
        .await
        .map_err(internal)?;

    info!(diet_id = %diet.id, user_id = %diet.user_id, actor = %actor.id, "diet created");

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/api/diets/{}", diet.id).parse().unwrap(),
    );

    Ok((StatusCode::CREATED, headers, Json(DietDto::from(diet))))
}

#[instrument(skip(state, payload))]
pub async fn update_diet(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDietRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if id != payload.id {
        return Err((StatusCode::BAD_REQUEST, "ID mismatch".into()));
    }

    let user_ok = User::exists(&state.db, payload.user_id)
        .await
        .map_err(internal)?;
    if !user_ok {
        return Err((StatusCode::BAD_REQUEST, "Invalid user ID".into()));
    }

    match Diet::update(&state.db, id, payload.user_id)
        .await
        .map_err(internal)?
    {
        Some(d) => {
            info!(diet_id = %d.id, actor = %actor.id, "diet updated");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err((StatusCode::NOT_FOUND, "Diet not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn delete_diet(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = Diet::delete(&state.db, id).await.map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Diet not found".into()));
    }
    info!(diet_id = %id, actor = %actor.id, "diet deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- weeks ---

#[instrument(skip(state))]
pub async fn get_week(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<Json<WeekDto>, (StatusCode, String)> {
    let week = match Week::find_by_id(&state.db, id).await.map_err(internal)? {
        Some(w) => w,
        None => return Err((StatusCode::NOT_FOUND, "Week not found".into())),
    };
    let meals = load_week_meals(&state.db, week.id).await.map_err(internal)?;
    Ok(Json(WeekDto::from_parts(week, meals)))
}

#[instrument(skip(state))]
pub async fn list_weeks_by_diet(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(diet_id): Path<Uuid>,
) -> Result<Json<Vec<WeekDto>>, (StatusCode, String)> {
    let weeks = Week::list_by_diet(&state.db, diet_id)
        .await
        .map_err(internal)?;
    let mut dtos = Vec::with_capacity(weeks.len());
    for week in weeks {
        let meals = load_week_meals(&state.db, week.id).await.map_err(internal)?;
        dtos.push(WeekDto::from_parts(week, meals));
    }
    Ok(Json(dtos))
}

#[instrument(skip(state, payload))]
pub async fn create_week(
    State(state): State<AppState>,
    actor: AuthActor,
    Json(payload): Json<CreateWeekRequest>,
) -> Result<(StatusCode, HeaderMap, Json<WeekDto>), (StatusCode, String)> {
    if payload.week_number < 1 {
        return Err((StatusCode::BAD_REQUEST, "Week number must be positive".into()));
    }

    let diet_ok = Diet::exists(&state.db, payload.diet_id)
        .await
        .map_err(internal)?;
    if !diet_ok {
        warn!(diet_id = %payload.diet_id, "unknown diet");
        return Err((StatusCode::BAD_REQUEST, "Invalid diet ID".into()));
    }

    let week = Week::create(&state.db, payload.diet_id, payload.week_number)
        .await
        .map_err(internal)?;

    info!(week_id = %week.id, diet_id = %week.diet_id, actor = %actor.id, "week created");

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/api/weeks/{}", week.id).parse().unwrap(),
    );

    Ok((
        StatusCode::CREATED,
        headers,
        Json(WeekDto::from_parts(week, Vec::new())),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_week(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateWeekRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if id != payload.id {
        return Err((StatusCode::BAD_REQUEST, "ID mismatch".into()));
    }
    if payload.week_number < 1 {
        return Err((StatusCode::BAD_REQUEST, "Week number must be positive".into()));
    }

    let diet_ok = Diet::exists(&state.db, payload.diet_id)
        .await
        .map_err(internal)?;
    if !diet_ok {
        return Err((StatusCode::BAD_REQUEST, "Invalid diet ID".into()));
    }

    match Week::update(&state.db, id, payload.diet_id, payload.week_number)
        .await
        .map_err(internal)?
    {
        Some(w) => {
            info!(week_id = %w.id, actor = %actor.id, "week updated");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err((StatusCode::NOT_FOUND, "Week not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn delete_week(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = Week::delete(&state.db, id).await.map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Week not found".into()));
    }
    info!(week_id = %id, actor = %actor.id, "week deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
