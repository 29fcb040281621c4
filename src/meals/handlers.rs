use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthActor,
    diets::repo_types::Week,
    meals::{
        dto::{
            CreateFoodItemRequest, CreateMealRequest, FoodItemDto, MealDto, UpdateFoodItemRequest,
            UpdateMealRequest,
        },
        repo_types::{FoodItem, Meal, NewFoodItem},
    },
    state::AppState,
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
        .route("/meals/week/:week_id", get(list_meals_by_week))
}

pub fn food_item_routes() -> Router<AppState> {
    Router::new()
        .route("/fooditems", post(create_food_item))
        .route(
            "/fooditems/:id",
            get(get_food_item)
                .put(update_food_item)
                .delete(delete_food_item),
        )
        .route("/fooditems/meal/:meal_id", get(list_food_items_by_meal))
}

// --- meals ---

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<Json<MealDto>, (StatusCode, String)> {
    let meal = match Meal::find_by_id(&state.db, id).await.map_err(internal)? {
        Some(m) => m,
        None => return Err((StatusCode::NOT_FOUND, "Meal not found".into())),
    };
    let items = FoodItem::list_by_meal(&state.db, meal.id)
        .await
        .map_err(internal)?;
    Ok(Json(MealDto::from_parts(meal, items)))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    _actor: AuthActor,
) -> Result<Json<Vec<MealDto>>, (StatusCode, String)> {
    let meals = Meal::list(&state.db).await.map_err(internal)?;
    let mut dtos = Vec::with_capacity(meals.len());
    for meal in meals {
        let items = FoodItem::list_by_meal(&state.db, meal.id)
            .await
            .map_err(internal)?;
        dtos.push(MealDto::from_parts(meal, items));
    }
    Ok(Json(dtos))
}

#[instrument(skip(state))]
pub async fn list_meals_by_week(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(week_id): Path<Uuid>,
) -> Result<Json<Vec<MealDto>>, (StatusCode, String)> {
    let meals = Meal::list_by_week(&state.db, week_id)
        .await
        .map_err(internal)?;
    let mut dtos = Vec::with_capacity(meals.len());
    for meal in meals {
        let items = FoodItem::list_by_meal(&state.db, meal.id)
            .await
            .map_err(internal)?;
        dtos.push(MealDto::from_parts(meal, items));
    }
    Ok(Json(dtos))
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    actor: AuthActor,
    Json(payload): Json<CreateMealRequest>,
) -> Result<(StatusCode, HeaderMap, Json<MealDto>), (StatusCode, String)> {
    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
    }

    let week_ok = Week::exists(&state.db, payload.week_id)
        .await
        .map_err(internal)?;
    if !week_ok {
        warn!(week_id = %payload.week_id, "unknown week");
        return Err((StatusCode::BAD_REQUEST, "Invalid week ID".into()));
    }

    let items: Vec<NewFoodItem> = payload.food_items.into_iter().map(NewFoodItem::from).collect();

    let (meal, created_items) =
        Meal::create_with_items(&state.db, payload.week_id, &payload.name, &items)
            .await
            .map_err(internal)?;

    info!(meal_id = %meal.id, items = created_items.len(), actor = %actor.id, "meal created");

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/api/meals/{}", meal.id).parse().unwrap(),
    );

    Ok((
        StatusCode::CREATED,
        headers,
        Json(MealDto::from_parts(meal, created_items)),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_meal(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMealRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if id != payload.id {
        return Err((StatusCode::BAD_REQUEST, "ID mismatch".into()));
    }
    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required".into()));
    }

    let week_ok = Week::exists(&state.db, payload.week_id)
        .await
        .map_err(internal)?;
    if !week_ok {
        return Err((StatusCode::BAD_REQUEST, "Invalid week ID".into()));
    }

    let items: Vec<NewFoodItem> = payload.food_items.into_iter().map(NewFoodItem::from).collect();

    let updated = Meal::update_with_items(&state.db, id, payload.week_id, &payload.name, &items)
        .await
        .map_err(internal)?;

    match updated {
        Some((meal, _)) => {
            info!(meal_id = %meal.id, actor = %actor.id, "meal updated");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err((StatusCode::NOT_FOUND, "Meal not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = Meal::delete(&state.db, id).await.map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Meal not found".into()));
    }
    info!(meal_id = %id, actor = %actor.id, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}

// --- food items ---

#[instrument(skip(state))]
pub async fn get_food_item(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<Json<FoodItemDto>, (StatusCode, String)> {
    match FoodItem::find_by_id(&state.db, id).await.map_err(internal)? {
        Some(i) => Ok(Json(FoodItemDto::from(i))),
        None => Err((StatusCode::NOT_FOUND, "Food item not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn list_food_items_by_meal(
    State(state): State<AppState>,
    _actor: AuthActor,
    Path(meal_id): Path<Uuid>,
) -> Result<Json<Vec<FoodItemDto>>, (StatusCode, String)> {
    let items = FoodItem::list_by_meal(&state.db, meal_id)
        .await
        .map_err(internal)?;
    Ok(Json(items.into_iter().map(FoodItemDto::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_food_item(
    State(state): State<AppState>,
    actor: AuthActor,
    Json(payload): Json<CreateFoodItemRequest>,
) -> Result<(StatusCode, HeaderMap, Json<FoodItemDto>), (StatusCode, String)> {
    let meal_ok = Meal::exists(&state.db, payload.meal_id)
        .await
        .map_err(internal)?;
    if !meal_ok {
        warn!(meal_id = %payload.meal_id, "unknown meal");
        return Err((StatusCode::BAD_REQUEST, "Invalid meal ID".into()));
    }

    let item = FoodItem::create(&state.db, payload.meal_id, &payload.name, &payload.description)
        .await
        .map_err(internal)?;

    info!(food_item_id = %item.id, actor = %actor.id, "food item created");

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/api/fooditems/{}", item.id).parse().unwrap(),
    );

    Ok((StatusCode::CREATED, headers, Json(FoodItemDto::from(item))))
}

#[instrument(skip(state, payload))]
pub async fn update_food_item(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFoodItemRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if id != payload.id {
        return Err((StatusCode::BAD_REQUEST, "ID mismatch".into()));
    }

    let meal_ok = Meal::exists(&state.db, payload.meal_id)
        .await
        .map_err(internal)?;
    if !meal_ok {
        return Err((StatusCode::BAD_REQUEST, "Invalid meal ID".into()));
    }

    let updated = FoodItem::update(&state.db, id, payload.meal_id, &payload.name, &payload.description)
        .await
        .map_err(internal)?;

    match updated {
        Some(i) => {
            info!(food_item_id = %i.id, actor = %actor.id, "food item updated");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err((StatusCode::NOT_FOUND, "Food item not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn delete_food_item(
    State(state): State<AppState>,
    actor: AuthActor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = FoodItem::delete(&state.db, id).await.map_err(internal)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Food item not found".into()));
    }
    info!(food_item_id = %id, actor = %actor.id, "food item deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
