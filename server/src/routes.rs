//! Router assembly and REST handlers.
//!
//! DESIGN
//! ======
//! Thin handlers over the store: extract, delegate, map the typed error
//! to a status code. Not-found lookups become 404, validation failures
//! 422. Delete endpoints answer `{"success": bool}` instead of erroring
//! on an unknown id, so clients can treat deletes as idempotent.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use canvas::item::{Board, Item, ItemPatch};
use canvas::session::{BoardPatch, CreateBoardInput, CreateItemInput, PersistError};

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/boards", get(list_boards).post(create_board))
        .route(
            "/api/boards/{id}",
            get(get_board).patch(update_board).delete(delete_board),
        )
        .route("/api/boards/{id}/items", get(list_board_items))
        .route("/api/items", post(create_item))
        .route(
            "/api/items/{id}",
            get(get_item).patch(update_item).delete(delete_item),
        )
        .route("/api/items/{id}/position", put(update_item_position))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn error_to_status(err: &PersistError) -> StatusCode {
    match err {
        PersistError::BoardNotFound(_) | PersistError::ItemNotFound(_) => StatusCode::NOT_FOUND,
        PersistError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PersistError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// =============================================================================
// BOARDS
// =============================================================================

/// `GET /api/boards` — all boards, most recently updated first.
async fn list_boards(State(state): State<AppState>) -> Json<Vec<Board>> {
    Json(state.store.list_boards().await)
}

/// `POST /api/boards` — create a board.
async fn create_board(
    State(state): State<AppState>,
    Json(input): Json<CreateBoardInput>,
) -> Result<(StatusCode, Json<Board>), StatusCode> {
    let board = state
        .store
        .create_board(input)
        .await
        .map_err(|e| error_to_status(&e))?;
    Ok((StatusCode::CREATED, Json(board)))
}

/// `GET /api/boards/:id` — fetch one board.
async fn get_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Board>, StatusCode> {
    let board = state
        .store
        .get_board(id)
        .await
        .map_err(|e| error_to_status(&e))?;
    Ok(Json(board))
}

/// `PATCH /api/boards/:id` — partial board update.
async fn update_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<BoardPatch>,
) -> Result<Json<Board>, StatusCode> {
    let board = state
        .store
        .update_board(id, patch)
        .await
        .map_err(|e| error_to_status(&e))?;
    Ok(Json(board))
}

/// `DELETE /api/boards/:id` — delete a board and its items.
async fn delete_board(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<serde_json::Value> {
    let success = state.store.delete_board(id).await;
    Json(serde_json::json!({ "success": success }))
}

// =============================================================================
// ITEMS
// =============================================================================

/// `GET /api/boards/:id/items` — a board's items, oldest first.
async fn list_board_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Item>>, StatusCode> {
    let items = state
        .store
        .items_for_board(id)
        .await
        .map_err(|e| error_to_status(&e))?;
    Ok(Json(items))
}

/// `POST /api/items` — create an item on a board.
async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItemInput>,
) -> Result<(StatusCode, Json<Item>), StatusCode> {
    let item = state
        .store
        .create_item(input)
        .await
        .map_err(|e| error_to_status(&e))?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `GET /api/items/:id` — fetch one item.
async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Item>, StatusCode> {
    let item = state
        .store
        .get_item(id)
        .await
        .map_err(|e| error_to_status(&e))?;
    Ok(Json(item))
}

/// `PATCH /api/items/:id` — partial item update; explicit nulls clear
/// the nullable fields.
async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ItemPatch>,
) -> Result<Json<Item>, StatusCode> {
    let item = state
        .store
        .update_item(id, patch)
        .await
        .map_err(|e| error_to_status(&e))?;
    Ok(Json(item))
}

#[derive(Deserialize)]
struct PositionBody {
    position_x: f64,
    position_y: f64,
}

/// `PUT /api/items/:id/position` — the drag-commit write.
async fn update_item_position(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PositionBody>,
) -> Result<Json<Item>, StatusCode> {
    let item = state
        .store
        .update_item_position(id, body.position_x, body.position_y)
        .await
        .map_err(|e| error_to_status(&e))?;
    Ok(Json(item))
}

/// `DELETE /api/items/:id` — delete an item.
async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Json<serde_json::Value> {
    let success = state.store.delete_item(id).await;
    Json(serde_json::json!({ "success": success }))
}

/// `GET /healthz` — liveness probe.
async fn healthz() -> &'static str {
    "ok"
}
