use axum::body::Body;
use axum::http::{Request, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use super::*;
use canvas::item::ItemStatus;

fn test_app() -> Router {
    app(AppState::new())
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_test_board(app: &Router, name: &str) -> Board {
    let (status, body) = send(
        app,
        request("POST", "/api/boards", Some(json!({ "name": name }))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(body).unwrap()
}

async fn create_test_item(app: &Router, board_id: Uuid, title: &str) -> Item {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/items",
            Some(json!({ "board_id": board_id, "title": title })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(body).unwrap()
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

#[test]
fn not_found_errors_map_to_404() {
    let err = PersistError::BoardNotFound(Uuid::nil());
    assert_eq!(error_to_status(&err), StatusCode::NOT_FOUND);
    let err = PersistError::ItemNotFound(Uuid::nil());
    assert_eq!(error_to_status(&err), StatusCode::NOT_FOUND);
}

#[test]
fn invalid_maps_to_422() {
    let err = PersistError::Invalid("empty title".to_owned());
    assert_eq!(error_to_status(&err), StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// BOARD ROUTES
// =============================================================================

#[tokio::test]
async fn healthz_answers_ok() {
    let app = test_app();
    let resp = app.oneshot(request("GET", "/healthz", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn board_crud_round_trip() {
    let app = test_app();
    let board = create_test_board(&app, "Sprint 1").await;

    let (status, body) = send(&app, request("GET", "/api/boards", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, body) =
        send(&app, request("GET", &format!("/api/boards/{}", board.id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sprint 1");

    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/boards/{}", board.id),
            Some(json!({ "name": "Sprint 2" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Sprint 2");

    let (status, body) =
        send(&app, request("DELETE", &format!("/api/boards/{}", board.id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn create_board_with_empty_name_is_422() {
    let app = test_app();
    let (status, _) = send(
        &app,
        request("POST", "/api/boards", Some(json!({ "name": "" }))),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unknown_board_is_404() {
    let app = test_app();
    let (status, _) = send(
        &app,
        request("GET", &format!("/api/boards/{}", Uuid::new_v4()), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_board_reports_failure() {
    let app = test_app();
    let (status, body) = send(
        &app,
        request("DELETE", &format!("/api/boards/{}", Uuid::new_v4()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(false));
}

// =============================================================================
// ITEM ROUTES
// =============================================================================

#[tokio::test]
async fn create_item_applies_defaults() {
    let app = test_app();
    let board = create_test_board(&app, "Board").await;
    let item = create_test_item(&app, board.id, "Card").await;
    assert_eq!(item.status, ItemStatus::Todo);
    assert!((item.position_x).abs() < f64::EPSILON);
    assert!((item.width - 200.0).abs() < f64::EPSILON);
    assert!((item.height - 150.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn create_item_against_unknown_board_is_404() {
    let app = test_app();
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/items",
            Some(json!({ "board_id": Uuid::new_v4(), "title": "Orphan" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_board_items_returns_the_boards_items() {
    let app = test_app();
    let board = create_test_board(&app, "Board").await;
    let other = create_test_board(&app, "Other").await;
    create_test_item(&app, board.id, "Mine").await;
    create_test_item(&app, other.id, "Theirs").await;

    let (status, body) = send(
        &app,
        request("GET", &format!("/api/boards/{}/items", board.id), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i["title"].as_str())
        .collect();
    assert_eq!(titles, ["Mine"]);
}

#[tokio::test]
async fn patch_item_with_null_clears_description() {
    let app = test_app();
    let board = create_test_board(&app, "Board").await;
    let (_, created) = send(
        &app,
        request(
            "POST",
            "/api/items",
            Some(json!({
                "board_id": board.id,
                "title": "Card",
                "description": "temporary"
            })),
        ),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_owned();

    // Omitting a field keeps it; an explicit null clears it.
    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/items/{id}"),
            Some(json!({ "description": null, "status": "done" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], Value::Null);
    assert_eq!(body["status"], "done");
    assert_eq!(body["title"], "Card");
}

#[tokio::test]
async fn patch_item_with_empty_title_is_422() {
    let app = test_app();
    let board = create_test_board(&app, "Board").await;
    let item = create_test_item(&app, board.id, "Card").await;
    let (status, _) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/items/{}", item.id),
            Some(json!({ "title": " " })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn put_position_moves_the_item() {
    let app = test_app();
    let board = create_test_board(&app, "Board").await;
    let item = create_test_item(&app, board.id, "Card").await;

    let (status, body) = send(
        &app,
        request(
            "PUT",
            &format!("/api/items/{}/position", item.id),
            Some(json!({ "position_x": 30.0, "position_y": -7.5 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["position_x"], json!(30.0));
    assert_eq!(body["position_y"], json!(-7.5));
}

#[tokio::test]
async fn put_position_on_unknown_item_is_404() {
    let app = test_app();
    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/api/items/{}/position", Uuid::new_v4()),
            Some(json!({ "position_x": 0.0, "position_y": 0.0 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_board_cascades_to_items_over_http() {
    let app = test_app();
    let board = create_test_board(&app, "Board").await;
    let item = create_test_item(&app, board.id, "Card").await;

    let (status, body) =
        send(&app, request("DELETE", &format!("/api/boards/{}", board.id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (status, _) =
        send(&app, request("GET", &format!("/api/items/{}", item.id), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_item_round_trip() {
    let app = test_app();
    let board = create_test_board(&app, "Board").await;
    let item = create_test_item(&app, board.id, "Card").await;

    let (status, body) =
        send(&app, request("DELETE", &format!("/api/items/{}", item.id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (_, body) =
        send(&app, request("DELETE", &format!("/api/items/{}", item.id), None)).await;
    assert_eq!(body["success"], json!(false));
}
