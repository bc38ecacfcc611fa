//! # Todo API 統合テスト
//!
//! ルーター全体（レイヤー込み）をインメモリストアで駆動し、
//! HTTP 契約（ステータスコードとボディ）を検証する。
//!
//! 実行方法:
//! ```bash
//! cargo test -p tasklist-todo-service --test todo_api_test
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tasklist_domain::todo::{
    FindAndUpdateOptions,
    NewTodo,
    Todo,
    TodoChanges,
    TodoFilter,
    TodoId,
};
use tasklist_infra::{InMemoryTodoRepository, InfraError, repository::TodoRepository};
use tasklist_shared::ErrorResponse;
use tasklist_todo_service::app::build_router;
use tower::ServiceExt;

// テストヘルパー

fn create_test_app() -> Router {
    build_router(Arc::new(InMemoryTodoRepository::new()))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn parse_body<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).unwrap()
}

/// すべての操作が失敗するストア
struct FailingTodoRepository;

#[async_trait]
impl TodoRepository for FailingTodoRepository {
    async fn insert(&self, _new_todo: &NewTodo) -> Result<Todo, InfraError> {
        Err(InfraError::dynamo_db("接続できません"))
    }

    async fn find(&self, _filter: &TodoFilter) -> Result<Vec<Todo>, InfraError> {
        Err(InfraError::dynamo_db("接続できません"))
    }

    async fn find_by_id(&self, _id: &TodoId) -> Result<Option<Todo>, InfraError> {
        Err(InfraError::dynamo_db("接続できません"))
    }

    async fn find_by_id_and_update(
        &self,
        _id: &TodoId,
        _changes: &TodoChanges,
        _options: FindAndUpdateOptions,
    ) -> Result<Option<Todo>, InfraError> {
        Err(InfraError::dynamo_db("接続できません"))
    }

    async fn find_by_id_and_delete(&self, _id: &TodoId) -> Result<Option<Todo>, InfraError> {
        Err(InfraError::dynamo_db("接続できません"))
    }
}

// テストケース

#[tokio::test]
async fn test_作成から削除までの一連の操作() {
    let app = create_test_app();

    // 作成
    let (status, bytes) = send(
        &app,
        Method::POST,
        "/todos",
        Some(json!({"description": "buy milk", "done": false})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: Todo = parse_body(&bytes);
    assert_eq!(created.description, "buy milk");
    assert!(!created.done);

    // 取得
    let uri = format!("/todos/{}", created.id);
    let (status, bytes) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body::<Todo>(&bytes), created);

    // 更新
    let (status, bytes) = send(&app, Method::PUT, &uri, Some(json!({"done": true}))).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Todo = parse_body(&bytes);
    assert_eq!(
        updated,
        Todo {
            done: true,
            ..created.clone()
        }
    );

    // 一覧
    let (status, bytes) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body::<Vec<Todo>>(&bytes), vec![updated.clone()]);

    // 削除
    let (status, bytes) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body::<Todo>(&bytes), updated);

    // 削除後は不在
    let (status, bytes) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_作成レスポンスはid_description_doneのjsonになる() {
    let app = create_test_app();

    let (_, bytes) = send(
        &app,
        Method::POST,
        "/todos",
        Some(json!({"description": "buy milk"})),
    )
    .await;

    let body: Value = parse_body(&bytes);
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(
        body,
        json!({"id": id, "description": "buy milk", "done": false})
    );
}

#[tokio::test]
async fn test_一覧は作成順に全件を返す() {
    let app = create_test_app();
    let mut created = Vec::new();
    for description in ["1", "2", "3"] {
        let (_, bytes) = send(
            &app,
            Method::POST,
            "/todos",
            Some(json!({"description": description})),
        )
        .await;
        created.push(parse_body::<Todo>(&bytes));
    }

    let (status, bytes) = send(&app, Method::GET, "/todos", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body::<Vec<Todo>>(&bytes), created);
}

#[tokio::test]
async fn test_空のストアの一覧は空配列() {
    let app = create_test_app();

    let (status, bytes) = send(&app, Method::GET, "/todos", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body::<Value>(&bytes), json!([]));
}

#[tokio::test]
async fn test_既存レコードを投入したストアから取得と一覧ができる() {
    let seeded = vec![
        Todo::new(
            TodoId::new(),
            NewTodo {
                description: "既存 1".to_string(),
                done:        true,
            },
        ),
        Todo::new(
            TodoId::new(),
            NewTodo {
                description: "既存 2".to_string(),
                done:        false,
            },
        ),
    ];
    let app = build_router(Arc::new(InMemoryTodoRepository::with_todos(
        seeded.clone(),
    )));

    let (status, bytes) = send(&app, Method::GET, "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body::<Vec<Todo>>(&bytes), seeded);

    let uri = format!("/todos/{}", seeded[1].id);
    let (status, bytes) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body::<Todo>(&bytes), seeded[1]);
}

#[tokio::test]
async fn test_存在しないidの更新と削除は404() {
    let app = create_test_app();
    let uri = format!("/todos/{}", TodoId::new());

    let (put_status, _) = send(&app, Method::PUT, &uri, Some(json!({"done": true}))).await;
    let (delete_status, _) = send(&app, Method::DELETE, &uri, None).await;

    assert_eq!(put_status, StatusCode::NOT_FOUND);
    assert_eq!(delete_status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ストアの失敗は500のproblem_detailsになる() {
    let app = build_router(Arc::new(FailingTodoRepository));

    let (status, bytes) = send(&app, Method::GET, "/todos", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        parse_body::<ErrorResponse>(&bytes),
        ErrorResponse::internal_error()
    );
}

#[tokio::test]
async fn test_ルートは挨拶のjson文字列を返す() {
    let app = create_test_app();

    let (status, bytes) = send(&app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body::<Value>(&bytes), json!("Hello world!"));
}

#[tokio::test]
async fn test_ヘルスチェックはバージョンを返す() {
    let app = create_test_app();

    let (status, bytes) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        parse_body::<Value>(&bytes),
        json!({"status": "healthy", "version": env!("CARGO_PKG_VERSION")})
    );
}

#[tokio::test]
async fn test_レスポンスにuuid_v7のx_request_idが付与される() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let request_id = response
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap();
    let uuid = uuid::Uuid::parse_str(request_id).unwrap();
    assert_eq!(uuid.get_version(), Some(uuid::Version::SortRand));
}

#[tokio::test]
async fn test_クライアント提供のx_request_idがそのまま返される() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/todos")
                .header("x-request-id", "client-provided-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "client-provided-id"
    );
}
