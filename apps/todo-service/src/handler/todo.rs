//! # Todo ハンドラ
//!
//! Todo の作成・一覧・取得・更新・削除を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /todos` - 作成（`201 Created`）
//! - `GET /todos` - 一覧
//! - `GET /todos/{id}` - 取得
//! - `PUT /todos/{id}` - 更新（更新後のレコードを返す）
//! - `DELETE /todos/{id}` - 削除（削除したレコードを返す）
//!
//! 各ハンドラはストアを 1 回だけ呼び出す。
//! 不在は `404 Not Found`（ボディなし）としてハンドラが決定し、
//! ストアの失敗は解釈せずに `?` で [`TodoServiceError`] へ転送する。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tasklist_domain::todo::{FindAndUpdateOptions, NewTodo, Todo, TodoChanges, TodoFilter, TodoId};
use tasklist_infra::repository::TodoRepository;

use crate::error::TodoServiceError;

/// Todo API の共有状態
pub struct TodoState {
    pub repository: Arc<dyn TodoRepository>,
}

/// 見つかったレコードは 200、不在は 404 に変換する
fn found_or_not_found(todo: Option<Todo>) -> Response {
    match todo {
        Some(todo) => (StatusCode::OK, Json(todo)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// POST /todos
///
/// リクエストボディをそのままストアに挿入する。
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    Json(new_todo): Json<NewTodo>,
) -> Result<Response, TodoServiceError> {
    let todo = state.repository.insert(&new_todo).await?;

    tracing::info!(todo_id = %todo.id, "Todo を作成しました");

    Ok((StatusCode::CREATED, Json(todo)).into_response())
}

/// GET /todos
///
/// 空の検索条件で全件を取得する。並び順はストアに従う。
#[tracing::instrument(skip_all)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
) -> Result<Response, TodoServiceError> {
    let todos = state.repository.find(&TodoFilter::all()).await?;

    Ok((StatusCode::OK, Json(todos)).into_response())
}

/// GET /todos/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<TodoId>,
) -> Result<Response, TodoServiceError> {
    let todo = state.repository.find_by_id(&id).await?;

    Ok(found_or_not_found(todo))
}

/// PUT /todos/{id}
///
/// ボディに含まれるフィールドだけを置き換え、更新後のレコードを返す。
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<TodoId>,
    Json(changes): Json<TodoChanges>,
) -> Result<Response, TodoServiceError> {
    let todo = state
        .repository
        .find_by_id_and_update(&id, &changes, FindAndUpdateOptions::default())
        .await?;

    Ok(found_or_not_found(todo))
}

/// DELETE /todos/{id}
///
/// 削除したレコードの最終内容を返す。
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<TodoId>,
) -> Result<Response, TodoServiceError> {
    let todo = state.repository.find_by_id_and_delete(&id).await?;

    if todo.is_some() {
        tracing::info!("Todo を削除しました");
    }

    Ok(found_or_not_found(todo))
}
