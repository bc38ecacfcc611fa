//! # ルーター構築
//!
//! ルートとミドルウェアレイヤーを組み立てる。
//! `main` と統合テストの両方から使用する。

use std::sync::Arc;

use axum::{Router, routing::get};
use tasklist_infra::repository::TodoRepository;
use tasklist_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    TodoState,
    create_todo,
    delete_todo,
    get_todo,
    greeting,
    health_check,
    list_todos,
    update_todo,
};

/// Todo Service のルーターを構築する
pub fn build_router(repository: Arc<dyn TodoRepository>) -> Router {
    let todo_state = Arc::new(TodoState { repository });

    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/todos", get(list_todos).post(create_todo))
                .route(
                    "/todos/{id}",
                    get(get_todo).put(update_todo).delete(delete_todo),
                )
                .with_state(todo_state),
        )
        // 下に書いたものが外側:
        // SetRequestIdLayer で採番し、TraceLayer のスパンに含め、レスポンスヘッダーへコピーする
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
