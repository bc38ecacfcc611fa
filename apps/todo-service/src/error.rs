//! # Todo Service エラー定義
//!
//! ハンドラから転送されたストア失敗を HTTP レスポンスへ変換する集中エラー処理。
//!
//! 不在（404）はハンドラが決定するため、ここには現れない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tasklist_infra::InfraError;
use tasklist_shared::ErrorResponse;
use thiserror::Error;

/// Todo Service で発生するエラー
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// ストアの失敗（内容はそのまま保持する）
    #[error("ストアエラー: {0}")]
    Store(#[from] InfraError),
}

impl IntoResponse for TodoServiceError {
    fn into_response(self) -> Response {
        match &self {
            TodoServiceError::Store(e) => {
                tracing::error!(
                    error.kind = ?e.kind(),
                    "ストアエラー: {}\n{}",
                    e,
                    e.span_trace()
                );
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal_error()),
        )
            .into_response()
    }
}
