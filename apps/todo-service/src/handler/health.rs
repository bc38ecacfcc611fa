//! # ヘルスチェックハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! GET /        → "Hello world!"
//! GET /health  → {"status": "healthy", "version": "0.1.0"}
//! ```

use axum::Json;
use tasklist_shared::HealthResponse;

/// ルートの挨拶
///
/// JSON 文字列を返す。Todo API の契約には含まれない。
pub async fn greeting() -> Json<&'static str> {
    Json("Hello world!")
}

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
