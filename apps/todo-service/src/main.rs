//! # Todo Service サーバー
//!
//! Todo の REST API を提供するサーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `TODO_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `TODO_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `TODO_STORE` | No | `memory`（デフォルト）または `dynamodb` |
//! | `DYNAMODB_ENDPOINT` | `dynamodb` 時 | DynamoDB エンドポイント URL |
//! | `TODO_TABLE_NAME` | No | テーブル名（デフォルト: `todos`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,tasklist=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # インメモリストア
//! cargo run -p tasklist-todo-service
//!
//! # DynamoDB Local
//! TODO_STORE=dynamodb DYNAMODB_ENDPOINT=http://localhost:18000 cargo run -p tasklist-todo-service
//! ```

use std::sync::Arc;

use tasklist_infra::{
    InMemoryTodoRepository,
    dynamodb,
    repository::{DynamoDbTodoRepository, TodoRepository},
};
use tasklist_shared::observability::{TracingConfig, init_tracing};
use tasklist_todo_service::{
    app::build_router,
    config::{StoreConfig, TodoServiceConfig},
};
use tokio::net::TcpListener;

/// Todo Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(TracingConfig::from_env("todo-service"));
    let _tracing_guard = tracing::info_span!("app", service = "todo-service").entered();

    // 設定読み込み
    let config = TodoServiceConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "Todo Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let repository = create_repository(&config.store).await;
    let app = build_router(repository);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        "Todo Service サーバーが起動しました: {}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// 設定に従ってストアを作成する
///
/// DynamoDB のテーブル作成に失敗しても起動は継続する。
/// その場合、各リクエストはストアの失敗として 500 を返す。
async fn create_repository(store: &StoreConfig) -> Arc<dyn TodoRepository> {
    match store {
        StoreConfig::Memory => {
            tracing::info!("インメモリストアを使用します");
            Arc::new(InMemoryTodoRepository::new())
        }
        StoreConfig::DynamoDb {
            endpoint,
            table_name,
        } => {
            let client = dynamodb::create_client(endpoint).await;
            match dynamodb::ensure_todo_table(&client, table_name).await {
                Ok(()) => tracing::info!("DynamoDB に接続しました: {}", endpoint),
                Err(e) => tracing::error!("DynamoDB の初期化に失敗しました: {}", e),
            }
            Arc::new(DynamoDbTodoRepository::new(client, table_name.clone()))
        }
    }
}
