//! テスト共通フィクスチャ
//!
//! DynamoDB Local を使用する統合テストで共通利用するヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use aws_sdk_dynamodb::Client;
use tasklist_infra::{dynamodb, repository::DynamoDbTodoRepository};

/// テスト用の DynamoDB エンドポイント
///
/// 優先順位:
/// 1. `DYNAMODB_ENDPOINT`（CI で明示的に設定）
/// 2. `DYNAMODB_PORT` から構築
/// 3. フォールバック: `http://localhost:18000`
pub fn dynamodb_endpoint() -> String {
    std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| {
        let port = std::env::var("DYNAMODB_PORT").unwrap_or_else(|_| "18000".to_string());
        format!("http://localhost:{port}")
    })
}

/// 使い捨てテーブルを作成し、そのテーブルに向いたリポジトリを返す
pub async fn setup_repository() -> (DynamoDbTodoRepository, Client, String) {
    let client = dynamodb::create_client(&dynamodb_endpoint()).await;
    let table_name = format!("test_todos_{}", uuid::Uuid::now_v7());
    dynamodb::ensure_todo_table(&client, &table_name)
        .await
        .expect("テーブル作成に失敗");

    let repository = DynamoDbTodoRepository::new(client.clone(), table_name.clone());
    (repository, client, table_name)
}

/// 使い捨てテーブルを削除する
pub async fn teardown(client: &Client, table_name: &str) {
    let _ = client.delete_table().table_name(table_name).send().await;
}
