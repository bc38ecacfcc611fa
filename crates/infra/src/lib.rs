//! # Tasklist インフラ層
//!
//! Todo ストアの抽象（[`repository::TodoRepository`]）と、その具体的なアダプタを提供する。
//!
//! ## 設計方針
//!
//! ハンドラはストアを `Arc<dyn TodoRepository>` として受け取り、
//! どのストア技術が裏にあるかを知らない。アダプタはストア技術ごとに 1 つ用意する。
//!
//! ## 依存関係
//!
//! ```text
//! todo-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`dynamodb`] - DynamoDB 接続管理とテーブル自動作成
//! - [`error`] - インフラ層エラー定義
//! - [`memory`] - インメモリストア
//! - [`repository`] - リポジトリトレイトと DynamoDB 実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use tasklist_infra::{dynamodb, repository::DynamoDbTodoRepository};
//!
//! async fn setup() -> Result<(), tasklist_infra::InfraError> {
//!     let client = dynamodb::create_client("http://localhost:18000").await;
//!     dynamodb::ensure_todo_table(&client, "todos").await?;
//!     let repository = DynamoDbTodoRepository::new(client, "todos".to_string());
//!     Ok(())
//! }
//! ```

pub mod dynamodb;
pub mod error;
pub mod memory;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use memory::InMemoryTodoRepository;
