//! # リポジトリ
//!
//! Todo ストアのトレイトと、ストア技術ごとの実装を提供する。
//!
//! ## 設計方針
//!
//! - **能力の抽象化**: insert / find / find_by_id / find_by_id_and_update /
//!   find_by_id_and_delete の 5 操作のみをストアに要求する
//! - **不在と失敗の区別**: 不在は `Ok(None)`、失敗は `Err(InfraError)`
//! - **テスタビリティ**: トレイト経由でスタブに差し替え可能

pub mod todo_repository;

pub use todo_repository::{DynamoDbTodoRepository, TodoRepository};
