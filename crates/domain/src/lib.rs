//! # Tasklist ドメイン層
//!
//! Todo レコードと、ストアへの問い合わせに使う値を定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! todo-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DynamoDB、インメモリストア）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`todo`] - Todo レコード、作成・更新ペイロード、検索条件
//!
//! ## 使用例
//!
//! ```rust
//! use tasklist_domain::todo::{NewTodo, Todo, TodoId};
//!
//! let todo = Todo::new(
//!     TodoId::new(),
//!     NewTodo {
//!         description: "牛乳を買う".to_string(),
//!         done:        false,
//!     },
//! );
//! assert!(!todo.done);
//! ```

#[macro_use]
mod macros;

pub mod todo;
