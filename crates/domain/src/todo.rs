//! # Todo
//!
//! Todo レコードと、ストアに渡す作成・更新ペイロード、検索条件を表現する。
//!
//! ## レコードの形
//!
//! フラットな 3 フィールドのみを持つ。他レコードとの関連はない。
//!
//! ```json
//! { "id": "0190a1b2-...", "description": "牛乳を買う", "done": false }
//! ```
//!
//! ## ライフサイクル
//!
//! - 作成: ストアが [`TodoId`] を採番する
//! - 更新: [`TodoChanges`] で指定したフィールドのみ置き換える
//! - 削除: 物理削除（論理削除・バージョン管理はない）

use serde::{Deserialize, Serialize};

define_uuid_id! {
    /// Todo の一意識別子
    ///
    /// UUID v7 のため、ID 順に並べると作成順になる。
    pub struct TodoId;
}

/// Todo レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id:          TodoId,
    pub description: String,
    pub done:        bool,
}

impl Todo {
    /// 採番済みの ID と作成ペイロードからレコードを組み立てる
    pub fn new(id: TodoId, new_todo: NewTodo) -> Self {
        Self {
            id,
            description: new_todo.description,
            done: new_todo.done,
        }
    }

    /// 変更内容を適用したレコードを返す
    ///
    /// `None` のフィールドは元の値を維持する。`id` は変更されない。
    pub fn apply(self, changes: &TodoChanges) -> Self {
        Self {
            id:          self.id,
            description: changes
                .description
                .clone()
                .unwrap_or(self.description),
            done:        changes.done.unwrap_or(self.done),
        }
    }
}

/// Todo 作成ペイロード
///
/// `description` は必須。`done` は省略時 `false`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub description: String,
    #[serde(default)]
    pub done:        bool,
}

/// Todo 更新ペイロード
///
/// 全フィールド任意。指定したフィールドのみ置き換える（部分更新）。
/// 全フィールドを指定すれば全置換になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done:        Option<bool>,
}

impl TodoChanges {
    /// 変更対象のフィールドが 1 つもないか
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.done.is_none()
    }
}

/// Todo の検索条件
///
/// すべて `None` の空フィルタは全件に一致する。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub done: Option<bool>,
}

impl TodoFilter {
    /// 全件に一致する空フィルタ
    pub fn all() -> Self {
        Self::default()
    }

    /// レコードが条件に一致するか
    pub fn matches(&self, todo: &Todo) -> bool {
        self.done.is_none_or(|done| todo.done == done)
    }
}

/// find-and-update が返すレコードの版
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnDocument {
    /// 更新前のレコード
    Before,
    /// 更新後のレコード
    #[default]
    After,
}

/// find-and-update のオプション
///
/// デフォルトは更新後のレコードを返す。
/// 返すレコードの版だけを指定でき、旧来の find-and-modify 切り替えに相当する項目は持たない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindAndUpdateOptions {
    pub return_document: ReturnDocument,
}
