//! # インメモリストア
//!
//! プロセス内に Todo を保持する [`TodoRepository`] 実装。
//! ローカル開発（`TODO_STORE=memory`）とテストで使用する。
//!
//! 挿入順を保持し、一覧は挿入順で返す。プロセス終了で内容は失われる。

use async_trait::async_trait;
use tasklist_domain::todo::{
    FindAndUpdateOptions,
    NewTodo,
    ReturnDocument,
    Todo,
    TodoChanges,
    TodoFilter,
    TodoId,
};
use tokio::sync::RwLock;

use crate::{InfraError, repository::TodoRepository};

/// インメモリ実装の TodoRepository
#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存レコードを投入した状態で作成する
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: RwLock::new(todos),
        }
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
        let todo = Todo::new(TodoId::new(), new_todo.clone());
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn find(&self, filter: &TodoFilter) -> Result<Vec<Todo>, InfraError> {
        Ok(self
            .todos
            .read()
            .await
            .iter()
            .filter(|todo| filter.matches(todo))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        Ok(self
            .todos
            .read()
            .await
            .iter()
            .find(|todo| &todo.id == id)
            .cloned())
    }

    async fn find_by_id_and_update(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
        options: FindAndUpdateOptions,
    ) -> Result<Option<Todo>, InfraError> {
        let mut todos = self.todos.write().await;
        let Some(slot) = todos.iter_mut().find(|todo| &todo.id == id) else {
            return Ok(None);
        };

        let before = slot.clone();
        *slot = before.clone().apply(changes);

        Ok(Some(match options.return_document {
            ReturnDocument::Before => before,
            ReturnDocument::After => slot.clone(),
        }))
    }

    async fn find_by_id_and_delete(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        let mut todos = self.todos.write().await;
        Ok(todos
            .iter()
            .position(|todo| &todo.id == id)
            .map(|pos| todos.remove(pos)))
    }
}
