//! # TodoRepository
//!
//! Todo レコードの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **DynamoDB**: Todo はパーティションキー `id` のみを持つドキュメントとして格納
//! - **条件付き書き込み**: 更新・削除は `attribute_exists(id)` 相当で存在確認を兼ねる
//! - **作成順**: ID は UUID v7 のため、一覧は ID 順に並べて作成順を再現する

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    Client,
    operation::scan::builders::ScanFluentBuilder,
    types::{AttributeValue, ReturnValue},
};
use tasklist_domain::todo::{
    FindAndUpdateOptions,
    NewTodo,
    ReturnDocument,
    Todo,
    TodoChanges,
    TodoFilter,
    TodoId,
};

use crate::InfraError;

/// Todo ストアのトレイト
///
/// 各操作はストアへの呼び出し 1 回に対応する。
/// 対象が存在しない場合は `Ok(None)`、ストアの失敗は `Err` で返す。
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// レコードを挿入する。ID はストアが採番する
    async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError>;

    /// 検索条件に一致するレコードをストアの順序で返す
    async fn find(&self, filter: &TodoFilter) -> Result<Vec<Todo>, InfraError>;

    /// ID でレコードを取得する
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError>;

    /// ID で検索して更新する
    ///
    /// 返すレコードの版（更新前 / 更新後）は `options` に従う。
    async fn find_by_id_and_update(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
        options: FindAndUpdateOptions,
    ) -> Result<Option<Todo>, InfraError>;

    /// ID で検索して削除し、削除したレコードを返す
    async fn find_by_id_and_delete(&self, id: &TodoId) -> Result<Option<Todo>, InfraError>;
}

/// DynamoDB 実装の TodoRepository
pub struct DynamoDbTodoRepository {
    client:     Client,
    table_name: String,
}

impl DynamoDbTodoRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    fn scan_page(
        &self,
        filter: &TodoFilter,
        start_key: Option<HashMap<String, AttributeValue>>,
    ) -> ScanFluentBuilder {
        let scan = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_exclusive_start_key(start_key);

        match filter.done {
            Some(done) => scan
                .filter_expression("#done = :done")
                .expression_attribute_names("#done", "done")
                .expression_attribute_values(":done", AttributeValue::Bool(done)),
            None => scan,
        }
    }
}

#[async_trait]
impl TodoRepository for DynamoDbTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, InfraError> {
        let todo = Todo::new(TodoId::new(), new_todo.clone());

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(convert_todo_to_item(&todo)))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("Todo の挿入に失敗: {e}")))?;

        Ok(todo)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(?filter))]
    async fn find(&self, filter: &TodoFilter) -> Result<Vec<Todo>, InfraError> {
        let mut todos = Vec::new();
        let mut start_key = None;

        // LastEvaluatedKey がなくなるまでページを辿る
        loop {
            let output = self
                .scan_page(filter, start_key)
                .send()
                .await
                .map_err(|e| InfraError::dynamo_db(format!("Todo の検索に失敗: {e}")))?;

            for item in output.items() {
                todos.push(convert_item_to_todo(item)?);
            }

            start_key = output.last_evaluated_key().cloned();
            if start_key.is_none() {
                break;
            }
        }

        // Scan の返却順は不定
        todos.sort_by_key(|todo| todo.id);

        Ok(todos)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", id_attribute(id))
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("Todo の取得に失敗: {e}")))?;

        output.item().map(convert_item_to_todo).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id_and_update(
        &self,
        id: &TodoId,
        changes: &TodoChanges,
        options: FindAndUpdateOptions,
    ) -> Result<Option<Todo>, InfraError> {
        // 空の UpdateExpression は DynamoDB が受け付けない。変更なしなら更新前後は同一
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut assignments = Vec::new();
        let mut update = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", id_attribute(id))
            .condition_expression("attribute_exists(id)");

        if let Some(description) = &changes.description {
            assignments.push("#description = :description");
            update = update
                .expression_attribute_names("#description", "description")
                .expression_attribute_values(
                    ":description",
                    AttributeValue::S(description.clone()),
                );
        }

        if let Some(done) = changes.done {
            assignments.push("#done = :done");
            update = update
                .expression_attribute_names("#done", "done")
                .expression_attribute_values(":done", AttributeValue::Bool(done));
        }

        let return_values = match options.return_document {
            ReturnDocument::Before => ReturnValue::AllOld,
            ReturnDocument::After => ReturnValue::AllNew,
        };

        let result = update
            .update_expression(format!("SET {}", assignments.join(", ")))
            .return_values(return_values)
            .send()
            .await;

        match result {
            Ok(output) => output.attributes().map(convert_item_to_todo).transpose(),
            Err(err) => {
                // 条件不成立は対象が存在しないことを意味する
                let not_found = err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception());
                if not_found {
                    Ok(None)
                } else {
                    Err(InfraError::dynamo_db(format!("Todo の更新に失敗: {err}")))
                }
            }
        }
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id_and_delete(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", id_attribute(id))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("Todo の削除に失敗: {e}")))?;

        output.attributes().map(convert_item_to_todo).transpose()
    }
}

fn id_attribute(id: &TodoId) -> AttributeValue {
    AttributeValue::S(id.to_string())
}

/// Todo を DynamoDB アイテムに変換する
fn convert_todo_to_item(todo: &Todo) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("id".to_string(), id_attribute(&todo.id)),
        (
            "description".to_string(),
            AttributeValue::S(todo.description.clone()),
        ),
        ("done".to_string(), AttributeValue::Bool(todo.done)),
    ])
}

/// DynamoDB アイテムを Todo に変換する
fn convert_item_to_todo(item: &HashMap<String, AttributeValue>) -> Result<Todo, InfraError> {
    let id_str = item
        .get("id")
        .and_then(|v| v.as_s().ok())
        .ok_or_else(|| InfraError::invalid_item("属性 'id' が見つかりません"))?;
    let id = uuid::Uuid::parse_str(id_str)
        .map(TodoId::from_uuid)
        .map_err(|e| InfraError::invalid_item(format!("id のパースに失敗: {e}")))?;

    let description = item
        .get("description")
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| InfraError::invalid_item("属性 'description' が見つかりません"))?;

    let done = item
        .get("done")
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| InfraError::invalid_item("属性 'done' が見つかりません"))?;

    Ok(Todo {
        id,
        description,
        done,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Todo {
        Todo {
            id:          TodoId::from_uuid(uuid::Uuid::nil()),
            description: "牛乳を買う".to_string(),
            done:        true,
        }
    }

    #[test]
    fn test_todoとアイテムの相互変換() {
        let item = convert_todo_to_item(&sample());

        assert_eq!(
            item.get("id"),
            Some(&AttributeValue::S(
                "00000000-0000-0000-0000-000000000000".to_string()
            ))
        );
        assert_eq!(item.get("done"), Some(&AttributeValue::Bool(true)));
        assert_eq!(convert_item_to_todo(&item).unwrap(), sample());
    }

    #[test]
    fn test_属性が欠けたアイテムはinvalid_itemになる() {
        let mut item = convert_todo_to_item(&sample());
        item.remove("done");

        let err = convert_item_to_todo(&item).unwrap_err();

        assert!(matches!(
            err.kind(),
            crate::InfraErrorKind::InvalidItem(msg) if msg.contains("done")
        ));
    }

    #[test]
    fn test_idがuuidでないアイテムはinvalid_itemになる() {
        let mut item = convert_todo_to_item(&sample());
        item.insert("id".to_string(), AttributeValue::S("abc".to_string()));

        let err = convert_item_to_todo(&item).unwrap_err();

        assert!(matches!(err.kind(), crate::InfraErrorKind::InvalidItem(_)));
    }
}
