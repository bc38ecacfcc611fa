//! # Todo Service 設定
//!
//! 環境変数から Todo Service サーバーの設定を読み込む。
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `TODO_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `TODO_PORT` | No | `3000` | ポート番号 |
//! | `TODO_STORE` | No | `memory` | ストア（`memory` または `dynamodb`） |
//! | `DYNAMODB_ENDPOINT` | `dynamodb` 時 | - | DynamoDB エンドポイント URL |
//! | `TODO_TABLE_NAME` | No | `todos` | DynamoDB テーブル名 |

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TABLE_NAME: &str = "todos";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// ポート番号として解釈できない
    #[error("TODO_PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),

    /// 未知のストア
    #[error("TODO_STORE は memory または dynamodb である必要があります: {0:?}")]
    UnknownStore(String),

    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),
}

/// ストアの選択
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// インメモリストア（プロセス終了で内容は失われる）
    Memory,
    /// DynamoDB
    DynamoDb {
        endpoint:   String,
        table_name: String,
    },
}

/// Todo Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoServiceConfig {
    /// バインドアドレス
    pub host:  String,
    /// ポート番号
    pub port:  u16,
    /// ストア
    pub store: StoreConfig,
}

impl TodoServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// `lookup` は変数名を受け取り、値があれば返す。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("TODO_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("TODO_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let store = match lookup("TODO_STORE").as_deref() {
            None | Some("memory") => StoreConfig::Memory,
            Some("dynamodb") => StoreConfig::DynamoDb {
                endpoint:   lookup("DYNAMODB_ENDPOINT")
                    .ok_or(ConfigError::Missing("DYNAMODB_ENDPOINT"))?,
                table_name: lookup("TODO_TABLE_NAME")
                    .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            },
            Some(other) => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        Ok(Self { host, port, store })
    }

    /// `TcpListener::bind` に渡すアドレス
    ///
    /// ホスト名（`localhost` 等）や IPv6 リテラルもそのまま解決される。
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
