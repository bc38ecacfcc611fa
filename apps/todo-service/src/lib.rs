//! # Todo Service ライブラリ
//!
//! Todo の REST API（作成・一覧・取得・更新・削除）を提供する。
//!
//! ## モジュール構成
//!
//! - `app`: ルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: ストア失敗の集中エラー処理
//! - `handler`: HTTP ハンドラ

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
