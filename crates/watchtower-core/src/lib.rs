//! watchtower-core
//!
//! Core building blocks for the Watchtower pipeline: tracker data in, static
//! JSON tree for the viewer out.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（timestamp, entity, task_count, production）
//! - **aggregate**: タスク数の集計とマージ（純粋関数、I/O なし）
//! - **ports**: 抽象化レイヤー（TrackerSource, TaskCountStore, SiteWriter, Clock, IdGenerator）
//! - **impls**: 実装（JSON ファイル、インメモリ、example データ）
//! - **app**: アプリケーションロジック（PipelineBuilder, Pipeline）
//! - **error**: エラー型

pub mod aggregate;
pub mod app;
pub mod domain;
pub mod error;
pub mod impls;
pub mod ports;

pub use aggregate::{count_tasks, merge_task_counts};
pub use error::WatchtowerError;
