//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **JsonTaskCountStore**: `task_counts.json` を履歴として読み書き
//! - **InMemoryTaskCountStore**: テスト用の履歴
//! - **StaticTreeWriter**: ビューア向けの JSON ツリー
//! - **ExampleSource**: デモ用の合成データ
//!
//! HTTP のトラッカー実装（Kitsu）は CLI クレート側に置きます。

mod json_file;

pub mod example_source;
pub mod inmem_store;
pub mod json_store;
pub mod static_tree;

// 主要な型を再エクスポート
pub use self::example_source::{EXAMPLE_PROJECT_ID, ExampleSource};
pub use self::inmem_store::InMemoryTaskCountStore;
pub use self::json_store::{JsonTaskCountStore, TASK_COUNTS_FILE};
pub use self::static_tree::{CONTEXT_FILE, StaticTreeWriter, projects_root};
