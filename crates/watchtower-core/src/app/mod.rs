//! App - アプリケーション層
//!
//! ports と aggregate を組み合わせて、1 回の実行を組み立てます。
//!
//! # 主要コンポーネント
//! - **PipelineBuilder**: 構築とワイヤリング（fail-fast 検証）
//! - **Pipeline**: fetch → count → load → merge → persist → write
//! - **RunSummary**: 実行結果のビュー

pub mod builder;
pub mod pipeline;
pub mod status;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, PipelineBuilder};
pub use self::pipeline::Pipeline;
pub use self::status::{ProjectReport, RunSummary};
