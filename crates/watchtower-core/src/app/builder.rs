//! PipelineBuilder - パイプラインの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 開発体験の改善（明確なエラーメッセージ）

use std::path::Path;

use super::pipeline::Pipeline;
use crate::domain::Timestamp;
use crate::impls::{JsonTaskCountStore, StaticTreeWriter, projects_root};
use crate::ports::{Clock, SiteWriter, SystemClock, TaskCountStore, TrackerSource};

/// PipelineBuilder はパイプラインを構築
///
/// # 使用例
/// ```ignore
/// let pipeline = PipelineBuilder::new()
///     .source(ExampleSource::generate(&ids, None))
///     .destination(&dest)
///     .build()?;
/// let summary = pipeline.run().await?;
/// ```
///
/// # Fail-fast 設計
/// - source / store / writer は必須
/// - build() 時に不足をまとめて BuildError で返す
/// - clock は省略時 SystemClock
pub struct PipelineBuilder {
    source: Option<Box<dyn TrackerSource>>,
    store: Option<Box<dyn TaskCountStore>>,
    writer: Option<Box<dyn SiteWriter>>,
    clock: Option<Box<dyn Clock>>,
    projects: Vec<String>,
    timestamp: Option<Timestamp>,
}

/// BuildError はパイプライン構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing pipeline parts: {0:?}. These must be set before build().")]
    MissingParts(Vec<&'static str>),
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            source: None,
            store: None,
            writer: None,
            clock: None,
            projects: Vec::new(),
            timestamp: None,
        }
    }

    /// データの取得元
    pub fn source(mut self, source: impl TrackerSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// 集計履歴の保存先
    pub fn store(mut self, store: impl TaskCountStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// 静的ツリーの出力先
    pub fn writer(mut self, writer: impl SiteWriter + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// store と writer を `<destination>/data/projects` に揃えて設定
    pub fn destination(self, destination: &Path) -> Self {
        let root = projects_root(destination);
        self.store(JsonTaskCountStore::new(root.clone()))
            .writer(StaticTreeWriter::new(root))
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// 処理するプロジェクトを id で絞り込む（空なら全部）
    pub fn only_projects<I, S>(mut self, project_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projects = project_ids.into_iter().map(Into::into).collect();
        self
    }

    /// clock の代わりに使う集計時刻
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// PipelineBuilder を検証して Pipeline を生成
    ///
    /// # 検証
    /// - source / store / writer がすべて設定されているか
    /// - 不足があれば BuildError::MissingParts を返す
    pub fn build(self) -> Result<Pipeline, BuildError> {
        let mut missing = Vec::new();
        if self.source.is_none() {
            missing.push("source");
        }
        if self.store.is_none() {
            missing.push("store");
        }
        if self.writer.is_none() {
            missing.push("writer");
        }

        match (self.source, self.store, self.writer) {
            (Some(source), Some(store), Some(writer)) => Ok(Pipeline {
                source,
                store,
                writer,
                clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
                projects: self.projects,
                timestamp: self.timestamp,
            }),
            _ => Err(BuildError::MissingParts(missing)),
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{ExampleSource, InMemoryTaskCountStore};
    use crate::ports::UlidGenerator;

    fn example() -> ExampleSource {
        ExampleSource::generate(&UlidGenerator::new(SystemClock), Some(1))
    }

    #[test]
    fn test_build_success() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = PipelineBuilder::new()
            .source(example())
            .destination(dir.path())
            .build();
        assert!(pipeline.is_ok());
    }

    #[test]
    fn test_build_missing_parts() {
        let pipeline = PipelineBuilder::new()
            .source(example())
            .store(InMemoryTaskCountStore::new())
            .build();
        assert!(matches!(
            pipeline,
            Err(BuildError::MissingParts(missing)) if missing == vec!["writer"]
        ));
    }

    #[test]
    fn test_build_nothing_set() {
        let pipeline = PipelineBuilder::new().build();
        assert!(matches!(
            pipeline,
            Err(BuildError::MissingParts(missing)) if missing == vec!["source", "store", "writer"]
        ));
    }
}
