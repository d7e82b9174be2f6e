//! Pipeline - 1 回の実行
//!
//! # フロー（プロジェクトごと）
//! 1. TrackerSource::fetch_project() でデータ取得
//! 2. count_tasks() で今回のスナップショット
//! 3. TaskCountStore::load() で履歴（なければ空）
//! 4. merge_task_counts() で履歴に追記
//! 5. TaskCountStore::save() で永続化
//! 6. SiteWriter::write_project() で静的ツリー出力

use tracing::{debug, info, warn};

use super::status::{ProjectReport, RunSummary};
use crate::aggregate::{count_tasks, merge_task_counts};
use crate::domain::{Project, ProjectData, Timestamp};
use crate::error::WatchtowerError;
use crate::ports::{Clock, SiteWriter, TaskCountStore, TrackerSource};

/// Pipeline は PipelineBuilder から作る
pub struct Pipeline {
    pub(super) source: Box<dyn TrackerSource>,
    pub(super) store: Box<dyn TaskCountStore>,
    pub(super) writer: Box<dyn SiteWriter>,
    pub(super) clock: Box<dyn Clock>,
    pub(super) projects: Vec<String>,
    pub(super) timestamp: Option<Timestamp>,
}

impl Pipeline {
    /// 集計時刻（override があればそれ、なければ clock）
    pub fn run_timestamp(&self) -> Timestamp {
        self.timestamp
            .clone()
            .unwrap_or_else(|| Timestamp::from(self.clock.now()))
    }

    fn selected(&self, project: &Project) -> bool {
        self.projects.is_empty() || self.projects.iter().any(|id| *id == project.id)
    }

    pub async fn run(&self) -> Result<RunSummary, WatchtowerError> {
        let timestamp = self.run_timestamp();
        let mut context = self.source.fetch_context().await?;

        for wanted in &self.projects {
            if !context.projects.iter().any(|p| p.id == *wanted) {
                warn!(project_id = %wanted, "requested project not found in tracker context");
            }
        }
        context.projects.retain(|p| self.selected(p));
        self.writer.write_context(&context)?;

        let mut summary = RunSummary::new(timestamp.clone());
        for project in &context.projects {
            let data = self.source.fetch_project(project).await?;
            let report = self.process_project(&data, &timestamp)?;
            info!(
                project_id = %report.project_id,
                groups = report.groups,
                new_points = report.new_points,
                "project written"
            );
            summary.record(report);
        }
        Ok(summary)
    }

    /// count → load → merge → save → write（1 プロジェクト分、同期）
    pub fn process_project(
        &self,
        data: &ProjectData,
        timestamp: &Timestamp,
    ) -> Result<ProjectReport, WatchtowerError> {
        let project_id = data.project.id.as_str();

        let entities = data.entities();
        let snapshot = count_tasks(&entities, timestamp);
        debug!(project_id, entities = entities.len(), groups = snapshot.len(), "counted tasks");

        let history = self.store.load(project_id)?.unwrap_or_default();
        let merged = merge_task_counts(&history, &snapshot);
        self.store.save(project_id, &merged)?;

        self.writer.write_project(data)?;

        Ok(ProjectReport {
            project_id: project_id.to_string(),
            groups: merged.len(),
            data_points: merged.data_points(),
            new_points: snapshot.data_points(),
        })
    }
}
