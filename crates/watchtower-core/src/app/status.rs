//! Status - 実行結果のサマリ
//!
//! CLI がログや `--json` 出力に使う、シリアライズ可能なビュー。

use serde::{Deserialize, Serialize};

use crate::domain::Timestamp;

/// 1 プロジェクト分の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub project_id: String,
    /// マージ後のグループ数
    pub groups: usize,
    /// マージ後の全データ点数
    pub data_points: usize,
    /// 今回追加されたデータ点数
    pub new_points: usize,
}

/// 1 回の実行の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub timestamp: Timestamp,
    pub projects: Vec<ProjectReport>,
}

impl RunSummary {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            projects: Vec::new(),
        }
    }

    pub fn record(&mut self, report: ProjectReport) {
        self.projects.push(report);
    }

    pub fn new_points(&self) -> usize {
        self.projects.iter().map(|p| p.new_points).sum()
    }
}
