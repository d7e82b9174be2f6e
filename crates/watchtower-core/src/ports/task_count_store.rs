//! TaskCountStore port - 集計履歴の永続化
//!
//! 前回までの TaskCountSeries を読み込み、マージ結果を書き戻します。

use crate::domain::TaskCountSeries;
use crate::error::WatchtowerError;

/// TaskCountStore はプロジェクトごとの集計履歴を保持
///
/// # 設計原則
/// - 履歴がない（初回実行）場合は `Ok(None)` を返す
/// - 読めない履歴もエラーにせず `Ok(None)`（コールドスタート扱い）
/// - `save` は丸ごと上書き
pub trait TaskCountStore: Send + Sync {
    fn load(&self, project_id: &str) -> Result<Option<TaskCountSeries>, WatchtowerError>;

    fn save(&self, project_id: &str, series: &TaskCountSeries) -> Result<(), WatchtowerError>;
}
