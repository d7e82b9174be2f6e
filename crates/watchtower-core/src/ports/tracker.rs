//! TrackerSource port - 制作管理トラッカーからの取得
//!
//! パイプラインはデータの取得方法を知りません。
//! HTTP（Kitsu）でも、合成データ（example）でも、この trait を実装すれば使えます。

use async_trait::async_trait;

use crate::domain::{ProductionContext, Project, ProjectData};
use crate::error::WatchtowerError;

/// TrackerSource は context とプロジェクト単位のデータを提供
#[async_trait]
pub trait TrackerSource: Send + Sync {
    /// ユーザー・アセット種別・タスク種別・ステータス・プロジェクト一覧
    async fn fetch_context(&self) -> Result<ProductionContext, WatchtowerError>;

    /// 1 プロジェクト分の assets / shots / sequences / casting / edit
    async fn fetch_project(&self, project: &Project) -> Result<ProjectData, WatchtowerError>;
}
