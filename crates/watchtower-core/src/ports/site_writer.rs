//! SiteWriter port - ビューア向け静的ツリーの出力

use crate::domain::{ProductionContext, ProjectData};
use crate::error::WatchtowerError;

/// SiteWriter は context とプロジェクトのデータを書き出す
///
/// task_counts は TaskCountStore が担当するので、ここには含めない。
pub trait SiteWriter: Send + Sync {
    fn write_context(&self, context: &ProductionContext) -> Result<(), WatchtowerError>;

    fn write_project(&self, data: &ProjectData) -> Result<(), WatchtowerError>;
}
