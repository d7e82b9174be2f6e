//! InMemoryTaskCountStore - テスト・dry run 用の TaskCountStore

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::TaskCountSeries;
use crate::error::WatchtowerError;
use crate::ports::TaskCountStore;

/// InMemoryTaskCountStore はプロセス内だけで履歴を保持
///
/// # 実装詳細
/// - HashMap<String, TaskCountSeries> で project_id ごとに管理
/// - Mutex で排他制御（clone しても同じ中身を共有する）
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskCountStore {
    series: Arc<Mutex<HashMap<String, TaskCountSeries>>>,
}

impl InMemoryTaskCountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の履歴を入れた状態で作成
    pub fn with_history(project_id: impl Into<String>, series: TaskCountSeries) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.series.lock() {
            map.insert(project_id.into(), series);
        }
        store
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, TaskCountSeries>>, WatchtowerError> {
        self.series
            .lock()
            .map_err(|e| WatchtowerError::Other(format!("task count store poisoned: {e}")))
    }
}

impl TaskCountStore for InMemoryTaskCountStore {
    fn load(&self, project_id: &str) -> Result<Option<TaskCountSeries>, WatchtowerError> {
        Ok(self.lock()?.get(project_id).cloned())
    }

    fn save(&self, project_id: &str, series: &TaskCountSeries) -> Result<(), WatchtowerError> {
        self.lock()?.insert(project_id.to_string(), series.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskCountGroup;

    #[test]
    fn clones_share_state() {
        let store = InMemoryTaskCountStore::new();
        let other = store.clone();

        let series = TaskCountSeries::from(vec![TaskCountGroup::new("fx", None, vec![])]);
        store.save("p1", &series).unwrap();

        assert_eq!(other.load("p1").unwrap(), Some(series));
        assert_eq!(other.load("p2").unwrap(), None);
    }
}
