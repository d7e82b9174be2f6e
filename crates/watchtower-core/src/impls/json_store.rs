//! JsonTaskCountStore - `task_counts.json` をそのまま履歴として使う
//!
//! 永続化された集計と、今回の出力成果物は同じファイルです：
//! `<root>/<project_id>/task_counts.json`

use std::path::PathBuf;

use tracing::{debug, warn};

use super::json_file::{read_json, write_json};
use crate::domain::TaskCountSeries;
use crate::error::WatchtowerError;
use crate::ports::TaskCountStore;

pub const TASK_COUNTS_FILE: &str = "task_counts.json";

/// JsonTaskCountStore はファイルベースの TaskCountStore
///
/// # 使用例
/// ```ignore
/// let store = JsonTaskCountStore::new(destination.join("data/projects"));
/// let history = store.load("project-id")?.unwrap_or_default();
/// ```
#[derive(Debug, Clone)]
pub struct JsonTaskCountStore {
    root: PathBuf,
}

impl JsonTaskCountStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, project_id: &str) -> PathBuf {
        self.root.join(project_id).join(TASK_COUNTS_FILE)
    }
}

impl TaskCountStore for JsonTaskCountStore {
    fn load(&self, project_id: &str) -> Result<Option<TaskCountSeries>, WatchtowerError> {
        let path = self.path_for(project_id);
        if !path.is_file() {
            debug!(path = %path.display(), "no task count history yet");
            return Ok(None);
        }
        match read_json::<TaskCountSeries>(&path) {
            Ok(series) => {
                let zero = series.zero_points();
                if zero > 0 {
                    warn!(path = %path.display(), zero, "task count history has zero counts; keeping them");
                }
                Ok(Some(series))
            }
            Err(err) => {
                // 壊れた履歴は初回実行と同じ扱い
                warn!(path = %path.display(), error = %err, "ignoring unreadable task count history");
                Ok(None)
            }
        }
    }

    fn save(&self, project_id: &str, series: &TaskCountSeries) -> Result<(), WatchtowerError> {
        let path = self.path_for(project_id);
        write_json(&path, series)?;
        debug!(path = %path.display(), groups = series.len(), "saved task counts");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CountPoint, StatusBucket, TaskCountGroup, Timestamp};
    use std::fs;

    fn series() -> TaskCountSeries {
        TaskCountSeries::from(vec![TaskCountGroup::new(
            "animation",
            Some("ep01"),
            vec![StatusBucket::new(
                "done",
                vec![CountPoint::new(Timestamp::from_raw("2020-02-01T00:00:00"), 3)],
            )],
        )])
    }

    #[test]
    fn missing_file_is_a_cold_start() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTaskCountStore::new(dir.path());
        assert_eq!(store.load("p1").unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTaskCountStore::new(dir.path());

        store.save("p1", &series()).unwrap();

        assert!(dir.path().join("p1/task_counts.json").is_file());
        assert_eq!(store.load("p1").unwrap(), Some(series()));
        assert_eq!(store.load("p2").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_a_cold_start() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTaskCountStore::new(dir.path());
        let path = store.path_for("p1");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{ not json").unwrap();

        assert_eq!(store.load("p1").unwrap(), None);
    }

    #[test]
    fn zero_counts_are_kept_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTaskCountStore::new(dir.path());
        let path = store.path_for("p1");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"[{"task_type_id":"layout","episode_id":null,"task_statuses":[{"task_status_id":"todo","data":[{"timestamp":"2020-02-01T00:00:00","count":0}]}]}]"#,
        )
        .unwrap();

        let loaded = store.load("p1").unwrap().unwrap();
        assert_eq!(loaded.zero_points(), 1);
        assert_eq!(loaded.data_points(), 1);
    }

    #[test]
    fn reads_files_written_by_older_runs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTaskCountStore::new(dir.path());
        let path = store.path_for("p1");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        // episode_id なし、日付だけの timestamp
        fs::write(
            &path,
            r#"[{"task_type_id":"layout","task_statuses":[{"task_status_id":"todo","data":[{"timestamp":"2020-02-01","count":4}]}]}]"#,
        )
        .unwrap();

        let loaded = store.load("p1").unwrap().unwrap();
        let group = loaded.group("layout", None).unwrap();
        assert_eq!(
            group.status("todo").unwrap().data,
            vec![CountPoint::new(Timestamp::from_raw("2020-02-01"), 4)]
        );
    }
}
