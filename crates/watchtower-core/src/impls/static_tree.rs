//! StaticTreeWriter - ビューアが読む JSON ツリーを書き出す
//!
//! ```text
//! <root>/context.json
//! <root>/<project_id>/project.json
//! <root>/<project_id>/edit.json
//! <root>/<project_id>/assets.json
//! <root>/<project_id>/shots.json
//! <root>/<project_id>/sequences.json
//! <root>/<project_id>/casting.json
//! ```
//!
//! `<root>` は通常 `<destination>/data/projects`。

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::json_file::write_json;
use crate::domain::{ProductionContext, ProjectData};
use crate::error::WatchtowerError;
use crate::ports::SiteWriter;

pub const CONTEXT_FILE: &str = "context.json";

/// Static tree root under a destination directory.
pub fn projects_root(destination: &Path) -> PathBuf {
    destination.join("data").join("projects")
}

#[derive(Debug, Clone)]
pub struct StaticTreeWriter {
    root: PathBuf,
}

impl StaticTreeWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn dump<T: Serialize + ?Sized>(
        &self,
        project_id: &str,
        name: &str,
        value: &T,
    ) -> Result<(), WatchtowerError> {
        let path = self.root.join(project_id).join(format!("{name}.json"));
        write_json(&path, value)?;
        debug!(project_id, name, "saved project data");
        Ok(())
    }
}

impl SiteWriter for StaticTreeWriter {
    fn write_context(&self, context: &ProductionContext) -> Result<(), WatchtowerError> {
        write_json(&self.root.join(CONTEXT_FILE), context)?;
        debug!(projects = context.projects.len(), "saved context");
        Ok(())
    }

    fn write_project(&self, data: &ProjectData) -> Result<(), WatchtowerError> {
        let id = data.project.id.as_str();
        self.dump(id, "project", &data.project)?;
        self.dump(id, "edit", &data.edit)?;
        self.dump(id, "assets", &data.assets)?;
        self.dump(id, "shots", &data.shots)?;
        self.dump(id, "sequences", &data.sequences)?;
        self.dump(id, "casting", &data.casting)?;
        Ok(())
    }
}
