//! ExampleSource - デモ用の合成データ
//!
//! ライブのトラッカーなしでビューアを試すためのデータを生成します。
//! 1 プロジェクト、10 アセット、1 シーケンス、20 ショット。
//!
//! `seed` を渡すとランダムな選択（ステータス・担当者・フレーム長・キャスティング）が
//! 再現可能になります。id は IdGenerator から取るので、`seeded()` は
//! SeededUlidGenerator と組み合わせて id まで毎回同じデータを作ります。
//! 同じ出力先に何度実行しても、履歴は同じグループに点が追加されていきます。

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::{
    Asset, AssetType, DEFAULT_FPS, Edit, ProductionContext, Project, ProjectData, Sequence, Shot,
    ShotCasting, ShotData, Task, TaskStatus, TaskType, User,
};
use crate::error::WatchtowerError;
use crate::ports::{IdGenerator, SeededUlidGenerator, TrackerSource};

pub const EXAMPLE_PROJECT_ID: &str = "example-project-uuid";

const ASSET_TYPES: [&str; 4] = ["Characters", "Props", "Environment", "FX"];
const ASSET_TASK_TYPES: [(&str, &str); 4] = [
    ("Concept", "#8D6E63"),
    ("Modeling", "#78909C"),
    ("Shading", "#64B5F6"),
    ("Rigging", "#9CCC65"),
];
const SHOT_TASK_TYPES: [(&str, &str); 4] = [
    ("Storyboard", "#43A047"),
    ("Layout", "#7CB342"),
    ("Animation", "#F9A825"),
    ("Lighting", "#9CCC65"),
];
const TASK_STATUSES: [(&str, &str); 3] = [
    ("Todo", "#f5f5f5"),
    ("Work In Progress", "#3273dc"),
    ("Done", "#22d160"),
];

const USER_COUNT: usize = 10;
const ASSET_COUNT: usize = 10;
const SHOT_COUNT: usize = 20;
const TASKS_PER_ASSET: usize = 3;
const TASKS_PER_SHOT: usize = 4;
const CAST_PER_SHOT: usize = 3;
const FRAME_OFFSET: i64 = 20;

fn thumbnail(picture: usize) -> Option<String> {
    Some(format!("https://picsum.photos/id/{picture}/192/108"))
}

/// ExampleSource は生成済みのデータを返すだけの TrackerSource
#[derive(Debug, Clone)]
pub struct ExampleSource {
    context: ProductionContext,
    project: ProjectData,
}

impl ExampleSource {
    /// seed から id も含めて完全に再現可能なデータを作る
    pub fn seeded(seed: u64) -> Self {
        Self::generate(&SeededUlidGenerator::new(seed), Some(seed))
    }

    pub fn generate<G: IdGenerator + ?Sized>(ids: &G, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let users: Vec<User> = (0..USER_COUNT)
            .map(|i| User {
                id: ids.generate_id(),
                full_name: format!("User {i}"),
                has_avatar: false,
                thumbnail_url: None,
            })
            .collect();

        let asset_types: Vec<AssetType> = ASSET_TYPES
            .iter()
            .map(|name| AssetType { id: ids.generate_id(), name: name.to_string() })
            .collect();

        let task_type = |(name, color): &(&str, &str), for_shots: bool| TaskType {
            id: ids.generate_id(),
            name: name.to_string(),
            color: color.to_string(),
            for_shots,
        };
        let asset_task_types: Vec<TaskType> =
            ASSET_TASK_TYPES.iter().map(|t| task_type(t, false)).collect();
        let shot_task_types: Vec<TaskType> =
            SHOT_TASK_TYPES.iter().map(|t| task_type(t, true)).collect();

        let task_statuses: Vec<TaskStatus> = TASK_STATUSES
            .iter()
            .map(|(name, color)| TaskStatus {
                id: ids.generate_id(),
                name: name.to_string(),
                color: color.to_string(),
            })
            .collect();

        let project = Project {
            id: EXAMPLE_PROJECT_ID.to_string(),
            name: "Example Project".to_string(),
            ratio: "2.35:1".to_string(),
            resolution: "2018x858".to_string(),
            asset_types: vec![],
            task_types: vec![],
            task_statuses: vec![],
            team: users.iter().map(|u| u.id.clone()).collect(),
            thumbnail_url: thumbnail(10),
            fps: DEFAULT_FPS,
        };

        let random_task = |rng: &mut StdRng, types: &[TaskType]| -> Option<Task> {
            let status = task_statuses.choose(rng)?;
            let task_type = types.choose(rng)?;
            let user = users.choose(rng)?;
            Some(Task {
                task_status_id: status.id.clone(),
                task_type_id: task_type.id.clone(),
                assignees: vec![user.id.clone()],
                id: ids.generate_id(),
            })
        };

        let mut assets = Vec::with_capacity(ASSET_COUNT);
        for i in 0..ASSET_COUNT {
            let Some(asset_type) = asset_types.choose(&mut rng) else {
                break;
            };
            let asset_type_id = asset_type.id.clone();
            let tasks = (0..TASKS_PER_ASSET)
                .filter_map(|_| random_task(&mut rng, &asset_task_types))
                .collect();
            assets.push(Asset {
                id: ids.generate_id(),
                name: format!("Asset {i}"),
                asset_type_id,
                episode_id: None,
                tasks,
                thumbnail_url: thumbnail(i + 1),
            });
        }

        let sequence = Sequence { id: ids.generate_id(), name: "Seq 1".to_string() };

        let mut shots = Vec::with_capacity(SHOT_COUNT);
        let (mut frame_in, mut frame_out) = (0_i64, 50_i64);
        for i in 0..SHOT_COUNT {
            if i > 0 {
                frame_in = frame_out;
                frame_out += rng.gen_range(20..=150);
            }
            let mut shot = Shot::new(
                ids.generate_id(),
                format!("SH_{}", i + 1),
                sequence.id.clone(),
                ShotData { frame_in, frame_out },
                project.fps,
            );
            shot.thumbnail_url = thumbnail(i + 1);
            shot.tasks = (0..TASKS_PER_SHOT)
                .filter_map(|_| random_task(&mut rng, &shot_task_types))
                .collect();
            shots.push(shot);
        }

        let casting = shots
            .iter()
            .map(|shot| ShotCasting {
                shot_id: shot.id.clone(),
                asset_ids: assets
                    .choose_multiple(&mut rng, CAST_PER_SHOT)
                    .map(|a| a.id.clone())
                    .collect(),
            })
            .collect();

        let total_frames = shots.last().map_or(0, |s: &Shot| s.data.frame_out);
        let edit = Edit::for_project(&project.id, total_frames, FRAME_OFFSET);

        let mut task_types = asset_task_types;
        task_types.extend(shot_task_types);

        Self {
            context: ProductionContext {
                asset_types,
                users,
                projects: vec![project.clone()],
                task_status: task_statuses,
                task_types,
            },
            project: ProjectData {
                project,
                assets,
                shots,
                sequences: vec![sequence],
                casting,
                edit,
            },
        }
    }

    pub fn context(&self) -> &ProductionContext {
        &self.context
    }

    pub fn project_data(&self) -> &ProjectData {
        &self.project
    }
}

#[async_trait]
impl TrackerSource for ExampleSource {
    async fn fetch_context(&self) -> Result<ProductionContext, WatchtowerError> {
        Ok(self.context.clone())
    }

    async fn fetch_project(&self, project: &Project) -> Result<ProjectData, WatchtowerError> {
        if project.id != self.project.project.id {
            return Err(WatchtowerError::Tracker(format!(
                "unknown example project: {}",
                project.id
            )));
        }
        Ok(self.project.clone())
    }
}
