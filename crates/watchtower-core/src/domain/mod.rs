//! Domain model (timestamps, entities, task-count series, production data).

pub mod entity;
pub mod production;
pub mod task_count;
pub mod timestamp;

pub use self::entity::{EntityRecord, TaskRecord};
pub use self::production::{
    Asset, AssetType, DEFAULT_FPS, Edit, ProductionContext, Project, ProjectData, Sequence, Shot,
    ShotCasting, ShotData, Task, TaskStatus, TaskType, User,
};
pub use self::task_count::{CountPoint, GroupKey, StatusBucket, TaskCountGroup, TaskCountSeries};
pub use self::timestamp::Timestamp;
