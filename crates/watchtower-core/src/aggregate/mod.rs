//! Task-count aggregation: snapshot counting and incremental merge.
//!
//! Both functions are pure. A run is expected to call `count_tasks` once,
//! then `merge_task_counts` once against whatever history was loaded.

mod counter;
mod merge;

pub use counter::count_tasks;
pub use merge::merge_task_counts;
