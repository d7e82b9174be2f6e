//! Ports - 抽象化レイヤー
//!
//! 各 trait は外部システム（トラッカー API, ファイルシステム, 時刻）への
//! インターフェースを提供し、実装の詳細を隠蔽します。
//!
//! # 設計原則
//! - 集計ロジック（aggregate）は I/O を持たない
//! - I/O はすべてここの trait 越しに行う

pub mod clock;
pub mod id_generator;
pub mod site_writer;
pub mod task_count_store;
pub mod tracker;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, SeededUlidGenerator, UlidGenerator};
pub use self::site_writer::SiteWriter;
pub use self::task_count_store::TaskCountStore;
pub use self::tracker::TrackerSource;
