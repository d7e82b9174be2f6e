//! IdGenerator port - ID 生成の抽象化
//!
//! トラッカーを使わない（example モード）ときに、エンティティの id を生成します。
//! テスト容易性のために、trait として抽象化しています。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（Clock + ランダム）
//! - **SeededUlidGenerator**: seed から決定的に生成（同じ seed なら同じ id 列）

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ulid::Ulid;

use crate::ports::Clock;

/// IdGenerator は文字列 id を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数スレッドから使える）
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> String;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って時刻部分を決めます。
/// FixedClock を使えば timestamp 部分は決定的になります（ランダム部分は別）。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_id(&self) -> String {
        self.next_ulid().to_string()
    }
}

/// SeededUlidGenerator は seed 付き RNG から ULID を作る
///
/// timestamp 部分は 0 固定。同じ seed で作れば同じ順序で同じ id を返すので、
/// 合成データを何度生成しても履歴のキーが揃います。
pub struct SeededUlidGenerator {
    rng: Mutex<StdRng>,
}

impl SeededUlidGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl IdGenerator for SeededUlidGenerator {
    fn generate_id(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ulid::from_parts(0, rng.r#gen()).to_string()
    }
}
