//! 端末ハードウェアのシミュレータ
//!
//! カメラ・電子秤・スキャンヘッド・時計を1つのトレイトにまとめ、
//! テストでは決定的な値を差し込めるようにする。

use crate::mids::MidTable;
use crate::storage_code;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// 電子秤の読み取り範囲（g, 上限は含まない）
pub const SCALE_MIN_GRAMS: u32 = 100;
pub const SCALE_MAX_GRAMS: u32 = 2000;

/// 模擬スキャンで許可MIDが読まれる既定の確率
pub const DEFAULT_SCAN_HIT_RATE: f64 = 0.7;

/// 端末ハードウェアの抽象
pub trait DeviceSimulator {
    /// 現在時刻（epoch ms）
    fn now_millis(&mut self) -> i64;

    /// カメラ撮影。写真への参照を返す
    fn capture_photo(&mut self) -> String;

    /// 電子秤の読み取り（g）
    fn read_scale(&mut self) -> u32;

    /// 庫位コードのスキャン
    fn scan_storage_code(&mut self) -> String;

    /// 商品バーコードのスキャン
    fn scan_mid(&mut self, mids: &MidTable) -> String;
}

/// 乱数ベースのシミュレータ（実行時用）
#[derive(Debug)]
pub struct RandomDevice {
    rng: StdRng,
    scan_hit_rate: f64,
}

impl RandomDevice {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            scan_hit_rate: DEFAULT_SCAN_HIT_RATE,
        }
    }

    /// 乱数シードを固定（再現用）
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            scan_hit_rate: DEFAULT_SCAN_HIT_RATE,
        }
    }

    pub fn scan_hit_rate(mut self, rate: f64) -> Self {
        self.scan_hit_rate = rate.clamp(0.0, 1.0);
        self
    }
}

impl Default for RandomDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceSimulator for RandomDevice {
    fn now_millis(&mut self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn capture_photo(&mut self) -> String {
        let shot: u32 = self.rng.gen();
        format!("camera://capture/{:08x}.jpg", shot)
    }

    fn read_scale(&mut self) -> u32 {
        self.rng.gen_range(SCALE_MIN_GRAMS..SCALE_MAX_GRAMS)
    }

    fn scan_storage_code(&mut self) -> String {
        storage_code::generate(&mut self.rng)
    }

    fn scan_mid(&mut self, mids: &MidTable) -> String {
        if !mids.is_empty() && self.rng.gen_bool(self.scan_hit_rate) {
            let index = self.rng.gen_range(0..mids.len());
            if let Some(mid) = mids.get(index) {
                return mid.to_string();
            }
        }
        self.rng.gen_range(100_000_000_000u64..1_000_000_000_000u64).to_string()
    }
}

/// 事前に用意した値を順に返すシミュレータ（テスト用）
///
/// キューが空になった後は固定値を返す。時計は `advance` しない限り進まない。
#[derive(Debug, Clone, Default)]
pub struct ScriptedDevice {
    now: i64,
    photos: VecDeque<String>,
    weights: VecDeque<u32>,
    codes: VecDeque<String>,
    mids: VecDeque<String>,
    shots: u32,
}

impl ScriptedDevice {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: start_millis,
            ..Default::default()
        }
    }

    pub fn with_photos<I, S>(mut self, photos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.photos.extend(photos.into_iter().map(Into::into));
        self
    }

    pub fn with_weights<I: IntoIterator<Item = u32>>(mut self, weights: I) -> Self {
        self.weights.extend(weights);
        self
    }

    pub fn with_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.codes.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn with_mids<I, S>(mut self, mids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mids.extend(mids.into_iter().map(Into::into));
        self
    }

    pub fn advance(&mut self, millis: i64) {
        self.now += millis;
    }

    pub fn set_now(&mut self, millis: i64) {
        self.now = millis;
    }
}

impl DeviceSimulator for ScriptedDevice {
    fn now_millis(&mut self) -> i64 {
        self.now
    }

    fn capture_photo(&mut self) -> String {
        self.shots += 1;
        self.photos
            .pop_front()
            .unwrap_or_else(|| format!("scripted://photo/{}", self.shots))
    }

    fn read_scale(&mut self) -> u32 {
        self.weights.pop_front().unwrap_or(1000)
    }

    fn scan_storage_code(&mut self) -> String {
        self.codes.pop_front().unwrap_or_else(|| "ZK-aaaaaaaa".to_string())
    }

    fn scan_mid(&mut self, mids: &MidTable) -> String {
        self.mids
            .pop_front()
            .or_else(|| mids.get(0).map(str::to_string))
            .unwrap_or_default()
    }
}
