//! 入庫フロー（撮影 → 重量・庫位）
//!
//! ## 状態遷移
//! - Photo: トリガーで撮影し、電子秤の重量を自動入力して次へ
//! - WeightAndStorage: 重量は編集可能。庫位コードをスキャン（トリガー）
//!   または手入力+確定で、両方揃っていればレコードを確定する
//!
//! 取消はどの段階でも可能で、下書きは破棄される（呼び出し側で破棄）。

use crate::error::{Error, Result};
use crate::simulator::DeviceSimulator;
use crate::types::{InboundRecord, RecordDraft, PLACEHOLDER_PHOTO};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    Photo,
    WeightAndStorage,
}

/// フロー操作の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowProgress {
    /// この段階では何もしない
    Ignored,
    /// 撮影完了。電子秤の読み取り値（g）
    PhotoTaken { weight_grams: u32 },
    /// 必須項目が欠けているため確定できない
    Blocked(&'static str),
    /// レコード確定
    Sealed(InboundRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureFlow {
    draft: RecordDraft,
    step: FlowStep,
    pub weight: String,
    pub storage_code: String,
    photo_url: String,
}

impl CaptureFlow {
    pub fn new(draft: RecordDraft) -> Self {
        Self {
            draft,
            step: FlowStep::Photo,
            weight: String::new(),
            storage_code: String::new(),
            photo_url: String::new(),
        }
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn draft(&self) -> &RecordDraft {
        &self.draft
    }

    pub fn photo_url(&self) -> Option<&str> {
        if self.photo_url.is_empty() {
            None
        } else {
            Some(&self.photo_url)
        }
    }

    /// ハードウェアトリガー。段階に応じて撮影または庫位スキャン
    pub fn trigger(&mut self, device: &mut dyn DeviceSimulator) -> FlowProgress {
        match self.step {
            FlowStep::Photo => self.capture_photo(device),
            FlowStep::WeightAndStorage => {
                self.storage_code = device.scan_storage_code();
                self.submit(device)
            }
        }
    }

    fn capture_photo(&mut self, device: &mut dyn DeviceSimulator) -> FlowProgress {
        self.photo_url = device.capture_photo();
        let grams = device.read_scale();
        self.weight = grams.to_string();
        self.step = FlowStep::WeightAndStorage;
        tracing::debug!(photo = %self.photo_url, grams, "撮影完了");
        FlowProgress::PhotoTaken { weight_grams: grams }
    }

    /// 重量の手修正（撮影後のみ）
    pub fn set_weight(&mut self, text: impl Into<String>) {
        if self.step == FlowStep::WeightAndStorage {
            self.weight = text.into();
        }
    }

    /// 庫位コードの手入力（撮影後のみ）
    pub fn set_storage_code(&mut self, text: impl Into<String>) {
        if self.step == FlowStep::WeightAndStorage {
            self.storage_code = text.into();
        }
    }

    /// 手入力の確定（Enterキー）
    pub fn submit(&mut self, device: &mut dyn DeviceSimulator) -> FlowProgress {
        if self.step != FlowStep::WeightAndStorage {
            return FlowProgress::Ignored;
        }
        match self.seal(device.now_millis()) {
            Ok(record) => FlowProgress::Sealed(record),
            Err(Error::IncompleteRecord(field)) => FlowProgress::Blocked(field),
            Err(_) => FlowProgress::Ignored,
        }
    }

    fn seal(&self, now: i64) -> Result<InboundRecord> {
        if self.draft.mid.is_empty() {
            return Err(Error::IncompleteRecord("mid"));
        }
        if self.weight.is_empty() {
            return Err(Error::IncompleteRecord("weight"));
        }
        if self.storage_code.is_empty() {
            return Err(Error::IncompleteRecord("storage_code"));
        }
        let photo_url = if self.photo_url.is_empty() {
            PLACEHOLDER_PHOTO.to_string()
        } else {
            self.photo_url.clone()
        };
        Ok(InboundRecord {
            id: now.to_string(),
            mid: self.draft.mid.clone(),
            weight: self.weight.clone(),
            storage_code: self.storage_code.clone(),
            photo_url,
            timestamp: now,
            operator: self.draft.operator.clone(),
        })
    }
}
