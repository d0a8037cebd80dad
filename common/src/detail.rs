//! 詳細・編集画面
//!
//! 重量と庫位コードのみ変更可能。保存時の再検証はしない。

use crate::storage_code;
use crate::types::InboundRecord;
use chrono::{Local, TimeZone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEdit {
    original: InboundRecord,
    pub weight: String,
    pub storage_code: String,
}

impl DetailEdit {
    pub fn open(record: InboundRecord) -> Self {
        Self {
            weight: record.weight.clone(),
            storage_code: record.storage_code.clone(),
            original: record,
        }
    }

    pub fn original(&self) -> &InboundRecord {
        &self.original
    }

    pub fn is_modified(&self) -> bool {
        self.weight != self.original.weight || self.storage_code != self.original.storage_code
    }

    /// 庫位コードが形式どおりに見えるか（表示のみ）
    pub fn storage_code_looks_valid(&self) -> bool {
        storage_code::is_well_formed(&self.storage_code)
    }

    /// 編集内容を反映したレコード（ストアの置き換え用）
    pub fn save(&self) -> InboundRecord {
        InboundRecord {
            weight: self.weight.clone(),
            storage_code: self.storage_code.clone(),
            ..self.original.clone()
        }
    }

    pub fn created_at(&self) -> String {
        format_timestamp(self.original.timestamp)
    }
}

/// epoch ms をローカル日時文字列に
pub fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y/%m/%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InboundRecord {
        InboundRecord {
            id: "1700000123456".to_string(),
            mid: "500983514986".to_string(),
            weight: "450".to_string(),
            storage_code: "ZK-ab3dfg7h".to_string(),
            photo_url: "file://a.jpg".to_string(),
            timestamp: 1_700_000_123_456,
            operator: "A1024".to_string(),
        }
    }

    #[test]
    fn test_save_overwrites_only_editable_fields() {
        let mut edit = DetailEdit::open(sample());
        assert!(!edit.is_modified());

        edit.weight = "500".to_string();
        edit.storage_code = "not a code".to_string();
        assert!(edit.is_modified());
        assert!(!edit.storage_code_looks_valid());

        let saved = edit.save();
        assert_eq!(saved.weight, "500");
        assert_eq!(saved.storage_code, "not a code");
        assert_eq!(saved.id, "1700000123456");
        assert_eq!(saved.mid, "500983514986");
        assert_eq!(saved.operator, "A1024");
        assert_eq!(saved.photo_url, "file://a.jpg");
        assert_eq!(saved.timestamp, 1_700_000_123_456);
    }

    #[test]
    fn test_storage_code_hint() {
        let edit = DetailEdit::open(sample());
        assert!(edit.storage_code_looks_valid());
    }

    #[test]
    fn test_format_timestamp_shape() {
        let text = format_timestamp(1_700_000_123_456);
        assert_eq!(text.len(), "2023/11/14 22:15:23".len());
        assert!(text.starts_with("2023/11/1"));
    }
}
