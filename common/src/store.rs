//! 入庫レコードのインメモリストア
//!
//! 新しいレコードを先頭に追加する。削除はなく、IDによる置き換えのみ。

use crate::error::{Error, Result};
use crate::types::InboundRecord;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<InboundRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 先頭に追加（最新が index 0）
    pub fn prepend(&mut self, record: InboundRecord) {
        tracing::info!(id = %record.id, mid = %record.mid, "入庫レコード追加");
        self.records.insert(0, record);
    }

    /// 同じIDのレコードを丸ごと置き換える。位置と件数は変わらない
    pub fn replace(&mut self, updated: InboundRecord) -> Result<()> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == updated.id)
            .ok_or_else(|| Error::RecordNotFound(updated.id.clone()))?;
        tracing::info!(id = %updated.id, "入庫レコード更新");
        *slot = updated;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&InboundRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// 最新順
    pub fn records(&self) -> &[InboundRecord] {
        &self.records
    }

    /// 検索クエリで絞り込み（順序はストア順のまま）
    pub fn filter<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a InboundRecord> + 'a {
        let query = query.to_string();
        self.records.iter().filter(move |r| r.matches_query(&query))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, mid: &str, code: &str) -> InboundRecord {
        InboundRecord {
            id: id.to_string(),
            mid: mid.to_string(),
            weight: "100".to_string(),
            storage_code: code.to_string(),
            photo_url: "p".to_string(),
            timestamp: 0,
            operator: "op".to_string(),
        }
    }

    #[test]
    fn test_prepend_newest_first() {
        let mut store = RecordStore::new();
        store.prepend(record("1", "500983514986", "ZK-aaaaaaaa"));
        store.prepend(record("2", "500983514987", "YG-bbbbbbbb"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].id, "2");
        assert_eq!(store.records()[1].id, "1");
    }

    #[test]
    fn test_replace_only_matching() {
        let mut store = RecordStore::new();
        store.prepend(record("1", "500983514986", "ZK-aaaaaaaa"));
        store.prepend(record("2", "500983514987", "YG-bbbbbbbb"));
        store.prepend(record("3", "500983514988", "ZK-cccccccc"));

        let mut edited = store.get("2").cloned().unwrap();
        edited.weight = "999".to_string();
        edited.storage_code = "free text".to_string();
        store.replace(edited).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.records()[1].weight, "999");
        assert_eq!(store.records()[1].storage_code, "free text");
        assert_eq!(store.records()[0], record("3", "500983514988", "ZK-cccccccc"));
        assert_eq!(store.records()[2], record("1", "500983514986", "ZK-aaaaaaaa"));
    }

    #[test]
    fn test_replace_missing_id() {
        let mut store = RecordStore::new();
        store.prepend(record("1", "500983514986", "ZK-aaaaaaaa"));

        let err = store.replace(record("9", "x", "y")).unwrap_err();
        assert!(matches!(err, Error::RecordNotFound(ref id) if id == "9"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].mid, "500983514986");
    }

    #[test]
    fn test_filter_keeps_order() {
        let mut store = RecordStore::new();
        store.prepend(record("1", "500983514986", "ZK-aaaaaaaa"));
        store.prepend(record("2", "500983514987", "YG-bbbbbbbb"));
        store.prepend(record("3", "500983514988", "ZK-cccccccc"));

        let ids: Vec<&str> = store.filter("zk").map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);

        let all: Vec<&str> = store.filter("").map(|r| r.id.as_str()).collect();
        assert_eq!(all, vec!["3", "2", "1"]);

        assert_eq!(store.filter("4987").count(), 1);
        assert_eq!(store.filter("nothing").count(), 0);
    }

    #[test]
    fn test_filter_outlives_query() {
        let mut store = RecordStore::new();
        store.prepend(record("1", "500983514986", "ZK-aaaaaaaa"));
        store.prepend(record("2", "500983514987", "YG-bbbbbbbb"));

        let hits: Vec<&InboundRecord> = {
            let query = String::from("yg");
            store.filter(&query).collect()
        };
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }
}
