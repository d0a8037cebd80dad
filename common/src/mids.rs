//! MID照合テーブル
//!
//! スキャンまたは手入力されたMIDを許可リストと照合する。
//! 実機では受注システムへの問い合わせに相当する。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 組み込みの許可MID（12桁）
pub const BUILTIN_MIDS: &[&str] = &[
    "500983514986",
    "500983514987",
    "500983514988",
    "500983514989",
    "500983514990",
];

/// MIDの桁数
pub const MID_LENGTH: usize = 12;

/// 許可MIDの一覧
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidTable {
    mids: Vec<String>,
}

impl Default for MidTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MidTable {
    /// 組み込みリスト
    pub fn builtin() -> Self {
        Self {
            mids: BUILTIN_MIDS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// 設定ファイル等から与えられたリスト。空なら組み込みリストを使う
    pub fn from_list<I, S>(mids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mids: Vec<String> = mids
            .into_iter()
            .map(Into::into)
            .filter(|m: &String| !m.trim().is_empty())
            .collect();
        if mids.is_empty() {
            Self::builtin()
        } else {
            Self { mids }
        }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.mids.iter().any(|m| m == candidate)
    }

    /// 照合。不一致なら `Error::UnknownMid`
    pub fn check(&self, candidate: &str) -> Result<()> {
        if self.contains(candidate) {
            Ok(())
        } else {
            Err(Error::UnknownMid(candidate.to_string()))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.mids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.mids.get(index).map(String::as_str)
    }
}
