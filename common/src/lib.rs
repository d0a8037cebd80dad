//! PDA Inbound Common Library
//!
//! 端末UI（デスクトップ）とコンソールで共有される状態機械と型

pub mod types;
pub mod error;
pub mod mids;
pub mod storage_code;
pub mod simulator;
pub mod store;
pub mod notice;
pub mod login;
pub mod dashboard;
pub mod flow;
pub mod detail;
pub mod session;

pub use types::{InboundRecord, RecordDraft, PLACEHOLDER_PHOTO};
pub use error::{Error, Result};
pub use mids::MidTable;
pub use simulator::{DeviceSimulator, RandomDevice, ScriptedDevice};
pub use store::RecordStore;
pub use notice::{Notice, NoticeKind};
pub use dashboard::{DashboardState, HistoryEntry, ScanOutcome};
pub use flow::{CaptureFlow, FlowProgress, FlowStep};
pub use detail::{format_timestamp, DetailEdit};
pub use session::{Event, Screen, ScreenKind, Session, SessionConfig};
