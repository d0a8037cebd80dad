use thiserror::Error;

#[derive(Error, Debug)]
pub enum InboundError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] pda_inbound_common::Error),
}

impl From<dialoguer::Error> for InboundError {
    fn from(err: dialoguer::Error) -> Self {
        InboundError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InboundError>;
