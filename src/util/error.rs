use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// 合法手に含まれない操作
    IllegalAction { seat: usize, message: String },
    /// 役なしの和了宣言
    NoYaku,
    /// 現在のフェーズでは実行できない操作
    InvalidPhase { message: String },
    /// 外部から受け取った状態の不整合 (牌の保存則違反など)
    InvalidSnapshot { message: String },
    /// 牌文字列のパースエラー
    InvalidTile(String),
    /// Actorの指定などの設定エラー
    InvalidConfig(String),
    /// シリアライズ/デシリアライズの失敗
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IllegalAction { seat, message } => {
                write!(f, "illegal action by seat {}: {}", seat, message)
            }
            Error::NoYaku => write!(f, "winning hand has no yaku"),
            Error::InvalidPhase { message } => write!(f, "invalid phase: {}", message),
            Error::InvalidSnapshot { message } => write!(f, "invalid snapshot: {}", message),
            Error::InvalidTile(s) => write!(f, "invalid tile symbol: '{}'", s),
            Error::InvalidConfig(s) => write!(f, "invalid config: {}", s),
            Error::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

pub type Res<T = ()> = Result<T, Error>;

impl Error {
    pub fn illegal(seat: usize, message: impl Into<String>) -> Self {
        Error::IllegalAction {
            seat,
            message: message.into(),
        }
    }

    pub fn snapshot(message: impl Into<String>) -> Self {
        Error::InvalidSnapshot {
            message: message.into(),
        }
    }
}
