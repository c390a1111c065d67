//! Domain error types.

/// Top-level error type for sigtrader.
#[derive(Debug, thiserror::Error)]
pub enum SigtraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown strategy type: {0}")]
    UnknownStrategy(String),

    #[error("invalid parameter {param} for strategy {strategy}: {reason}")]
    InvalidParameter {
        strategy: String,
        param: String,
        reason: String,
    },

    #[error("data contract violation: {reason}")]
    DataContract { reason: String },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SigtraderError {
    pub(crate) fn invalid_parameter(strategy: &str, param: &str, reason: impl Into<String>) -> Self {
        SigtraderError::InvalidParameter {
            strategy: strategy.to_string(),
            param: param.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn data_contract(reason: impl Into<String>) -> Self {
        SigtraderError::DataContract {
            reason: reason.into(),
        }
    }
}

impl From<&SigtraderError> for std::process::ExitCode {
    fn from(err: &SigtraderError) -> Self {
        let code: u8 = match err {
            SigtraderError::Io(_) | SigtraderError::Json(_) => 1,
            SigtraderError::ConfigParse { .. }
            | SigtraderError::ConfigMissing { .. }
            | SigtraderError::ConfigInvalid { .. } => 2,
            SigtraderError::DataSource { .. } => 3,
            SigtraderError::UnknownStrategy(_) | SigtraderError::InvalidParameter { .. } => 4,
            SigtraderError::DataContract { .. } | SigtraderError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
