use crate::session::WheelState;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WheelError {
    #[error("Wheel must have at least one segment")]
    InvalidSegmentCount,

    #[error("Winner index {index} out of range for {total} segments")]
    WinnerIndexOutOfRange { index: usize, total: usize },

    #[error("Cannot {action} while wheel is {from}")]
    InvalidTransition {
        from: WheelState,
        action: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WheelError>;
