//! 错误类型
//!
//! 构造期的校验错误立即失败；比赛未完成属于场景结果，只在调用方显式要求时
//! 才转换成错误。

use super::animal::AnimalId;
use crate::sim::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RaceError {
    #[error("invalid profile for {name}: {reason}")]
    InvalidProfile { name: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid track length {0}: must be finite and > 0")]
    InvalidTrack(f64),

    #[error("animal {0:?} not found")]
    UnknownAnimal(AnimalId),

    #[error("cannot stop {name}: {reason}")]
    CannotStop { name: String, reason: String },

    #[error("{name} is already entered in a race")]
    AlreadyEntered { name: String },

    #[error("race did not complete, still running: {}", unfinished.join(", "))]
    RaceDidNotComplete { unfinished: Vec<String> },

    #[error("scenario parse error: {0}")]
    Scenario(#[from] serde_json::Error),
}

pub type RaceResult<T> = Result<T, RaceError>;
