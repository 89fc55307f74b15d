//! 仿真配置
//!
//! 显式传入构造函数的配置，取代全局可变的类级常量。

use super::time::SimTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 默认步长：1 ms
pub const DEFAULT_STEP: SimTime = SimTime(1_000_000);
/// 默认步行速度（m/s）
pub const DEFAULT_WALK_SPEED: f64 = 1.5;

/// 配置校验错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("step must be positive")]
    ZeroStep,

    #[error("{field} must be finite and >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be in (0, 1], got {value}")]
    RecoveryOutOfRange { field: &'static str, value: f64 },

    #[error("time_budget_s must be finite and >= 0, got {0}")]
    InvalidBudget(f64),
}

/// 仿真配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// 固定积分步长 Δ
    pub step: SimTime,
    /// 起跑时的距离（m），用于行进间起跑
    pub initial_distance: f64,
    /// 起跑时的速度（m/s），超过极速时按极速处理
    pub initial_speed: f64,
    /// 步行阶段的恒定速度（m/s）
    pub walk_speed: f64,
    /// 休息阶段结束时的体力比例（0, 1]
    pub rest_recovery: f64,
    /// 步行阶段结束时的体力比例（0, 1]
    pub walk_recovery: f64,
    /// 运行到结束时的总时间预算（秒），`None` 表示不设上限
    pub time_budget_s: Option<f64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            initial_distance: 0.0,
            initial_speed: 0.0,
            walk_speed: DEFAULT_WALK_SPEED,
            rest_recovery: 1.0,
            walk_recovery: 1.0,
            time_budget_s: None,
        }
    }
}

impl SimConfig {
    /// 步长（秒）
    pub fn dt(&self) -> f64 {
        self.step.as_secs_f64()
    }

    pub fn time_budget(&self) -> Option<SimTime> {
        self.time_budget_s.map(SimTime::from_secs_f64)
    }

    /// 检查配置；返回第一个不合法字段的描述。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step == SimTime::ZERO {
            return Err(ConfigError::ZeroStep);
        }
        let non_negative = [
            ("initial_distance", self.initial_distance),
            ("initial_speed", self.initial_speed),
            ("walk_speed", self.walk_speed),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        for (field, value) in [
            ("rest_recovery", self.rest_recovery),
            ("walk_recovery", self.walk_recovery),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::RecoveryOutOfRange { field, value });
            }
        }
        if let Some(b) = self.time_budget_s {
            if !(b.is_finite() && b >= 0.0) {
                return Err(ConfigError::InvalidBudget(b));
            }
        }
        Ok(())
    }
}
