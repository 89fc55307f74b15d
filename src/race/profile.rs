//! 动物静态属性
//!
//! 构造后不可变；非正或非有限的数值在构造时拒绝，避免后续出现 NaN/∞。

use super::error::{RaceError, RaceResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 战术：与冲刺交替的恢复阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tactic {
    /// 冲刺 → 原地休息
    #[default]
    #[serde(alias = "sprint-rest")]
    SprintRest,
    /// 冲刺 → 步行
    #[serde(alias = "sprint-walk")]
    SprintWalk,
}

impl fmt::Display for Tactic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tactic::SprintRest => f.write_str("sprint-rest"),
            Tactic::SprintWalk => f.write_str("sprint-walk"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalProfile {
    pub name: String,
    /// 极速（m/s）
    pub top_speed: f64,
    /// 体力充足时的加速度（m/s²）
    pub base_acceleration: f64,
    /// 体力上限
    pub base_stamina: f64,
    /// 休息时每秒恢复的体力
    pub regen_rate: f64,
    #[serde(default)]
    pub tactic: Tactic,
}

impl AnimalProfile {
    pub fn new(
        name: impl Into<String>,
        top_speed: f64,
        base_acceleration: f64,
        base_stamina: f64,
        regen_rate: f64,
        tactic: Tactic,
    ) -> Self {
        Self {
            name: name.into(),
            top_speed,
            base_acceleration,
            base_stamina,
            regen_rate,
            tactic,
        }
    }

    pub fn validate(&self) -> RaceResult<()> {
        let fields = [
            ("top_speed", self.top_speed),
            ("base_acceleration", self.base_acceleration),
            ("base_stamina", self.base_stamina),
            ("regen_rate", self.regen_rate),
        ];
        for (field, v) in fields {
            if !v.is_finite() || v <= 0.0 {
                return Err(RaceError::InvalidProfile {
                    name: self.name.clone(),
                    reason: format!("{field} must be finite and > 0, got {v}"),
                });
            }
        }
        Ok(())
    }
}
