//! 场景描述（JSON）
//!
//! 配置 + 参赛名单 + 可选赛道长度。没有赛道长度时动物自由奔跑，不绑定比赛。

use crate::race::{AnimalId, AnimalProfile, RaceId, RaceResult, RaceSim, Tactic};
use crate::sim::SimConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SimConfig,
    #[serde(default)]
    pub track_length: Option<f64>,
    pub animals: Vec<AnimalProfile>,
}

impl Scenario {
    pub fn from_json_str(raw: &str) -> RaceResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 内置名单：牛（冲刺-步行）、美洲豹与马（冲刺-休息），1000 m
    pub fn builtin() -> Self {
        Self {
            config: SimConfig::default(),
            track_length: Some(1000.0),
            animals: vec![
                AnimalProfile::new("cow", 11.18, 2.0, 200.0, 10.0, Tactic::SprintWalk),
                AnimalProfile::new("jaguar", 33.5, 9.0, 50.0, 5.0, Tactic::SprintRest),
                AnimalProfile::new("horse", 25.0, 5.0, 120.0, 8.0, Tactic::SprintRest),
            ],
        }
    }

    /// 构造仿真：按名单顺序创建动物，有赛道长度时再创建比赛。
    pub fn build(&self) -> RaceResult<(RaceSim, Option<RaceId>)> {
        let mut rs = RaceSim::new(self.config.clone())?;
        let ids = self
            .animals
            .iter()
            .map(|p| rs.spawn_animal(p.clone()))
            .collect::<RaceResult<Vec<AnimalId>>>()?;
        let race = match self.track_length {
            Some(len) => Some(rs.create_race(len, &ids)?),
            None => None,
        };
        Ok((rs, race))
    }
}
