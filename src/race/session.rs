//! 运行控制
//!
//! 把调度器与比赛世界打包，提供唯一的推进入口：有界时长或运行到比赛结束。

use super::animal::AnimalId;
use super::error::RaceResult;
use super::profile::AnimalProfile;
use super::race::{RaceId, RaceOutcome};
use super::race_world::RaceWorld;
use crate::sim::{SimConfig, SimTime, Simulator};
use tracing::{info, warn};

/// 推进方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLimit {
    /// 从当前时刻起推进给定的仿真时长
    For(SimTime),
    /// 运行到所有比赛结束；配置了时间预算时最多运行预算时长
    UntilSettled,
}

pub struct RaceSim {
    pub sim: Simulator,
    pub world: RaceWorld,
}

impl RaceSim {
    pub fn new(cfg: SimConfig) -> RaceResult<Self> {
        Ok(Self {
            sim: Simulator::default(),
            world: RaceWorld::new(cfg)?,
        })
    }

    pub fn now(&self) -> SimTime {
        self.sim.now()
    }

    pub fn spawn_animal(&mut self, profile: AnimalProfile) -> RaceResult<AnimalId> {
        self.world.spawn_animal(profile, &mut self.sim)
    }

    pub fn create_race(&mut self, length: f64, entrants: &[AnimalId]) -> RaceResult<RaceId> {
        self.world.create_race(length, entrants, &mut self.sim)
    }

    /// 外部终点转移，规则见 [`RaceWorld::stop_animal`]。
    pub fn stop_animal(&mut self, id: AnimalId) -> RaceResult<bool> {
        self.world.stop_animal(id, &mut self.sim)
    }

    /// 推进仿真。未完成的比赛以 [`RaceOutcome::DidNotComplete`] 返回，不是错误。
    ///
    /// `UntilSettled` 只等待比赛结束；没有绑定比赛的动物会一直循环，因此不等它们。
    pub fn run(&mut self, limit: RunLimit) -> RaceOutcome {
        let start = self.sim.now();
        match limit {
            RunLimit::For(d) => self.sim.run_until(start.after(d), &mut self.world),
            RunLimit::UntilSettled => {
                let deadline = self.world.config().time_budget().map(|b| start.after(b));
                while !self.world.all_settled() {
                    match (self.sim.next_at(), deadline) {
                        (None, _) => break,
                        (Some(at), Some(d)) if at > d => {
                            self.sim.advance_to(d);
                            break;
                        }
                        _ => {
                            self.sim.run_one(&mut self.world);
                        }
                    }
                }
            }
        }

        let outcome = self.world.overall_outcome();
        match &outcome {
            RaceOutcome::Completed => info!(
                t = self.sim.now().as_secs_f64(),
                events = self.sim.executed(),
                "全部比赛已结束"
            ),
            RaceOutcome::DidNotComplete { unfinished } => warn!(
                t = self.sim.now().as_secs_f64(),
                ?unfinished,
                "比赛未完成"
            ),
        }
        outcome
    }
}
