//! 比赛协调者
//!
//! 比赛持有赛道长度与参赛者列表，登记一个等待全部终点信号的汇合；
//! 汇合完成后一次性计算排名。

use super::animal::{Animal, AnimalId};
use super::error::{RaceError, RaceResult};
use super::race_world::RaceWorld;
use crate::sim::{Event, SimTime, Simulator, World};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// 比赛标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RaceId(pub usize);

/// 排名中的一项：名字与参与的步数（完赛用时的代理）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placing {
    pub name: String,
    pub steps: usize,
}

#[derive(Debug)]
pub struct Race {
    id: RaceId,
    length: f64,
    entrants: Vec<AnimalId>,
    results: Vec<Placing>,
    settled_at: Option<SimTime>,
}

impl Race {
    pub(crate) fn new(id: RaceId, length: f64, entrants: Vec<AnimalId>) -> Self {
        Self {
            id,
            length,
            entrants,
            results: Vec::new(),
            settled_at: None,
        }
    }

    pub fn id(&self) -> RaceId {
        self.id
    }

    /// 赛道长度（m）
    pub fn length(&self) -> f64 {
        self.length
    }

    /// 参赛者，按报名顺序
    pub fn entrants(&self) -> &[AnimalId] {
        &self.entrants
    }

    /// 排名；全部完赛之前为空
    pub fn results(&self) -> &[Placing] {
        &self.results
    }

    pub fn is_settled(&self) -> bool {
        self.settled_at.is_some()
    }

    pub fn settled_at(&self) -> Option<SimTime> {
        self.settled_at
    }

    /// 按步数升序排名；`sort_by_key` 是稳定排序，平局保持报名顺序。
    pub(crate) fn settle(&mut self, animals: &[Animal], now: SimTime) {
        if self.is_settled() {
            return;
        }
        let mut results: Vec<Placing> = self
            .entrants
            .iter()
            .filter_map(|id| animals.get(id.0))
            .map(|a| Placing {
                name: a.name().to_string(),
                steps: a.history().len(),
            })
            .collect();
        results.sort_by_key(|p| p.steps);
        self.results = results;
        self.settled_at = Some(now);
        info!(
            race = self.id.0,
            t = now.as_secs_f64(),
            winner = self.results.first().map(|p| p.name.as_str()).unwrap_or("-"),
            "🏁 比赛结束"
        );
    }
}

/// 协调进程的后续：全部终点信号触发后执行。
#[derive(Debug)]
pub struct RaceSettled {
    pub race: RaceId,
}

impl Event for RaceSettled {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let Some(w) = world.as_any_mut().downcast_mut::<RaceWorld>() else {
            error!(race = ?self.race, "world must be RaceWorld");
            return;
        };
        w.settle_race(self.race, sim.now());
    }
}

/// 一次运行后的结果状态；未完成不是错误，而是场景的性质。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceOutcome {
    Completed,
    DidNotComplete { unfinished: Vec<String> },
}

impl RaceOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RaceOutcome::Completed)
    }

    /// 需要 `?` 传播时使用
    pub fn ensure_completed(self) -> RaceResult<()> {
        match self {
            RaceOutcome::Completed => Ok(()),
            RaceOutcome::DidNotComplete { unfinished } => {
                Err(RaceError::RaceDidNotComplete { unfinished })
            }
        }
    }
}
