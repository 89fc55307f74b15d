//! 比赛世界实现
//!
//! 持有全部动物、比赛与信号表。动物只修改自身状态；比赛只读取动物状态，
//! 终点转移由世界代为执行。

use super::animal::{Advance, Animal, AnimalId, Phase};
use super::error::{RaceError, RaceResult};
use super::motion::MotionStep;
use super::profile::AnimalProfile;
use super::race::{Race, RaceId, RaceOutcome, RaceSettled};
use crate::sim::{SignalId, Signals, SimConfig, SimTime, Simulator, World};
use std::any::Any;
use std::collections::HashSet;
use tracing::{debug, info, trace, warn};

#[derive(Default)]
pub struct RaceWorld {
    cfg: SimConfig,
    animals: Vec<Animal>,
    races: Vec<Race>,
    signals: Signals,
}

impl World for RaceWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl RaceWorld {
    pub fn new(cfg: SimConfig) -> RaceResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn animal(&self, id: AnimalId) -> Option<&Animal> {
        self.animals.get(id.0)
    }

    pub fn races(&self) -> &[Race] {
        &self.races
    }

    pub fn race(&self, id: RaceId) -> Option<&Race> {
        self.races.get(id.0)
    }

    pub fn signals(&self) -> &Signals {
        &self.signals
    }

    /// 动物终点信号触发的时间
    pub fn finish_time(&self, id: AnimalId) -> Option<SimTime> {
        self.animal(id)
            .and_then(|a| self.signals.fired_at(a.finish_signal()))
    }

    /// 创建动物并立即启动其运动进程（首步在当前时刻执行）。
    #[tracing::instrument(skip(self, profile, sim), fields(name = %profile.name))]
    pub fn spawn_animal(
        &mut self,
        profile: AnimalProfile,
        sim: &mut Simulator,
    ) -> RaceResult<AnimalId> {
        profile.validate()?;
        let id = AnimalId(self.animals.len());
        let finish = self.signals.create();
        self.animals
            .push(Animal::new(id, profile, &self.cfg, finish));
        sim.schedule(sim.now(), MotionStep { animal: id });
        info!(animal_id = id.0, t = sim.now().as_secs_f64(), "🏃 开始冲刺");
        Ok(id)
    }

    /// 创建比赛：绑定参赛者（使其终点检查生效）并启动协调进程。
    ///
    /// 每只动物至多属于一场比赛；校验全部通过后才开始绑定。
    #[tracing::instrument(skip(self, entrants, sim), fields(entrants = entrants.len()))]
    pub fn create_race(
        &mut self,
        length: f64,
        entrants: &[AnimalId],
        sim: &mut Simulator,
    ) -> RaceResult<RaceId> {
        if !length.is_finite() || length <= 0.0 {
            return Err(RaceError::InvalidTrack(length));
        }
        let mut seen = HashSet::new();
        for &id in entrants {
            let animal = self.animal(id).ok_or(RaceError::UnknownAnimal(id))?;
            if animal.race().is_some() || !seen.insert(id) {
                return Err(RaceError::AlreadyEntered {
                    name: animal.name().to_string(),
                });
            }
        }

        let id = RaceId(self.races.len());
        let mut signals: Vec<SignalId> = Vec::with_capacity(entrants.len());
        for &a in entrants {
            let animal = &mut self.animals[a.0];
            animal.bind(id);
            signals.push(animal.finish_signal());
        }
        self.races.push(Race::new(id, length, entrants.to_vec()));
        self.signals.wait_all(&signals, RaceSettled { race: id }, sim);
        info!(race = id.0, length, "比赛已创建，等待全部完赛");
        Ok(id)
    }

    /// 动物所属比赛的赛道长度（只读关系查询）
    fn finish_line(&self, id: AnimalId) -> Option<f64> {
        let race = self.animal(id)?.race()?;
        self.race(race).map(Race::length)
    }

    /// 运动进程的一步；越线时立即执行终点转移，不再挂起。
    pub(crate) fn motion_step(&mut self, id: AnimalId, sim: &mut Simulator) {
        let finish_line = self.finish_line(id);
        let Some(animal) = self.animals.get_mut(id.0) else {
            warn!(animal = ?id, "未知动物，忽略运动步");
            return;
        };
        match animal.advance(&self.cfg, finish_line, sim.now()) {
            Advance::Stepped => sim.schedule_in(self.cfg.step, MotionStep { animal: id }),
            Advance::Crossed => {
                debug!(
                    animal = %animal.name(),
                    distance = animal.distance(),
                    "越过终点"
                );
                self.finish(id, sim);
            }
            Advance::Halted => trace!(animal = ?id, "运动进程已取消"),
        }
    }

    /// 终点转移：取消运动进程并触发终点信号，重复调用无效果。
    fn finish(&mut self, id: AnimalId, sim: &mut Simulator) -> bool {
        let Some(animal) = self.animals.get_mut(id.0) else {
            return false;
        };
        if !animal.stop() {
            return false;
        }
        let signal = animal.finish_signal();
        info!(
            animal = %animal.name(),
            t = sim.now().as_secs_f64(),
            distance = animal.distance(),
            steps = animal.history().len(),
            cycles = animal.cycles(),
            "✅ 到达终点"
        );
        self.signals.set(signal, sim)
    }

    /// 从外部执行终点转移。已结束时返回 `Ok(false)`。
    ///
    /// 终态只能从冲刺或步行进入；已报名的动物还必须已经到达终点线，
    /// 否则比赛会在有参赛者未完赛时结束。
    pub fn stop_animal(&mut self, id: AnimalId, sim: &mut Simulator) -> RaceResult<bool> {
        let animal = self.animal(id).ok_or(RaceError::UnknownAnimal(id))?;
        if animal.is_finished() {
            return Ok(false);
        }
        if animal.phase() == Phase::Resting {
            return Err(RaceError::CannotStop {
                name: animal.name().to_string(),
                reason: "animal is resting".to_string(),
            });
        }
        if let Some(line) = self.finish_line(id) {
            if animal.distance() < line {
                return Err(RaceError::CannotStop {
                    name: animal.name().to_string(),
                    reason: format!("at {} m, short of the {line} m line", animal.distance()),
                });
            }
        }
        Ok(self.finish(id, sim))
    }

    pub(crate) fn settle_race(&mut self, id: RaceId, now: SimTime) {
        let Some(race) = self.races.get_mut(id.0) else {
            warn!(race = ?id, "未知比赛");
            return;
        };
        race.settle(&self.animals, now);
    }

    pub fn all_settled(&self) -> bool {
        self.races.iter().all(Race::is_settled)
    }

    /// 某场比赛的结果状态
    pub fn outcome(&self, id: RaceId) -> RaceOutcome {
        match self.race(id) {
            Some(race) if race.is_settled() => RaceOutcome::Completed,
            Some(race) => RaceOutcome::DidNotComplete {
                unfinished: self.unfinished(race),
            },
            None => RaceOutcome::DidNotComplete {
                unfinished: Vec::new(),
            },
        }
    }

    /// 全部比赛的结果状态
    pub fn overall_outcome(&self) -> RaceOutcome {
        let unfinished: Vec<String> = self
            .races
            .iter()
            .filter(|r| !r.is_settled())
            .flat_map(|r| self.unfinished(r))
            .collect();
        if self.all_settled() {
            RaceOutcome::Completed
        } else {
            RaceOutcome::DidNotComplete { unfinished }
        }
    }

    fn unfinished(&self, race: &Race) -> Vec<String> {
        race.entrants()
            .iter()
            .filter_map(|id| self.animal(*id))
            .filter(|a| !a.is_finished())
            .map(|a| a.name().to_string())
            .collect()
    }
}
