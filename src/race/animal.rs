//! 动物运动状态机
//!
//! 每只动物按战术在冲刺与恢复阶段之间循环。每个阶段是一个纯步进函数
//! `(状态, Δ) → 状态'` 加一个阶段结束谓词；驱动由 [`MotionStep`] 事件完成，
//! 阶段切换不消耗仿真时间。
//!
//! [`MotionStep`]: super::motion::MotionStep

use super::history::{History, Sample};
use super::profile::{AnimalProfile, Tactic};
use super::race::RaceId;
use crate::sim::{SignalId, SimConfig, SimTime};
use tracing::{debug, info};

/// 体力比例高于该值时全力加速
const FATIGUE_THRESHOLD: f64 = 0.3;
/// 以极速奔跑时每秒消耗的体力
const SPRINT_BURN_RATE: f64 = 10.0;

/// 动物标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimalId(pub usize);

/// 运动状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Sprinting,
    Resting,
    Walking,
    /// 终态，只能从冲刺或步行进入
    Finished,
}

/// 一次驱动的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Advance {
    /// 走完一步，应在 Δ 后继续
    Stepped,
    /// 本步越过终点，应立即结束且不再挂起
    Crossed,
    /// 已结束或已取消，什么也没做
    Halted,
}

#[derive(Debug)]
pub struct Animal {
    id: AnimalId,
    profile: AnimalProfile,
    phase: Phase,
    distance: f64,
    speed: f64,
    acceleration: f64,
    stamina: f64,
    cycles: u32,
    history: History,
    finish: SignalId,
    race: Option<RaceId>,
    /// 协作式取消标记，仅在挂起点之后检查
    cancelled: bool,
}

impl Animal {
    /// 调用方负责事先校验 `profile` 与 `cfg`。
    pub(crate) fn new(
        id: AnimalId,
        profile: AnimalProfile,
        cfg: &SimConfig,
        finish: SignalId,
    ) -> Self {
        let speed = cfg.initial_speed.min(profile.top_speed);
        Self {
            id,
            phase: Phase::Sprinting,
            distance: cfg.initial_distance,
            speed,
            acceleration: profile.base_acceleration,
            stamina: profile.base_stamina,
            cycles: 0,
            history: History::default(),
            finish,
            race: None,
            cancelled: false,
            profile,
        }
    }

    pub fn id(&self) -> AnimalId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn profile(&self) -> &AnimalProfile {
        &self.profile
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    pub fn stamina(&self) -> f64 {
        self.stamina
    }

    /// 完成的冲刺阶段数（体力耗尽而结束的冲刺）
    ///
    /// 冲刺结束的那一刻计数，不等恢复阶段走完；步行中越线的动物
    /// 也计入刚结束的那次冲刺。第一次冲刺内越线则为 0。
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn finish_signal(&self) -> SignalId {
        self.finish
    }

    pub fn race(&self) -> Option<RaceId> {
        self.race
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub(crate) fn bind(&mut self, race: RaceId) {
        self.race = Some(race);
    }

    /// 结束转移：取消运动进程并进入终态。已结束时返回 `false`。
    pub(crate) fn stop(&mut self) -> bool {
        if self.phase == Phase::Finished {
            return false;
        }
        self.cancelled = true;
        self.phase = Phase::Finished;
        true
    }

    fn sample(&self) -> Sample {
        Sample {
            distance: self.distance,
            speed: self.speed,
            acceleration: self.acceleration,
            stamina: self.stamina,
        }
    }

    fn phase_done(&self, cfg: &SimConfig) -> bool {
        let base = self.profile.base_stamina;
        match self.phase {
            Phase::Sprinting => self.stamina <= 0.0,
            Phase::Resting => self.stamina >= base * cfg.rest_recovery,
            Phase::Walking => self.stamina >= base * cfg.walk_recovery,
            Phase::Finished => false,
        }
    }

    fn enter(&mut self, phase: Phase, cfg: &SimConfig, now: SimTime) {
        self.phase = phase;
        match phase {
            Phase::Sprinting => {
                info!(animal = %self.profile.name, t = now.as_secs_f64(), "🏃 开始冲刺");
            }
            Phase::Resting => {
                self.speed = 0.0;
                self.acceleration = 0.0;
                info!(animal = %self.profile.name, t = now.as_secs_f64(), "💤 开始休息");
            }
            Phase::Walking => {
                self.speed = cfg.walk_speed.min(self.profile.top_speed);
                self.acceleration = 0.0;
                info!(animal = %self.profile.name, t = now.as_secs_f64(), "🚶 开始步行");
            }
            Phase::Finished => {}
        }
    }

    /// 进入循环中的下一阶段
    fn next_phase(&mut self, cfg: &SimConfig, now: SimTime) {
        let next = match (self.phase, self.profile.tactic) {
            (Phase::Sprinting, Tactic::SprintRest) => Phase::Resting,
            (Phase::Sprinting, Tactic::SprintWalk) => Phase::Walking,
            (Phase::Resting | Phase::Walking, _) => Phase::Sprinting,
            (Phase::Finished, _) => return,
        };
        if self.phase == Phase::Sprinting {
            self.cycles += 1;
            debug!(animal = %self.profile.name, cycles = self.cycles, "冲刺阶段完成");
        }
        self.enter(next, cfg, now);
    }

    fn sprint_step(&mut self, dt: f64) {
        let p = &self.profile;
        let speed_ratio = self.speed / p.top_speed;
        self.stamina -= SPRINT_BURN_RATE * speed_ratio * dt;

        let stamina_ratio = self.stamina / p.base_stamina;
        self.acceleration = if stamina_ratio > FATIGUE_THRESHOLD {
            p.base_acceleration
        } else {
            -(1.0 - stamina_ratio)
        };
        self.speed += self.acceleration * dt;

        if self.speed >= p.top_speed {
            self.acceleration = 0.0;
        }
        self.speed = self.speed.clamp(0.0, p.top_speed);
        self.stamina = self.stamina.clamp(0.0, p.base_stamina);
        self.distance += self.speed * dt;
    }

    fn rest_step(&mut self, dt: f64) {
        self.stamina = (self.stamina + self.profile.regen_rate * dt).min(self.profile.base_stamina);
    }

    fn walk_step(&mut self, dt: f64) {
        let regen = self.profile.regen_rate / 2.0;
        self.stamina = (self.stamina + regen * dt).min(self.profile.base_stamina);
        self.distance += self.speed * dt;
    }

    /// 推进一步：先完成零时长的阶段切换，再执行当前阶段的一步并记录采样。
    ///
    /// 只有冲刺与步行会检查终点；休息时距离不变，不会在休息中到达终点。
    pub(crate) fn advance(
        &mut self,
        cfg: &SimConfig,
        finish_line: Option<f64>,
        now: SimTime,
    ) -> Advance {
        if self.cancelled || self.phase == Phase::Finished {
            return Advance::Halted;
        }
        // 冲刺结束要求体力为 0，恢复结束要求体力 > 0，最多切换两次。
        while self.phase_done(cfg) {
            self.next_phase(cfg, now);
        }

        let dt = cfg.dt();
        match self.phase {
            Phase::Sprinting => self.sprint_step(dt),
            Phase::Resting => self.rest_step(dt),
            Phase::Walking => self.walk_step(dt),
            Phase::Finished => return Advance::Halted,
        }
        self.history.record(self.sample());

        let can_cross = matches!(self.phase, Phase::Sprinting | Phase::Walking);
        match finish_line {
            Some(line) if can_cross && self.distance >= line => Advance::Crossed,
            _ => Advance::Stepped,
        }
    }
}
