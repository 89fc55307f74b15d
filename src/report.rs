//! 结果汇总
//!
//! 供打印与绘图使用：只读取核心暴露的历史与属性，在这里计算周期数、
//! 最终距离、平均速度等，不由核心预先计算。

use crate::race::{Animal, AnimalId, Placing, RaceId, RaceOutcome, RaceSim, Tactic};
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 时间轴单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    fn seconds_per_unit(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3600.0,
        }
    }
}

/// 为长度为 `len` 的历史序列生成时间轴（第 i 个采样对应 i·Δ）。
pub fn time_axis(len: usize, step: SimTime, unit: TimeUnit) -> Vec<f64> {
    let dt = step.as_secs_f64() / unit.seconds_per_unit();
    (0..len).map(|i| i as f64 * dt).collect()
}

/// 序列均值；空序列为 0
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// 单只动物的汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalSummary {
    pub name: String,
    pub tactic: Tactic,
    pub top_speed: f64,
    pub base_acceleration: f64,
    pub base_stamina: f64,
    pub regen_rate: f64,
    pub cycles: u32,
    pub steps: usize,
    pub final_distance: f64,
    pub average_speed: f64,
    /// 到达终点的仿真时间（秒）
    pub finished_at_s: Option<f64>,
}

impl AnimalSummary {
    pub fn from_animal(animal: &Animal, finished_at: Option<SimTime>) -> Self {
        let p = animal.profile();
        let h = animal.history();
        Self {
            name: p.name.clone(),
            tactic: p.tactic,
            top_speed: p.top_speed,
            base_acceleration: p.base_acceleration,
            base_stamina: p.base_stamina,
            regen_rate: p.regen_rate,
            cycles: animal.cycles(),
            steps: h.len(),
            final_distance: h.distance().last().copied().unwrap_or(animal.distance()),
            average_speed: mean(h.speed()),
            finished_at_s: finished_at.map(SimTime::as_secs_f64),
        }
    }
}

/// 一次运行的报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub elapsed_s: f64,
    pub completed: bool,
    pub unfinished: Vec<String>,
    pub track_length: Option<f64>,
    pub results: Vec<Placing>,
    pub animals: Vec<AnimalSummary>,
}

impl RunReport {
    pub fn collect(rs: &RaceSim, race: Option<RaceId>, outcome: &RaceOutcome) -> Self {
        let world = &rs.world;
        let race = race.and_then(|id| world.race(id));
        let animals = world
            .animals()
            .iter()
            .map(|a| AnimalSummary::from_animal(a, world.finish_time(a.id())))
            .collect();
        let unfinished = match outcome {
            RaceOutcome::Completed => Vec::new(),
            RaceOutcome::DidNotComplete { unfinished } => unfinished.clone(),
        };
        Self {
            elapsed_s: rs.now().as_secs_f64(),
            completed: outcome.is_completed(),
            unfinished,
            track_length: race.map(|r| r.length()),
            results: race.map(|r| r.results().to_vec()).unwrap_or_default(),
            animals,
        }
    }

    pub fn summary(&self, id: AnimalId) -> Option<&AnimalSummary> {
        self.animals.get(id.0)
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "simulated {:.3} s", self.elapsed_s)?;
        if let Some(len) = self.track_length {
            writeln!(f, "track length: {len} m")?;
        }
        for a in &self.animals {
            writeln!(
                f,
                "{}: top speed: {} m/s, acceleration: {} m/s^2, stamina: {} units, recovery = {} units/s",
                a.name, a.top_speed, a.base_acceleration, a.base_stamina, a.regen_rate
            )?;
            writeln!(
                f,
                "  Results: {} {} cycles, distance: {:.2} m, average speed: {:.2} m/s",
                a.cycles, a.tactic, a.final_distance, a.average_speed
            )?;
        }
        if self.completed {
            for (rank, p) in self.results.iter().enumerate() {
                writeln!(f, "#{} {} ({} steps)", rank + 1, p.name, p.steps)?;
            }
        } else {
            writeln!(
                f,
                "race did not complete, still running: {}",
                self.unfinished.join(", ")
            )?;
        }
        Ok(())
    }
}
