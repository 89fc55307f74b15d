//! 运动进程
//!
//! 每只动物一个逻辑进程：执行一步后把自己重新调度到 Δ 之后。

use super::animal::AnimalId;
use super::race_world::RaceWorld;
use crate::sim::{Event, Simulator, World};
use tracing::error;

/// 动物运动进程的一个挂起点
#[derive(Debug)]
pub struct MotionStep {
    pub animal: AnimalId,
}

impl Event for MotionStep {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let Some(w) = world.as_any_mut().downcast_mut::<RaceWorld>() else {
            error!(animal = ?self.animal, "world must be RaceWorld");
            return;
        };
        w.motion_step(self.animal, sim);
    }
}
