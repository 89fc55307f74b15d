//! 比赛模块
//!
//! 动物运动状态机、历史记录、比赛协调者与运行控制。

mod animal;
mod error;
mod history;
mod motion;
mod profile;
mod race;
mod race_world;
mod session;

pub use animal::{Animal, AnimalId, Phase};
#[cfg(test)]
pub(crate) use animal::Advance;
pub use error::{RaceError, RaceResult};
pub use history::{History, Sample};
pub use motion::MotionStep;
pub use profile::{AnimalProfile, Tactic};
pub use race::{Placing, Race, RaceId, RaceOutcome, RaceSettled};
pub use race_world::RaceWorld;
pub use session::{RaceSim, RunLimit};
