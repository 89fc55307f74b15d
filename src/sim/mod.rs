//! 仿真核心模块
//!
//! 此模块包含协作式离散事件仿真的核心组件：仿真时间、事件、世界、调度器、
//! 一次性信号与配置。

// 子模块声明
mod config;
mod event;
mod signal;
mod simulator;
mod time;
mod world;

// 重新导出公共接口
pub use config::{ConfigError, DEFAULT_STEP, DEFAULT_WALK_SPEED, SimConfig};
pub use event::Event;
pub use signal::{SignalId, Signals};
pub use simulator::Simulator;
pub use time::SimTime;
pub use world::World;
