//! 一次性信号与全体汇合（all-of）
//!
//! 信号初始为未触发，至多触发一次；之后永远保持触发状态。等待者是事件：
//! 信号触发时按登记顺序在当前时刻被调度。汇合等待在所有成员信号都触发后
//! 才调度其后续事件，而不是第一个成员触发时。

use super::event::Event;
use super::simulator::Simulator;
use super::time::SimTime;
use tracing::{debug, trace};

/// 信号标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalId(pub usize);

/// 汇合标识符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct JoinId(usize);

enum Waiter {
    Event(Box<dyn Event>),
    Join(JoinId),
}

#[derive(Default)]
struct SignalSlot {
    fired_at: Option<SimTime>,
    waiters: Vec<Waiter>,
}

struct JoinSlot {
    remaining: usize,
    then: Option<Box<dyn Event>>,
}

/// 信号表：由 World 持有。
#[derive(Default)]
pub struct Signals {
    slots: Vec<SignalSlot>,
    joins: Vec<JoinSlot>,
}

impl Signals {
    /// 新建一个未触发的信号
    pub fn create(&mut self) -> SignalId {
        let id = SignalId(self.slots.len());
        self.slots.push(SignalSlot::default());
        id
    }

    pub fn is_set(&self, id: SignalId) -> bool {
        self.fired_at(id).is_some()
    }

    /// 信号触发时的仿真时间
    pub fn fired_at(&self, id: SignalId) -> Option<SimTime> {
        self.slots.get(id.0).and_then(|s| s.fired_at)
    }

    /// 触发信号并唤醒全部等待者。已触发（或不存在）时返回 `false` 且不做任何事。
    pub fn set(&mut self, id: SignalId, sim: &mut Simulator) -> bool {
        let Some(slot) = self.slots.get_mut(id.0) else {
            return false;
        };
        if slot.fired_at.is_some() {
            trace!(signal = id.0, "信号已触发，忽略");
            return false;
        }
        slot.fired_at = Some(sim.now());
        let waiters = std::mem::take(&mut slot.waiters);
        debug!(signal = id.0, waiters = waiters.len(), now = ?sim.now(), "信号触发");
        for w in waiters {
            match w {
                Waiter::Event(ev) => sim.schedule_boxed(sim.now(), ev),
                Waiter::Join(j) => self.arrive(j, sim),
            }
        }
        true
    }

    /// 等待单个信号；已触发则立即在当前时刻调度。
    pub fn wait<E: Event>(&mut self, id: SignalId, ev: E, sim: &mut Simulator) {
        match self.slots.get_mut(id.0) {
            Some(slot) if slot.fired_at.is_none() => slot.waiters.push(Waiter::Event(Box::new(ev))),
            _ => sim.schedule(sim.now(), ev),
        }
    }

    /// 等待全部信号触发后调度 `ev`。空集合与全部已触发时立即调度。
    pub fn wait_all<E: Event>(&mut self, ids: &[SignalId], ev: E, sim: &mut Simulator) {
        let join = JoinId(self.joins.len());
        let mut remaining = 0;
        for id in ids {
            match self.slots.get_mut(id.0) {
                Some(slot) if slot.fired_at.is_none() => {
                    slot.waiters.push(Waiter::Join(join));
                    remaining += 1;
                }
                _ => {}
            }
        }
        debug!(members = ids.len(), remaining, "登记汇合等待");
        if remaining == 0 {
            sim.schedule(sim.now(), ev);
            self.joins.push(JoinSlot {
                remaining,
                then: None,
            });
        } else {
            self.joins.push(JoinSlot {
                remaining,
                then: Some(Box::new(ev)),
            });
        }
    }

    fn arrive(&mut self, join: JoinId, sim: &mut Simulator) {
        let Some(slot) = self.joins.get_mut(join.0) else {
            return;
        };
        slot.remaining = slot.remaining.saturating_sub(1);
        trace!(join = join.0, remaining = slot.remaining, "汇合成员到达");
        if slot.remaining > 0 {
            return;
        }
        if let Some(then) = slot.then.take() {
            debug!(join = join.0, "汇合完成");
            sim.schedule_boxed(sim.now(), then);
        }
    }
}
