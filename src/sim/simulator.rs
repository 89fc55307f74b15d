//! 仿真器
//!
//! 单线程协作式调度器：维护单调递增的仿真时间与待执行事件队列。
//! 同一时刻的事件按调度（登记）顺序执行。

use super::event::Event;
use super::time::SimTime;
use super::world::World;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

/// 队列中的一项：执行时间、序列号与事件对象。
struct Pending {
    at: SimTime,
    seq: u64,
    event: Box<dyn Event>,
}

impl Pending {
    // BinaryHeap 是 max-heap，取反后最早时间、最小序列号先出队。
    fn key(&self) -> Reverse<(SimTime, u64)> {
        Reverse((self.at, self.seq))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl Eq for Pending {}

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    executed: u64,
    q: BinaryHeap<Pending>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 已执行的事件总数
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// 队列中尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 所有逻辑进程均已静止（队列为空）
    pub fn is_idle(&self) -> bool {
        self.q.is_empty()
    }

    /// 调度事件在指定时间执行（早于当前时间的请求按当前时间处理）
    #[tracing::instrument(level = "trace", skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = ?at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        self.schedule_boxed(at, Box::new(ev));
    }

    /// 调度已装箱的事件（供信号表唤醒等待者）
    pub(crate) fn schedule_boxed(&mut self, at: SimTime, event: Box<dyn Event>) {
        let at = at.max(self.now);
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(Pending {
            at,
            seq,
            event,
        });
        trace!(now = ?self.now, seq, queue_size = self.q.len(), "事件已加入队列");
    }

    /// 在当前时间之后 `delay` 执行
    pub fn schedule_in<E: Event>(&mut self, delay: SimTime, ev: E) {
        self.schedule(self.now.after(delay), ev);
    }

    /// 下一个待执行事件的时间
    pub fn next_at(&self) -> Option<SimTime> {
        self.q.peek().map(|top| top.at)
    }

    /// 执行队首的一个事件；队列为空时返回 `false`。
    pub fn run_one(&mut self, world: &mut dyn World) -> bool {
        match self.q.pop() {
            Some(item) => {
                self.step(item, world);
                true
            }
            None => false,
        }
    }

    /// 把当前时间推进到 `t`（不早于当前时间，不越过队首事件）。
    pub fn advance_to(&mut self, t: SimTime) {
        let t = self.next_at().map_or(t, |at| t.min(at));
        self.now = self.now.max(t);
    }

    fn step(&mut self, item: Pending, world: &mut dyn World) {
        self.now = item.at;
        self.executed = self.executed.wrapping_add(1);
        item.event.execute(self, world);
        world.on_tick(self);
    }

    /// 运行直到事件队列为空或到达 `until`；返回后当前时间不小于 `until`。
    #[tracing::instrument(skip(self, world))]
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        debug!(now = ?self.now, queue_size = self.q.len(), "开始有界运行");
        while self.q.peek().is_some_and(|top| top.at <= until) {
            let Some(item) = self.q.pop() else { break };
            self.step(item, world);
        }
        self.now = self.now.max(until);
        debug!(now = ?self.now, remaining = self.q.len(), "有界运行结束");
    }

    /// 运行所有事件直到队列为空（所有进程自然静止）。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) {
        info!(now = ?self.now, queue_size = self.q.len(), "▶️  开始运行仿真");
        let start = self.executed;
        while let Some(item) = self.q.pop() {
            self.step(item, world);
        }
        info!(
            total_events = self.executed - start,
            final_time = ?self.now,
            "✅ 仿真完成"
        );
    }
}
