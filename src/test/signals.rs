use crate::sim::{Event, SignalId, Signals, SimTime, Simulator, World};
use std::any::Any;

/// 持有信号表的世界，事件把自己的名字记到 `log`
#[derive(Default)]
struct SignalWorld {
    signals: Signals,
    log: Vec<(u64, &'static str)>,
}

impl World for SignalWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct Note(&'static str);

impl Event for Note {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = world
            .as_any_mut()
            .downcast_mut::<SignalWorld>()
            .expect("world must be SignalWorld");
        w.log.push((sim.now().0, self.0));
    }
}

/// 到时间后触发一个信号
struct Fire(SignalId);

impl Event for Fire {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let w = world
            .as_any_mut()
            .downcast_mut::<SignalWorld>()
            .expect("world must be SignalWorld");
        w.signals.set(self.0, sim);
    }
}

#[test]
fn signal_fires_once_and_wakes_waiters_in_order() {
    let mut sim = Simulator::default();
    let mut world = SignalWorld::default();
    let s = world.signals.create();
    world.signals.wait(s, Note("a"), &mut sim);
    world.signals.wait(s, Note("b"), &mut sim);
    sim.schedule(SimTime(5), Fire(s));
    sim.schedule(SimTime(9), Fire(s));

    sim.run(&mut world);

    assert_eq!(world.log, vec![(5, "a"), (5, "b")]);
    assert!(world.signals.is_set(s));
    assert_eq!(world.signals.fired_at(s), Some(SimTime(5)));
}

#[test]
fn setting_a_signal_twice_is_a_no_op() {
    let mut sim = Simulator::default();
    let mut signals = Signals::default();
    let s = signals.create();

    assert!(signals.set(s, &mut sim));
    assert!(!signals.set(s, &mut sim));
    assert!(signals.is_set(s));
    assert!(!signals.set(SignalId(99), &mut sim));
}

#[test]
fn waiting_on_a_fired_signal_resumes_immediately() {
    let mut sim = Simulator::default();
    let mut world = SignalWorld::default();
    let s = world.signals.create();
    world.signals.set(s, &mut sim);

    world.signals.wait(s, Note("late"), &mut sim);
    sim.run(&mut world);

    assert_eq!(world.log, vec![(0, "late")]);
}

#[test]
fn wait_all_resolves_only_after_every_member_fires() {
    let mut sim = Simulator::default();
    let mut world = SignalWorld::default();
    let ids: Vec<SignalId> = (0..3).map(|_| world.signals.create()).collect();
    world.signals.wait_all(&ids, Note("all"), &mut sim);
    world.signals.wait(ids[0], Note("first"), &mut sim);

    sim.schedule(SimTime(3), Fire(ids[0]));
    sim.schedule(SimTime(7), Fire(ids[2]));
    sim.run_until(SimTime(10), &mut world);
    assert_eq!(world.log, vec![(3, "first")]);

    sim.schedule(SimTime(12), Fire(ids[1]));
    sim.run(&mut world);
    assert_eq!(world.log, vec![(3, "first"), (12, "all")]);
}

#[test]
fn wait_all_over_empty_or_fired_members_resolves_now() {
    let mut sim = Simulator::default();
    let mut world = SignalWorld::default();
    let s = world.signals.create();
    world.signals.set(s, &mut sim);

    world.signals.wait_all(&[], Note("empty"), &mut sim);
    world.signals.wait_all(&[s], Note("fired"), &mut sim);
    sim.run(&mut world);

    assert_eq!(world.log, vec![(0, "empty"), (0, "fired")]);
}
