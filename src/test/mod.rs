mod scenario;
mod signals;
mod sim_time;

use crate::race::{Animal, AnimalProfile, Tactic};

/// 测试用的标准动物：极速 10 m/s，加速度 2 m/s²，体力 100，恢复 10/s
pub(crate) fn runner(name: &str, tactic: Tactic) -> AnimalProfile {
    AnimalProfile::new(name, 10.0, 2.0, 100.0, 10.0, tactic)
}

/// 逐个样本检查：速度在 [0, 极速]，体力在 [0, 基础体力]，距离单调不减
pub(crate) fn assert_sample_bounds(a: &Animal) {
    let p = a.profile();
    let h = a.history();
    for (i, s) in h.iter().enumerate() {
        assert!(
            (0.0..=p.top_speed).contains(&s.speed),
            "{} sample {i}: speed {}",
            a.name(),
            s.speed
        );
        assert!(
            (0.0..=p.base_stamina).contains(&s.stamina),
            "{} sample {i}: stamina {}",
            a.name(),
            s.stamina
        );
    }
    assert!(
        h.distance().windows(2).all(|w| w[0] <= w[1]),
        "{} moved backwards",
        a.name()
    );
}
