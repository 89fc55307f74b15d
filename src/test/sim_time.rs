use crate::sim::SimTime;

#[test]
fn sim_time_unit_conversions() {
    assert_eq!(SimTime::from_micros(1), SimTime(1_000));
    assert_eq!(SimTime::from_millis(1), SimTime(1_000_000));
    assert_eq!(SimTime::from_secs(1), SimTime(1_000_000_000));
}

#[test]
fn sim_time_unit_conversions_saturate_on_overflow() {
    assert_eq!(SimTime::from_micros(u64::MAX), SimTime(u64::MAX));
    assert_eq!(SimTime::from_secs(u64::MAX), SimTime(u64::MAX));
    assert_eq!(SimTime(u64::MAX - 1).after(SimTime(5)), SimTime(u64::MAX));
}

#[test]
fn float_seconds_round_to_nanoseconds() {
    assert_eq!(SimTime::from_secs_f64(0.001), SimTime::from_millis(1));
    assert_eq!(SimTime::from_secs_f64(2.5), SimTime(2_500_000_000));
    assert_eq!(SimTime::from_secs_f64(-1.0), SimTime::ZERO);
    assert_eq!(SimTime::from_secs_f64(f64::NAN), SimTime::ZERO);
    assert_eq!(SimTime::from_millis(1500).as_secs_f64(), 1.5);
}
