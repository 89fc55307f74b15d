use crate::race::{RaceError, RunLimit, Tactic};
use crate::scenario::Scenario;
use crate::sim::{SimConfig, SimTime};

#[test]
fn scenario_parses_minimal_json_with_defaults() {
    let raw = r#"
    {
        "animals": [
            { "name": "cow", "top_speed": 11.18, "base_acceleration": 2,
              "base_stamina": 200, "regen_rate": 10 }
        ]
    }
    "#;
    let sc = Scenario::from_json_str(raw).expect("parse scenario");
    assert_eq!(sc.config, SimConfig::default());
    assert!(sc.track_length.is_none());
    assert_eq!(sc.animals.len(), 1);
    assert_eq!(sc.animals[0].tactic, Tactic::SprintRest);
}

#[test]
fn scenario_accepts_both_tactic_spellings_and_config_overrides() {
    let raw = r#"
    {
        "config": { "step": 2000000, "walk_speed": 2.0, "time_budget_s": 30 },
        "track_length": 100,
        "animals": [
            { "name": "a", "top_speed": 10, "base_acceleration": 2,
              "base_stamina": 100, "regen_rate": 10, "tactic": "sprint_walk" },
            { "name": "b", "top_speed": 10, "base_acceleration": 2,
              "base_stamina": 100, "regen_rate": 10, "tactic": "sprint-rest" }
        ]
    }
    "#;
    let sc = Scenario::from_json_str(raw).expect("parse scenario");
    assert_eq!(sc.config.step, SimTime::from_millis(2));
    assert_eq!(sc.config.walk_speed, 2.0);
    assert_eq!(sc.config.rest_recovery, 1.0);
    assert_eq!(sc.config.time_budget(), Some(SimTime::from_secs(30)));
    assert_eq!(sc.track_length, Some(100.0));
    assert_eq!(sc.animals[0].tactic, Tactic::SprintWalk);
    assert_eq!(sc.animals[1].tactic, Tactic::SprintRest);
}

#[test]
fn malformed_scenario_is_a_parse_error() {
    let err = Scenario::from_json_str(r#"{ "animals": [ { "name": "x" } ] }"#)
        .expect_err("missing fields");
    assert!(matches!(err, RaceError::Scenario(_)));
}

#[test]
fn building_scenario_with_invalid_profile_fails_fast() {
    let mut sc = Scenario::builtin();
    sc.animals[1].base_stamina = 0.0;
    match sc.build() {
        Err(RaceError::InvalidProfile { name, .. }) => assert_eq!(name, "jaguar"),
        Err(e) => panic!("expected InvalidProfile, got {e}"),
        Ok(_) => panic!("expected InvalidProfile"),
    }
}

#[test]
fn builtin_scenario_runs_to_completion_on_a_short_track() {
    let mut sc = Scenario::builtin();
    sc.track_length = Some(100.0);
    sc.config.time_budget_s = Some(300.0);
    let (mut rs, race) = sc.build().expect("build");
    let race = race.expect("track length given");

    assert!(rs.run(RunLimit::UntilSettled).is_completed());
    let results = rs.world.race(race).expect("race").results();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].name, "jaguar");
}

#[test]
fn scenario_without_track_is_a_free_run() {
    let mut sc = Scenario::builtin();
    sc.track_length = None;
    let (mut rs, race) = sc.build().expect("build");
    assert!(race.is_none());
    assert!(rs.world.races().is_empty());

    rs.run(RunLimit::For(SimTime::from_secs(1)));
    assert!(rs.world.animals().iter().all(|a| a.history().len() == 1_001));
    assert!(rs.world.animals().iter().all(|a| !a.is_finished()));
}
