mod common;

use avoider::{
    classify_point, Actor, AvoiderError, Encounter, EvaderConfig, EvaderSnapshot, EvaderState, Locomotion,
    Observers, Scene, SceneLayout, Visibility,
};

fn courtyard_encounter(seed: u64) -> Encounter<Scene, Actor> {
    let layout = SceneLayout::courtyard();
    Encounter::builder()
        .config(EvaderConfig::default())
        .oracle(layout.build_scene(0.5))
        .pursuer(Actor::new(layout.pursuer_start.x, layout.pursuer_start.y, 3.5).with_stopping_distance(1.0))
        .evader_body(Actor::new(layout.evader_start.x, layout.evader_start.y, 6.0).with_stopping_distance(0.1))
        .seed(seed)
        .build()
        .unwrap()
}

fn step(encounter: &mut Encounter<Scene, Actor>, dt: f32) {
    encounter.tick(dt);
    encounter.pursuer_mut().update(dt);
    encounter.evader_body_mut().update(dt);
}

#[test]
fn test_first_tick_picks_a_spot_hidden_from_the_pursuer() {
    let mut encounter = courtyard_encounter(31);
    let pursuer = encounter.pursuer().position();
    let evader = encounter.evader_body().position();

    let report = encounter.tick(1.0 / 60.0);

    assert!(report.seen);
    let chosen = report.new_destination.expect("courtyard has cover");
    let observers = Observers {
        pursuer,
        evader,
        probe_height: 0.0,
    };
    assert_eq!(classify_point(encounter.oracle(), &observers, chosen), Visibility::Hidden);
    assert_eq!(encounter.evader_body().dest, Some(chosen));
}

#[test]
fn test_evader_moves_away_over_time() {
    let mut encounter = courtyard_encounter(32);
    let start = encounter.evader_body().ground_position();

    for _ in 0..120 {
        step(&mut encounter, 1.0 / 60.0);
    }

    let now = encounter.evader_body().ground_position();
    assert!(now.distance(start) > 1.0, "evader stayed near {:?}", start);
    assert!(encounter.evader().total_episodes() >= 1);
}

#[test]
fn test_snapshot_round_trips_through_a_file() {
    let mut encounter = courtyard_encounter(33);
    step(&mut encounter, 1.0 / 60.0);

    let snapshot = encounter.snapshot(10);
    assert!(snapshot.seen.len() <= 10);
    assert!(snapshot.hidden.len() <= 10);
    assert_eq!(snapshot.destination, encounter.evader().destination());
    assert_eq!(snapshot.state, EvaderState::Running);

    let path = std::env::temp_dir().join("avoider_snapshot_test.json");
    let path = path.to_str().unwrap();
    snapshot.save_to_file(path).unwrap();
    let loaded = EvaderSnapshot::load_from_file(path).unwrap();
    assert_eq!(loaded, snapshot);
    std::fs::remove_file(path).ok();
}

#[test]
fn test_layout_round_trips_through_a_file() {
    let layout = SceneLayout::courtyard();
    let path = std::env::temp_dir().join("avoider_layout_test.json");
    let path = path.to_str().unwrap();
    layout.save_to_file(path).unwrap();

    let loaded = SceneLayout::load_from_file(path).unwrap();
    assert_eq!(loaded.obstacles, layout.obstacles);
    assert_eq!(loaded.evader_start, layout.evader_start);
    std::fs::remove_file(path).ok();
}

#[test]
fn test_missing_pursuer_is_fatal() {
    let result = Encounter::<Scene, Actor>::builder()
        .oracle(Scene::new(0.5))
        .evader_body(Actor::new(0.0, 0.0, 1.0))
        .build();
    assert!(matches!(result, Err(AvoiderError::MissingCollaborator(_))));
}

#[test]
fn test_bad_config_is_fatal() {
    let result = Encounter::builder()
        .config(EvaderConfig {
            min_spacing: -1.0,
            ..EvaderConfig::default()
        })
        .oracle(Scene::new(0.5))
        .pursuer(Actor::new(0.0, 0.0, 1.0))
        .evader_body(Actor::new(1.0, 0.0, 1.0))
        .build();
    assert!(matches!(
        result,
        Err(AvoiderError::NonPositive { field: "min_spacing", .. })
    ));
}
