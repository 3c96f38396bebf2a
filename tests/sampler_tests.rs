mod common;

use avoider::{EvaderConfig, PoissonDiscSampler, Point2D, SamplingAnchor};
use common::{assert_min_spacing, standoff_pursuer, standoff_scene, StubBody};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_vision_range_ten_spacing_one() {
    let vision_range = 10.0;
    let sampler = PoissonDiscSampler::square(vision_range, 1.0).unwrap();

    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let points: Vec<Point2D> = sampler
            .generate(&mut rng)
            .into_iter()
            .map(|p| Point2D::new(p.x - vision_range, p.y - vision_range))
            .collect();

        assert!(!points.is_empty());
        assert_min_spacing(&points, 1.0);
        for p in &points {
            assert!(p.x >= -vision_range && p.x <= vision_range, "{:?} out of range", p);
            assert!(p.y >= -vision_range && p.y <= vision_range, "{:?} out of range", p);
        }
    }
}

#[test]
fn test_rectangular_region() {
    let mut rng = StdRng::seed_from_u64(42);
    let sampler = PoissonDiscSampler::new(30.0, 4.0, 1.5).unwrap();
    let points = sampler.generate(&mut rng);

    assert_min_spacing(&points, 1.5);
    assert!(points.iter().all(|p| p.x >= 0.0 && p.x < 30.0 && p.y >= 0.0 && p.y < 4.0));
}

#[test]
fn test_fresh_calls_are_independent() {
    let mut rng = StdRng::seed_from_u64(5);
    let sampler = PoissonDiscSampler::square(5.0, 1.0).unwrap();
    let first = sampler.generate(&mut rng);
    let second = sampler.generate(&mut rng);
    assert_ne!(first, second);
}

#[test]
fn test_few_attempts_still_terminates() {
    let mut rng = StdRng::seed_from_u64(9);
    let sampler = PoissonDiscSampler::square(10.0, 0.5).unwrap().with_attempts(1);
    let points = sampler.generate(&mut rng);
    assert!(!points.is_empty());
    assert_min_spacing(&points, 0.5);
}

/// Every candidate of an episode, including the chosen destination
fn episode_points(anchor: SamplingAnchor, evader_at: Point2D) -> Vec<Point2D> {
    let config = EvaderConfig {
        vision_range: 4.0,
        sampling_anchor: anchor,
        ..EvaderConfig::default()
    };
    let mut evader = avoider::Evader::new(config).unwrap();
    let scene = standoff_scene(true);
    let mut body = StubBody::at(evader_at.x, evader_at.y);
    let mut rng = StdRng::seed_from_u64(17);

    evader.resample(standoff_pursuer(), &scene, &mut body, &mut rng);

    let candidates = evader.candidates();
    let mut points = candidates.seen.clone();
    points.extend(candidates.hidden.iter().copied());
    points.extend(evader.destination());
    points
}

#[test]
fn test_origin_anchor_centres_on_world_origin() {
    let points = episode_points(SamplingAnchor::Origin, Point2D::new(3.0, 3.0));
    assert!(!points.is_empty());
    assert_min_spacing(&points, 1.0);
    assert!(points.iter().all(|p| p.x.abs() <= 4.0 && p.y.abs() <= 4.0));
}

#[test]
fn test_evader_anchor_follows_evader() {
    let evader_at = Point2D::new(20.0, -15.0);
    let points = episode_points(SamplingAnchor::Evader, evader_at);
    assert!(!points.is_empty());
    assert!(points
        .iter()
        .all(|p| (p.x - evader_at.x).abs() <= 4.0 && (p.y - evader_at.y).abs() <= 4.0));
}
