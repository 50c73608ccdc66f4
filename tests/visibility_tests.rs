use orbitsim::math::Vec2;
use orbitsim::visibility::LineOfSight;
use orbitsim::CelestialBody;

fn body(name: &str, x: f64, y: f64, radius: f64) -> CelestialBody {
    CelestialBody::named(name, Vec2::new(x, y), Vec2::ZERO, 1.0e20, radius).unwrap()
}

#[test]
fn test_body_on_segment_blocks() {
    let los = LineOfSight::default();
    let source = body("Source", 0.0, 0.0, 1.0);
    let target = body("Target", 100.0, 0.0, 1.0);
    let planet = body("Planet", 50.0, 5.0, 10.0);

    let obstacles = [planet];
    let blocker = los.find_obstruction(&source, &target, &obstacles);
    assert_eq!(blocker.map(CelestialBody::label), Some("Planet"));
    assert!(los.is_obstructed(&source, &target, &obstacles));
}

#[test]
fn test_body_beside_segment_does_not_block() {
    let los = LineOfSight::default();
    let source = body("Source", 0.0, 0.0, 1.0);
    let target = body("Target", 100.0, 0.0, 1.0);
    let planet = body("Planet", 50.0, 20.0, 10.0);

    assert!(los.is_clear(&source, &target, &[planet]));
}

#[test]
fn test_body_on_line_but_beyond_endpoints_does_not_block() {
    let los = LineOfSight::default();
    let source = body("Source", 0.0, 0.0, 1.0);
    let target = body("Target", 100.0, 100.0, 1.0);
    // Exactly on the infinite line, far outside the segment's box.
    let planet = body("Planet", 500.0, 500.0, 10.0);

    assert!(los.is_clear(&source, &target, &[planet]));
}

#[test]
fn test_endpoints_are_never_obstacles() {
    let los = LineOfSight::default();
    let bodies = vec![
        body("Giant", 0.0, 0.0, 1.0e6),
        body("Moon", 5.0e6, 0.0, 1.0e5),
    ];

    assert!(los.is_clear(&bodies[0], &bodies[1], &bodies));
}

#[test]
fn test_equal_but_distinct_body_still_obstructs() {
    let los = LineOfSight::default();
    let source = body("Source", 0.0, 0.0, 1.0);
    let target = body("Target", 100.0, 0.0, 1.0);
    // Same data as the target but a different body: only identity is skipped.
    let twin = target.clone();

    assert!(los.is_obstructed(&source, &target, [&twin]));
}

#[test]
fn test_visibility_is_symmetric() {
    let los = LineOfSight::default();
    let a = body("A", -30.0, 12.0, 1.0);
    let b = body("B", 80.0, -40.0, 1.0);
    let obstacles = vec![
        body("P1", 20.0, -8.0, 6.0),
        body("P2", 0.0, 60.0, 3.0),
        body("P3", 60.0, 60.0, 12.0),
    ];

    assert_eq!(
        los.is_clear(&a, &b, &obstacles),
        los.is_clear(&b, &a, &obstacles)
    );

    let c = body("C", 0.0, -60.0, 1.0);
    assert_eq!(
        los.is_clear(&a, &c, &obstacles),
        los.is_clear(&c, &a, &obstacles)
    );
}

#[test]
fn test_interference_factor_widens_obstacles() {
    let source = body("Source", 0.0, 0.0, 1.0);
    let target = body("Target", 100.0, 0.0, 1.0);
    let planet = body("Planet", 50.0, 15.0, 10.0);
    let obstacles = [planet];

    assert!(LineOfSight::new(1.0).is_clear(&source, &target, &obstacles));
    assert!(LineOfSight::new(2.0).is_obstructed(&source, &target, &obstacles));
    assert!(LineOfSight::new(0.0).is_clear(&source, &target, &obstacles));
}

#[test]
fn test_vertical_segment() {
    let los = LineOfSight::default();
    let source = body("Source", 10.0, -100.0, 1.0);
    let target = body("Target", 10.0, 100.0, 1.0);

    assert!(los.is_obstructed(&source, &target, &[body("Near", 14.0, 0.0, 5.0)]));
    assert!(los.is_clear(&source, &target, &[body("Far", 30.0, 0.0, 5.0)]));
}

#[test]
fn test_coincident_endpoints_are_clear() {
    let los = LineOfSight::default();
    let source = body("Source", 10.0, 10.0, 1.0);
    let target = body("Target", 10.0, 10.0, 1.0);

    assert!(los.is_clear(&source, &target, &[body("Planet", 10.0, 10.0, 50.0)]));
}
