use orbitsim::constants::G;
use orbitsim::gravity::{GravitySolver, MassPoint};
use orbitsim::math::Vec2;
use orbitsim::{CelestialBody, SimError};

const EARTH_MASS: f64 = 5.972e24;
const MOON_MASS: f64 = 7.347e22;
const MOON_DISTANCE: f64 = 3.844e8;

fn earth_and_moon() -> Vec<CelestialBody> {
    vec![
        CelestialBody::named("Earth", Vec2::ZERO, Vec2::ZERO, EARTH_MASS, 6.371e6).unwrap(),
        CelestialBody::named("Moon", Vec2::new(MOON_DISTANCE, 0.0), Vec2::ZERO, MOON_MASS, 1.737e6).unwrap(),
    ]
}

fn relative_error(actual: f64, expected: f64) -> f64 {
    ((actual - expected) / expected).abs()
}

#[test]
fn test_pairwise_forces_are_antisymmetric() {
    let solver = GravitySolver::new();
    let a = MassPoint {
        position: Vec2::new(-3.0e7, 1.2e7),
        mass: 4.0e23,
    };
    let b = MassPoint {
        position: Vec2::new(5.0e7, -2.5e7),
        mass: 9.0e21,
    };

    let on_a = solver.pairwise_force(&a, &b).unwrap();
    let on_b = solver.pairwise_force(&b, &a).unwrap();
    assert!((on_a + on_b).norm() <= 1e-12 * on_a.norm());
}

#[test]
fn test_pairwise_force_magnitude_is_newtonian() {
    let solver = GravitySolver::new();
    let earth = MassPoint {
        position: Vec2::ZERO,
        mass: EARTH_MASS,
    };
    let moon = MassPoint {
        position: Vec2::new(0.0, MOON_DISTANCE),
        mass: MOON_MASS,
    };

    let force = solver.pairwise_force(&earth, &moon).unwrap();
    let expected = G * EARTH_MASS * MOON_MASS / (MOON_DISTANCE * MOON_DISTANCE);
    assert!(relative_error(force.norm(), expected) < 1e-12);
    // Earth is pulled up the y axis, towards the Moon.
    assert!(force.y > 0.0);
    assert!(force.x.abs() < 1e-9 * expected);
}

#[test]
fn test_earth_moon_free_fall_first_tick() {
    let mut bodies = earth_and_moon();
    let dt = 60.0;
    GravitySolver::new().step(bodies.iter_mut(), dt).unwrap();

    let moon_speed = G * EARTH_MASS / (MOON_DISTANCE * MOON_DISTANCE) * dt;
    let earth_speed = G * MOON_MASS / (MOON_DISTANCE * MOON_DISTANCE) * dt;

    let moon = &bodies[1];
    assert!(relative_error(-moon.velocity.x, moon_speed) < 1e-9);
    assert_eq!(moon.velocity.y, 0.0);
    // Position uses the freshly updated velocity.
    assert!(relative_error(MOON_DISTANCE - moon.position.x, moon_speed * dt) < 1e-6);

    let earth = &bodies[0];
    assert!(relative_error(earth.velocity.x, earth_speed) < 1e-9);
    assert!(relative_error(earth.position.x, earth_speed * dt) < 1e-9);
}

#[test]
fn test_momentum_is_conserved() {
    let mut bodies = vec![
        CelestialBody::named("A", Vec2::new(0.0, 0.0), Vec2::new(0.0, -12.0), 5.0e24, 6.0e6).unwrap(),
        CelestialBody::named("B", Vec2::new(4.0e8, 0.0), Vec2::new(0.0, 1000.0), 7.0e22, 1.7e6).unwrap(),
        CelestialBody::named("C", Vec2::new(-2.0e8, 3.0e8), Vec2::new(300.0, 50.0), 2.0e22, 1.0e6).unwrap(),
    ];
    let total = |bodies: &[CelestialBody]| bodies.iter().fold(Vec2::ZERO, |acc, b| acc + b.momentum());
    let scale: f64 = bodies.iter().map(|b| b.momentum().norm()).sum();
    let before = total(&bodies);

    let solver = GravitySolver::new();
    for _ in 0..1000 {
        solver.step(bodies.iter_mut(), 60.0).unwrap();
    }

    let drift = (total(&bodies) - before).norm();
    assert!(drift <= 1e-9 * scale, "momentum drifted by {}", drift);
}

#[test]
fn test_coincident_bodies_abort_without_mutation() {
    let mut bodies = vec![
        CelestialBody::named("Far", Vec2::new(1.0e9, 0.0), Vec2::new(0.0, 5.0), 1.0e20, 1.0).unwrap(),
        CelestialBody::named("Alpha", Vec2::new(10.0, 10.0), Vec2::new(1.0, 0.0), 1.0e20, 1.0).unwrap(),
        CelestialBody::named("Beta", Vec2::new(10.0, 10.0), Vec2::new(-1.0, 0.0), 1.0e20, 1.0).unwrap(),
    ];
    let before = bodies.clone();

    let result = GravitySolver::new().step(bodies.iter_mut(), 60.0);
    match result {
        Err(SimError::CoincidentBodies { first, second }) => {
            assert_eq!(first, "Alpha");
            assert_eq!(second, "Beta");
        }
        other => panic!("expected CoincidentBodies, got {:?}", other),
    }
    assert_eq!(bodies, before);
}

#[test]
fn test_custom_constant_scales_acceleration() {
    let mut weak = earth_and_moon();
    let mut strong = earth_and_moon();
    GravitySolver::with_constant(G).step(weak.iter_mut(), 60.0).unwrap();
    GravitySolver::with_constant(2.0 * G).step(strong.iter_mut(), 60.0).unwrap();

    assert!(relative_error(strong[1].velocity.x, 2.0 * weak[1].velocity.x) < 1e-12);
}

#[test]
fn test_invalid_bodies_are_rejected() {
    assert!(matches!(
        CelestialBody::named("Ghost", Vec2::ZERO, Vec2::ZERO, 0.0, 1.0),
        Err(SimError::InvalidBody { .. })
    ));
    assert!(matches!(
        CelestialBody::named("Dot", Vec2::ZERO, Vec2::ZERO, 1.0, -2.0),
        Err(SimError::InvalidBody { .. })
    ));
    assert!(matches!(
        CelestialBody::named("Lost", Vec2::new(f64::NAN, 0.0), Vec2::ZERO, 1.0, 1.0),
        Err(SimError::InvalidBody { .. })
    ));
}
