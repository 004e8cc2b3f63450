// Particle pass scenarios
//
// End-to-end checks of one update cycle (velocity pass, position pass, swap)
// through the public API: free flight, respawn, collisions.

use fluid_particles::obstacles::{Brush, ObstacleField};
use fluid_particles::particles::physics::{is_obstacle, resolve_collision};
use fluid_particles::particles::{ParticleState, ParticleSystem, WorldParameters};
use fluid_particles::ComputeBackend;
use glam::Vec2;

fn backend() -> ComputeBackend {
    ComputeBackend::new(Some(4)).unwrap()
}

#[test]
fn test_free_flight_on_4x4_grid() {
    let backend = backend();
    let world = WorldParameters::new(64.0, 64.0);
    let state = ParticleState::from_fn(4, 4, &world, |x, y| {
        let p = Vec2::new(x as f32 - 1.5, y as f32 - 1.5) * 10.0;
        let v = Vec2::new(y as f32 - 2.0, x as f32 - 1.0) * 3.0;
        (p, v)
    })
    .unwrap();
    let before = state.decode_current(&world);

    let mut system = ParticleSystem::from_state(world, state);
    system.set_acceleration(Vec2::ZERO);
    system.update(&backend, &ObstacleField::new(64, 64), 0.1);

    let after = system.state().decode_current(&world);
    assert_eq!(after.len(), 16);
    let tolerance = 2.0 * world.position_codec.precision();
    for ((p0, v0), (p1, v1)) in before.iter().zip(&after) {
        let expected = *p0 + 0.1 * *v0;
        assert!(
            (*p1 - expected).abs().max_element() <= tolerance,
            "expected {:?}, got {:?}",
            expected,
            p1
        );
        assert!((*v1 - *v0).abs().max_element() <= world.velocity_codec.precision());
    }
}

#[test]
fn test_respawn_containment() {
    let backend = backend();
    let world = WorldParameters::new(80.0, 60.0);
    let state = ParticleState::from_fn(8, 4, &world, |x, y| {
        let p = Vec2::new(x as f32 * 9.0 - 35.0, world.lower_bound() - 0.5 - y as f32 * 3.0);
        (p, Vec2::new(0.0, -20.0))
    })
    .unwrap();

    let mut system = ParticleSystem::from_state(world, state);
    system.update(&backend, &ObstacleField::new(80, 60), 1.0 / 60.0);

    let floor = world.upper_bound() - world.position_codec.precision();
    for (p, v) in system.state().decode_current(&world) {
        assert!(p.y >= floor, "respawned at {:?}", p);
        assert!(p.x.abs() <= 0.5 * world.world_size.x + 1e-3);
        assert!(v.length() <= world.max_speed);
    }
}

#[test]
fn test_particles_fall_under_gravity() {
    let backend = backend();
    let world = WorldParameters::new(100.0, 100.0);
    let state = ParticleState::from_fn(4, 4, &world, |x, y| {
        (Vec2::new(x as f32 * 5.0, y as f32 * 5.0), Vec2::ZERO)
    })
    .unwrap();
    let mut system = ParticleSystem::from_state(world, state);

    let mean_y = |system: &ParticleSystem| {
        let decoded = system.state().decode_current(&world);
        decoded.iter().map(|(p, _)| p.y).sum::<f32>() / decoded.len() as f32
    };

    let start = mean_y(&system);
    for _ in 0..5 {
        system.update(&backend, &ObstacleField::new(32, 32), 1.0 / 60.0);
    }
    assert!(mean_y(&system) < start);
}

#[test]
fn test_particle_bounces_off_painted_obstacle() {
    let backend = backend();
    let world = WorldParameters::new(64.0, 64.0);
    let mut field = ObstacleField::new(64, 64);
    field.add_static_obstacle(&backend, Vec2::splat(0.5), Brush::new(Vec2::splat(0.2)));

    // just above the disk center, falling into it
    let state = ParticleState::from_fn(1, 1, &world, |_, _| (Vec2::new(0.0, 8.0), Vec2::new(0.0, -20.0))).unwrap();
    let mut system = ParticleSystem::from_state(world, state);
    system.update(&backend, &field, 1.0 / 60.0);

    let (_, v) = system.state().decode_current(&world)[0];
    assert!(v.y >= -world.velocity_codec.precision(), "still heading in: {:?}", v);
    assert!(v.length() <= 0.1 * world.max_speed + world.velocity_codec.precision());
}

#[test]
fn test_collision_never_points_inward() {
    let max_speed = 50.0;
    for i in 0..32 {
        let angle = i as f32 / 32.0 * std::f32::consts::TAU;
        let normal = Vec2::new(angle.cos(), angle.sin());
        assert!(is_obstacle(normal));

        let incoming = -normal * 80.0 + normal.perp() * (i as f32 - 16.0);
        let bounced = resolve_collision(incoming, normal, max_speed);
        assert!(bounced.dot(normal) >= -1e-4);
        assert!(bounced.length() <= max_speed);
    }
}

#[test]
fn test_reset_particle_count() {
    let world = WorldParameters::new(64.0, 64.0);
    let mut system = ParticleSystem::new(world, 16, 16, Some(5)).unwrap();
    for (w, h) in [(1, 1), (3, 7), (32, 8), (64, 64)] {
        system.reset(w, h).unwrap();
        assert_eq!(system.particle_count(), (w * h) as usize);
    }
}
