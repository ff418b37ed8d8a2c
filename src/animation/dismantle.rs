//! Explosive disassembly: outward impulses, gravity, and damped floor
//! bounces.

use glam::Vec3;
use rand::rngs::StdRng;

use super::particle::Particle;
use super::sample_range;
use crate::options::DismantleOptions;

/// Half the voxel edge; a resting particle's center sits this far above the
/// floor plane.
const HALF_EXTENT: f32 = 0.5;

/// Spawn one airborne particle per voxel position, pushed away from
/// `centroid`.
pub(crate) fn launch(
    particle: &mut Particle,
    centroid: Vec3,
    options: &DismantleOptions,
    rng: &mut StdRng,
) {
    let away = particle.position - centroid;
    let direction = if away.length_squared() > 1e-6 {
        away.normalize()
    } else {
        Vec3::Y
    };
    let magnitude = sample_range(rng, options.impulse_min, options.impulse_max);
    particle.velocity = direction * magnitude + Vec3::Y * options.upward_bias;

    let spin = options.spin_max.abs();
    particle.angular_velocity = Vec3::new(
        sample_range(rng, -spin, spin),
        sample_range(rng, -spin, spin),
        sample_range(rng, -spin, spin),
    );
    particle.source = particle.position;
    particle.source_rotation = particle.rotation;
    particle.elapsed = 0.0;
    particle.grounded = false;
    particle.settled = false;
}

/// Advance one particle by `dt` seconds.
pub(crate) fn step(particle: &mut Particle, dt: f32, options: &DismantleOptions) {
    particle.elapsed += dt;
    if !particle.settled {
        particle.velocity.y -= options.gravity * dt;
    }
    particle.position += particle.velocity * dt;
    particle.rotation += particle.angular_velocity * dt;

    let rest_y = options.floor_y + HALF_EXTENT;
    if particle.position.y > rest_y {
        return;
    }

    particle.position.y = rest_y;
    particle.grounded = true;
    // A particle already moving up is only snapped onto the floor.
    if !particle.settled && particle.velocity.y <= 0.0 {
        particle.velocity.y = -particle.velocity.y * options.restitution;
        if particle.velocity.y.abs() < options.settle_epsilon {
            particle.velocity.y = 0.0;
            particle.settled = true;
        }
    }

    particle.velocity.x *= options.friction;
    particle.velocity.z *= options.friction;
    particle.angular_velocity *= options.friction;

    if particle.settled {
        let still = options.settle_epsilon * 0.1;
        if particle.velocity.x.abs() < still && particle.velocity.z.abs() < still {
            particle.velocity.x = 0.0;
            particle.velocity.z = 0.0;
        }
        if particle.angular_velocity.length() < still {
            particle.angular_velocity = Vec3::ZERO;
        }
    }
}

/// Split `dt` into at most `MAX_SUBSTEPS` slices no longer than
/// `options.max_step`.
pub(crate) fn substeps(dt: f32, options: &DismantleOptions) -> (u32, f32) {
    const MAX_SUBSTEPS: u32 = 8;
    if dt <= 0.0 {
        return (0, 0.0);
    }
    let max_step = options.max_step.max(1e-4);
    let count = ((dt / max_step).ceil() as u32).clamp(1, MAX_SUBSTEPS);
    (count, (dt / count as f32).min(max_step))
}
