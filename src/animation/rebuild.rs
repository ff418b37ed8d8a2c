//! Reassembly: pair debris with target cells and fly each one home along
//! an eased arc.

use std::f32::consts::PI;

use glam::Vec3;
use rand::rngs::StdRng;

use super::particle::Particle;
use super::sample_range;
use crate::options::RebuildOptions;
use crate::voxel::Voxel;

/// How the debris was matched to the target list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildPlan {
    /// Targets served by an existing debris particle.
    pub reused: usize,
    /// Targets that needed a fresh particle at the spawn point.
    pub spawned: usize,
    /// Debris particles with no target; their voxels are dropped.
    pub discarded: usize,
}

/// Pair `sources` with `targets` in list order.
///
/// Extra targets get a new particle floating at `spawn_point`; extra sources
/// are discarded. Every returned particle carries a target and a random
/// start delay.
pub(crate) fn assign(
    sources: Vec<Particle>,
    targets: &[Voxel],
    spawn_point: Vec3,
    options: &RebuildOptions,
    rng: &mut StdRng,
) -> (Vec<Particle>, RebuildPlan) {
    let plan = RebuildPlan {
        reused: sources.len().min(targets.len()),
        spawned: targets.len().saturating_sub(sources.len()),
        discarded: sources.len().saturating_sub(targets.len()),
    };

    let mut sources = sources.into_iter();
    let particles = targets
        .iter()
        .map(|&target| {
            let mut particle = sources
                .next()
                .unwrap_or_else(|| Particle::floating(target, spawn_point));
            particle.source = particle.position;
            particle.source_rotation = particle.rotation;
            particle.velocity = Vec3::ZERO;
            particle.angular_velocity = Vec3::ZERO;
            particle.start_delay = sample_range(rng, 0.0, options.max_stagger);
            particle.elapsed = 0.0;
            particle.progress = 0.0;
            particle.target = Some(target);
            particle
        })
        .collect();

    (particles, plan)
}

/// Advance one particle along its arc. Returns `true` once it has landed,
/// in which case it sits exactly on its target cell.
pub(crate) fn step(particle: &mut Particle, dt: f32, options: &RebuildOptions) -> bool {
    let Some(target) = particle.target else {
        return true;
    };
    particle.elapsed += dt;

    let t = normalized_time(particle.elapsed, particle.start_delay, options.duration);
    if t >= 1.0 {
        particle.position = target.position();
        particle.rotation = Vec3::ZERO;
        particle.progress = 1.0;
        return true;
    }

    let e = options.easing.evaluate(t);
    particle.position = particle.source.lerp(target.position(), e)
        + Vec3::Y * (options.arc_height * (PI * e).sin());
    particle.rotation = particle.source_rotation.lerp(Vec3::ZERO, e);
    particle.progress = e;
    false
}

/// `(elapsed - delay) / duration` clamped to [0, 1]. A non-positive
/// duration jumps straight to 1 once the delay has passed.
fn normalized_time(elapsed: f32, delay: f32, duration: f32) -> f32 {
    let local = elapsed - delay;
    if local < 0.0 {
        return 0.0;
    }
    if duration <= 0.0 {
        return 1.0;
    }
    (local / duration).min(1.0)
}
