//! Owns the particle set and drives whichever transition is in flight.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::particle::Particle;
use super::rebuild::RebuildPlan;
use super::{dismantle, rebuild};
use crate::options::AnimationOptions;
use crate::voxel::{centroid, dedup_voxels, Voxel};

/// What the particle set currently represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    /// No particles; the store is drawn as-is.
    #[default]
    Idle,
    /// Airborne or resting debris from a dismantle.
    Debris,
    /// Particles flying to their rebuild targets.
    Assembly,
}

/// Result of one [`AnimationController::advance`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Target voxels whose particles landed this tick, in landing order.
    pub landed: Vec<Voxel>,
    /// Set on the tick the assembly finishes: the complete, deduplicated
    /// target list the store must now hold.
    pub assembled: Option<Vec<Voxel>>,
    /// Set once, on the tick the last debris particle settles.
    pub newly_settled: bool,
}

/// Drives dismantle physics and rebuild interpolation for every voxel in
/// motion.
///
/// Randomness comes from a single seedable [`StdRng`] so trajectories are
/// reproducible when the seed is fixed.
pub struct AnimationController {
    options: AnimationOptions,
    rng: StdRng,
    motion: Motion,
    particles: Vec<Particle>,
    targets: Vec<Voxel>,
    settled_reported: bool,
}

impl AnimationController {
    /// Create a controller, seeding from `options.seed` or OS entropy.
    #[must_use]
    pub fn new(options: AnimationOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(options, rng)
    }

    /// Create a controller with an injected random source.
    #[must_use]
    pub fn with_rng(options: AnimationOptions, rng: StdRng) -> Self {
        Self {
            options,
            rng,
            motion: Motion::Idle,
            particles: Vec::new(),
            targets: Vec::new(),
            settled_reported: false,
        }
    }

    /// Replace the trajectory parameters. In-flight particles keep their
    /// already-drawn impulses and delays.
    pub fn set_options(&mut self, options: AnimationOptions) {
        self.options = options;
    }

    /// Current trajectory parameters.
    #[must_use]
    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    /// Blow `voxels` apart from their centroid.
    ///
    /// Voxels are launched in grid-key order so a fixed seed always gives the
    /// same debris field regardless of store iteration order.
    pub fn start_dismantle(&mut self, voxels: &[Voxel]) {
        let mut ordered = voxels.to_vec();
        ordered.sort_by_key(|v| v.key().raw());
        let center = centroid(ordered.iter().map(Voxel::position));

        let options = &self.options.dismantle;
        self.particles = ordered
            .into_iter()
            .map(|voxel| {
                let mut particle = Particle::at_rest(voxel);
                dismantle::launch(&mut particle, center, options, &mut self.rng);
                particle
            })
            .collect();
        self.targets.clear();
        self.motion = Motion::Debris;
        self.settled_reported = false;
        log::debug!("dismantle: launched {} particles", self.particles.len());
    }

    /// Send the current debris to `targets`.
    ///
    /// Targets are deduplicated first. Any existing debris is reused in list
    /// order; without debris every target gets a particle at the scene
    /// centroid.
    pub fn start_rebuild(&mut self, targets: &[Voxel]) -> RebuildPlan {
        let targets = dedup_voxels(targets);
        let sources = if self.motion == Motion::Debris {
            std::mem::take(&mut self.particles)
        } else {
            Vec::new()
        };
        let spawn_point = centroid(sources.iter().map(|p| p.position));

        let (particles, plan) = rebuild::assign(
            sources,
            &targets,
            spawn_point,
            &self.options.rebuild,
            &mut self.rng,
        );
        self.particles = particles;
        self.targets = targets;
        self.motion = Motion::Assembly;
        log::debug!(
            "rebuild: {} reused, {} spawned, {} discarded",
            plan.reused,
            plan.spawned,
            plan.discarded
        );
        plan
    }

    /// Drop every particle and return to idle.
    pub fn cancel(&mut self) {
        self.particles.clear();
        self.targets.clear();
        self.motion = Motion::Idle;
        self.settled_reported = false;
    }

    /// Advance all particles by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !dt.is_finite() || dt < 0.0 {
            return outcome;
        }
        match self.motion {
            Motion::Idle => {}
            Motion::Debris => self.advance_debris(dt, &mut outcome),
            Motion::Assembly => self.advance_assembly(dt, &mut outcome),
        }
        outcome
    }

    fn advance_debris(&mut self, dt: f32, outcome: &mut TickOutcome) {
        let options = &self.options.dismantle;
        let (count, step) = dismantle::substeps(dt, options);
        for _ in 0..count {
            for particle in &mut self.particles {
                dismantle::step(particle, step, options);
            }
        }
        if !self.settled_reported && self.particles.iter().all(|p| p.settled) {
            self.settled_reported = true;
            outcome.newly_settled = true;
        }
    }

    fn advance_assembly(&mut self, dt: f32, outcome: &mut TickOutcome) {
        let options = &self.options.rebuild;
        self.particles.retain_mut(|particle| {
            if !rebuild::step(particle, dt, options) {
                return true;
            }
            if let Some(target) = particle.target {
                outcome.landed.push(target);
            }
            false
        });

        if self.particles.is_empty() {
            outcome.assembled = Some(std::mem::take(&mut self.targets));
            self.motion = Motion::Idle;
        }
    }

    /// Particles currently in motion (or resting as debris).
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// What the particle set represents right now.
    #[must_use]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    /// Whether any transition owns particles.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.motion != Motion::Idle
    }

    /// Whether all debris has come to rest on the floor.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.motion == Motion::Debris && self.particles.iter().all(|p| p.settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> AnimationController {
        AnimationController::with_rng(AnimationOptions::default(), StdRng::seed_from_u64(42))
    }

    fn cube(n: i32, color: u32) -> Vec<Voxel> {
        let mut out = Vec::new();
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    out.push(Voxel::new(x, y, z, color));
                }
            }
        }
        out
    }

    fn run(controller: &mut AnimationController, seconds: f32) -> Vec<TickOutcome> {
        let ticks = (seconds * 60.0) as usize;
        (0..ticks).map(|_| controller.advance(1.0 / 60.0)).collect()
    }

    #[test]
    fn same_seed_gives_same_debris() {
        let voxels = cube(3, 0xFF0000);
        let mut a = seeded();
        let mut b = seeded();
        a.start_dismantle(&voxels);
        let mut reversed = voxels.clone();
        reversed.reverse();
        b.start_dismantle(&reversed);
        let _ = run(&mut a, 0.5);
        let _ = run(&mut b, 0.5);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn debris_settles_and_reports_once() {
        let mut c = seeded();
        c.start_dismantle(&cube(2, 0xFF0000));
        assert_eq!(c.motion(), Motion::Debris);
        assert!(!c.is_settled());

        let outcomes = run(&mut c, 20.0);
        assert!(c.is_settled());
        assert_eq!(outcomes.iter().filter(|o| o.newly_settled).count(), 1);
        // Debris stays until something else happens.
        assert_eq!(c.particles().len(), 8);
        assert_eq!(c.motion(), Motion::Debris);
    }

    #[test]
    fn rebuild_lands_every_target_then_completes() {
        let mut c = seeded();
        c.start_dismantle(&cube(2, 0xFF0000));
        let _ = run(&mut c, 1.0);

        let targets = vec![Voxel::new(1, 0, 0, 0x00FF00), Voxel::new(2, 0, 0, 0x0000FF)];
        let plan = c.start_rebuild(&targets);
        assert_eq!(plan.reused, 2);
        assert_eq!(plan.discarded, 6);
        assert_eq!(c.particles().len(), 2);

        let outcomes = run(&mut c, 3.0);
        let landed: usize = outcomes.iter().map(|o| o.landed.len()).sum();
        assert_eq!(landed, 2);
        let assembled: Vec<_> = outcomes.iter().filter_map(|o| o.assembled.clone()).collect();
        assert_eq!(assembled, vec![targets]);
        assert_eq!(c.motion(), Motion::Idle);
        assert!(c.particles().is_empty());
    }

    #[test]
    fn rebuild_with_duplicates_targets_each_cell_once() {
        let mut c = seeded();
        c.start_dismantle(&cube(1, 0));
        let plan = c.start_rebuild(&[
            Voxel::new(0, 0, 0, 0x111111),
            Voxel::new(0, 0, 0, 0x222222),
        ]);
        assert_eq!(plan.reused, 1);
        assert_eq!(c.particles().len(), 1);
        assert_eq!(
            c.particles()[0].target.map(|t| t.key()),
            Some(Voxel::new(0, 0, 0, 0).key())
        );
    }

    #[test]
    fn empty_rebuild_completes_on_next_tick() {
        let mut c = seeded();
        c.start_dismantle(&cube(2, 0));
        let _ = c.start_rebuild(&[]);
        let outcome = c.advance(0.0);
        assert_eq!(outcome.assembled, Some(Vec::new()));
        assert!(!c.is_active());
    }

    #[test]
    fn cancel_drops_particles() {
        let mut c = seeded();
        c.start_dismantle(&cube(2, 0));
        c.cancel();
        assert!(!c.is_active());
        assert!(c.particles().is_empty());
        assert_eq!(c.advance(1.0), TickOutcome::default());
    }

    #[test]
    fn invalid_dt_is_ignored() {
        let mut c = seeded();
        c.start_dismantle(&cube(1, 0));
        let before = c.particles().to_vec();
        let _ = c.advance(f32::NAN);
        let _ = c.advance(-1.0);
        assert_eq!(c.particles(), &before[..]);
    }
}
