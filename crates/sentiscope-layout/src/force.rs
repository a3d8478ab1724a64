#![forbid(unsafe_code)]

//! Deterministic force-directed position relaxation.
//!
//! A [`Simulation`] holds point [`Body`]s and a list of [`Force`]s. Each tick
//! cools `alpha`, lets every force adjust velocities, then applies velocity
//! decay and integrates positions:
//!
//! ```text
//! alpha += (alpha_target - alpha) * alpha_decay
//! for force in forces: force.apply(bodies, alpha)
//! for body in bodies:  v *= velocity_decay; p += v
//! ```
//!
//! With the defaults, `alpha` decays from 1 to `alpha_min` over 300 ticks.
//!
//! # Determinism
//!
//! There is no randomness except the tie-breaking jiggle used when two
//! bodies coincide exactly, and that comes from a fixed-seed [`Lcg`]. The
//! same bodies in the same order always settle in the same place.

/// A point mass with velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Body {
    #[must_use]
    pub const fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
        }
    }
}

/// Linear congruential generator with the classic Numerical Recipes
/// constants, seeded at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    const A: u64 = 1_664_525;
    const C: u64 = 1_013_904_223;
    const M: u64 = 1 << 32;

    #[must_use]
    pub const fn new() -> Self {
        Self { state: 1 }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (Self::A * self.state + Self::C) % Self::M;
        self.state as f64 / Self::M as f64
    }

    /// Offset in `[-5e-7, 5e-7)` used to separate coincident bodies.
    pub fn jiggle(&mut self) -> f64 {
        (self.next_f64() - 0.5) * 1e-6
    }
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new()
    }
}

/// A force adjusts body velocities once per tick.
pub trait Force {
    fn apply(&mut self, bodies: &mut [Body], alpha: f64, rng: &mut Lcg);
}

/// Axis a [`PositionForce`] acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Spring toward a per-body target coordinate on one axis.
///
/// `v += (target - p) * strength * alpha`
#[derive(Debug, Clone, PartialEq)]
pub struct PositionForce {
    axis: Axis,
    targets: Vec<f64>,
    strength: f64,
}

impl PositionForce {
    #[must_use]
    pub fn new(axis: Axis, targets: Vec<f64>, strength: f64) -> Self {
        Self {
            axis,
            targets,
            strength,
        }
    }

    #[must_use]
    pub fn x(targets: Vec<f64>, strength: f64) -> Self {
        Self::new(Axis::X, targets, strength)
    }

    #[must_use]
    pub fn y(targets: Vec<f64>, strength: f64) -> Self {
        Self::new(Axis::Y, targets, strength)
    }
}

impl Force for PositionForce {
    fn apply(&mut self, bodies: &mut [Body], alpha: f64, _rng: &mut Lcg) {
        let k = self.strength * alpha;
        for (body, &target) in bodies.iter_mut().zip(&self.targets) {
            match self.axis {
                Axis::X => body.vx += (target - body.x) * k,
                Axis::Y => body.vy += (target - body.y) * k,
            }
        }
    }
}

/// Pairwise collision avoidance between circles.
///
/// Bodies are compared at their predicted positions (`p + v`). When two
/// circles overlap, they are pushed apart along the line between them, the
/// smaller circle moving more (`r_j² / (r_i² + r_j²)` of the correction goes
/// to body `i`). Each pair is visited once per iteration, lower index first.
#[derive(Debug, Clone, PartialEq)]
pub struct CollideForce {
    radii: Vec<f64>,
    strength: f64,
    iterations: usize,
}

impl CollideForce {
    /// Every body gets the same collision `radius`.
    #[must_use]
    pub fn uniform(count: usize, radius: f64) -> Self {
        Self::with_radii(vec![radius; count])
    }

    #[must_use]
    pub fn with_radii(radii: Vec<f64>) -> Self {
        Self {
            radii,
            strength: 1.0,
            iterations: 1,
        }
    }

    #[must_use]
    pub fn strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    #[must_use]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    fn pass(&self, bodies: &mut [Body], rng: &mut Lcg) {
        let n = bodies.len().min(self.radii.len());
        if n < 2 {
            return;
        }
        let max_radius = self.radii[..n].iter().copied().fold(0.0, f64::max);

        // Sweep index over predicted x, frozen for the whole pass.
        let mut order: Vec<usize> = (0..n).collect();
        let predicted: Vec<f64> = bodies[..n].iter().map(|b| b.x + b.vx).collect();
        order.sort_by(|&a, &b| predicted[a].total_cmp(&predicted[b]));
        let sorted_x: Vec<f64> = order.iter().map(|&i| predicted[i]).collect();
        let mut candidates = Vec::new();

        for i in 0..n {
            let ri = self.radii[i];
            let ri2 = ri * ri;
            let xi = bodies[i].x + bodies[i].vx;
            let yi = bodies[i].y + bodies[i].vy;

            let reach = ri + max_radius;
            let lo = sorted_x.partition_point(|&x| x < xi - reach);
            let hi = sorted_x.partition_point(|&x| x <= xi + reach);
            candidates.clear();
            candidates.extend(order[lo..hi].iter().copied().filter(|&j| j > i));
            candidates.sort_unstable();

            for &j in &candidates {
                let rj = self.radii[j];
                let r = ri + rj;
                let mut dx = xi - bodies[j].x - bodies[j].vx;
                let mut dy = yi - bodies[j].y - bodies[j].vy;
                let mut l = dx * dx + dy * dy;
                if l >= r * r {
                    continue;
                }
                if dx == 0.0 {
                    dx = rng.jiggle();
                    l += dx * dx;
                }
                if dy == 0.0 {
                    dy = rng.jiggle();
                    l += dy * dy;
                }
                let dist = l.sqrt();
                let k = (r - dist) / dist * self.strength;
                dx *= k;
                dy *= k;
                let rj2 = rj * rj;
                let share = rj2 / (ri2 + rj2);
                bodies[i].vx += dx * share;
                bodies[i].vy += dy * share;
                bodies[j].vx -= dx * (1.0 - share);
                bodies[j].vy -= dy * (1.0 - share);
            }
        }
    }
}

impl Force for CollideForce {
    fn apply(&mut self, bodies: &mut [Body], _alpha: f64, rng: &mut Lcg) {
        for _ in 0..self.iterations {
            self.pass(bodies, rng);
        }
    }
}

/// Cooling schedule and integration parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub alpha: f64,
    pub alpha_min: f64,
    pub alpha_decay: f64,
    pub alpha_target: f64,
    /// Fraction of velocity kept each tick.
    pub velocity_decay: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let alpha_min: f64 = 0.001;
        Self {
            alpha: 1.0,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            alpha_target: 0.0,
            velocity_decay: 0.6,
        }
    }
}

/// A set of bodies relaxed by forces.
pub struct Simulation {
    bodies: Vec<Body>,
    forces: Vec<Box<dyn Force>>,
    config: SimulationConfig,
    alpha: f64,
    ticks: usize,
    rng: Lcg,
}

impl Simulation {
    #[must_use]
    pub fn new(bodies: Vec<Body>) -> Self {
        Self::with_config(bodies, SimulationConfig::default())
    }

    #[must_use]
    pub fn with_config(bodies: Vec<Body>, config: SimulationConfig) -> Self {
        Self {
            bodies,
            forces: Vec::new(),
            alpha: config.alpha,
            config,
            ticks: 0,
            rng: Lcg::new(),
        }
    }

    /// Register a force; forces run in registration order.
    #[must_use]
    pub fn force(mut self, force: impl Force + 'static) -> Self {
        self.forces.push(Box::new(force));
        self
    }

    /// Advance one tick.
    pub fn tick(&mut self) {
        self.alpha += (self.config.alpha_target - self.alpha) * self.config.alpha_decay;
        for force in &mut self.forces {
            force.apply(&mut self.bodies, self.alpha, &mut self.rng);
        }
        let decay = self.config.velocity_decay;
        for body in &mut self.bodies {
            body.vx *= decay;
            body.x += body.vx;
            body.vy *= decay;
            body.y += body.vy;
        }
        self.ticks += 1;
    }

    /// Advance a fixed number of ticks, regardless of `alpha_min`.
    pub fn tick_n(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Whether `alpha` has cooled below `alpha_min`.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.alpha < self.config.alpha_min
    }

    #[must_use]
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    #[must_use]
    pub fn into_bodies(self) -> Vec<Body> {
        self.bodies
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("bodies", &self.bodies.len())
            .field("forces", &self.forces.len())
            .field("alpha", &self.alpha)
            .field("ticks", &self.ticks)
            .finish()
    }
}
