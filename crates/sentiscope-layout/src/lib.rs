#![forbid(unsafe_code)]

//! Scatter layout for Sentiscope.
//!
//! # Role in Sentiscope
//! `sentiscope-layout` turns a post collection into plot positions. Posts are
//! grouped into horizontal month bands, spread horizontally by
//! `Dimension 1`, and then decluttered by a bounded force relaxation so
//! circles do not overlap.
//!
//! # This crate provides
//! - [`LinearScale`] with a safe degenerate-domain case.
//! - [`MonthBands`] for the first-seen month ordering and vertical slots.
//! - [`force`] primitives: [`Simulation`], [`PositionForce`], [`CollideForce`].
//! - [`compute_layout`], which combines them into a [`Layout`].
//!
//! # Invariants
//! - Only the posts influence the layout; the coloring metric and the
//!   selection never reach this crate.
//! - The same posts in the same order always produce the same layout.
//! - A post with nothing to collide with ends exactly on its target.

pub mod bands;
pub mod force;
pub mod scale;

use serde::Serialize;
use sentiscope_core::Post;

pub use bands::{Band, MonthBands};
pub use force::{Body, CollideForce, Force, PositionForce, Simulation, SimulationConfig};
pub use scale::LinearScale;

/// Geometry and relaxation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Width of the plot area (excluding margins).
    pub plot_width: f64,
    /// Height of the plot area (excluding margins).
    pub plot_height: f64,
    pub circle_radius: f64,
    /// Extra clearance added to the circle radius for collisions.
    pub collision_padding: f64,
    /// Number of relaxation ticks.
    pub iterations: usize,
    pub x_strength: f64,
    pub y_strength: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            plot_width: 1100.0,
            plot_height: 640.0,
            circle_radius: 4.0,
            collision_padding: 2.0,
            iterations: 300,
            x_strength: 0.5,
            y_strength: 0.5,
        }
    }
}

impl LayoutConfig {
    /// Radius used for collision checks.
    #[must_use]
    pub fn collision_radius(&self) -> f64 {
        self.circle_radius + self.collision_padding
    }
}

/// A point in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Where one post wanted to be and where it settled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedPoint {
    pub target: Point,
    pub position: Point,
}

/// Positions for a post collection, in the collection's order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub points: Vec<PlacedPoint>,
    pub bands: MonthBands,
    pub x_scale: LinearScale,
}

impl Layout {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Final position of the post at `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<Point> {
        self.points.get(index).map(|p| p.position)
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(|p| p.position)
    }

    /// Smallest distance between any two final positions.
    #[must_use]
    pub fn min_pair_distance(&self) -> Option<f64> {
        let mut best: Option<f64> = None;
        for (i, a) in self.points.iter().enumerate() {
            for b in &self.points[i + 1..] {
                let d = a.position.distance(b.position);
                best = Some(best.map_or(d, |m| m.min(d)));
            }
        }
        best
    }
}

/// Lay out `posts` inside the configured plot area.
///
/// Steps: month bands give each post a target `y`, a linear scale over the
/// observed `Dimension 1` extent gives a target `x`, and a relaxation pass
/// starting at the targets pulls toward them while pushing overlapping
/// circles apart.
#[must_use]
pub fn compute_layout(posts: &[Post], config: &LayoutConfig) -> Layout {
    let _span = tracing::debug_span!(
        "compute_layout",
        posts = posts.len(),
        iterations = config.iterations
    )
    .entered();

    let bands = MonthBands::new(posts.iter().map(Post::month), config.plot_height);
    let x_scale = LinearScale::from_extent(
        posts.iter().map(Post::dimension1),
        (0.0, config.plot_width),
    );

    let targets: Vec<Point> = posts
        .iter()
        .map(|post| {
            // Every month has a band by construction.
            let y = bands.target_y(post.month()).unwrap_or_default();
            Point::new(x_scale.apply(post.dimension1()), y)
        })
        .collect();

    let bodies = targets.iter().map(|t| Body::at(t.x, t.y)).collect();
    let mut simulation = Simulation::new(bodies)
        .force(PositionForce::x(
            targets.iter().map(|t| t.x).collect(),
            config.x_strength,
        ))
        .force(PositionForce::y(
            targets.iter().map(|t| t.y).collect(),
            config.y_strength,
        ))
        .force(CollideForce::uniform(targets.len(), config.collision_radius()));
    simulation.tick_n(config.iterations);

    let points = targets
        .into_iter()
        .zip(simulation.into_bodies())
        .map(|(target, body)| PlacedPoint {
            target,
            position: Point::new(body.x, body.y),
        })
        .collect();

    tracing::debug!(bands = bands.len(), degenerate_x = x_scale.is_degenerate(), "layout computed");

    Layout {
        points,
        bands,
        x_scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiscope_core::post::PostRecord;

    fn post(idx: i64, month: &str, d1: f64) -> Post {
        Post::from(PostRecord::new(idx, "b'x'", month).dimensions(d1, 0.0))
    }

    #[test]
    fn single_post_settles_on_target() {
        let layout = compute_layout(&[post(1, "Jan", 0.3)], &LayoutConfig::default());
        let placed = layout.points[0];
        assert_eq!(placed.position, placed.target);
        // Degenerate extent: middle of the plot, first band slot.
        assert_eq!(placed.target.x, 550.0);
        assert!((placed.target.y - 640.0 / 3.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn empty_collection_is_empty_layout() {
        let layout = compute_layout(&[], &LayoutConfig::default());
        assert!(layout.is_empty());
        assert!(layout.bands.is_empty());
        assert_eq!(layout.min_pair_distance(), None);
    }

    #[test]
    fn near_identical_posts_are_separated() {
        let config = LayoutConfig::default();
        let posts = [post(1, "Jan", 0.5), post(2, "Jan", 0.5000001), post(3, "Jan", 10.0)];
        let layout = compute_layout(&posts, &config);
        let d = layout.points[0].position.distance(layout.points[1].position);
        assert!(d >= config.collision_radius(), "distance {d}");
    }

    #[test]
    fn equal_dimension_values_share_target_x() {
        let posts = [post(1, "Jan", 2.0), post(2, "Feb", 2.0), post(3, "Mar", 2.0)];
        let layout = compute_layout(&posts, &LayoutConfig::default());
        assert!(layout.x_scale.is_degenerate());
        for placed in &layout.points {
            assert_eq!(placed.target.x, 550.0);
            assert!(placed.position.x.is_finite());
        }
    }

    #[test]
    fn extreme_dimension_values_stay_finite() {
        let posts = [post(1, "Jan", -1e308), post(2, "Jan", 1e308), post(3, "Jan", 0.0)];
        let layout = compute_layout(&posts, &LayoutConfig::default());
        let xs: Vec<f64> = layout.points.iter().map(|p| p.target.x).collect();
        assert_eq!(xs, vec![0.0, 1100.0, 550.0]);
        for placed in &layout.points {
            assert!(placed.position.x.is_finite() && placed.position.y.is_finite());
        }
    }

    #[test]
    fn zero_iterations_leaves_posts_on_targets() {
        let config = LayoutConfig {
            iterations: 0,
            ..LayoutConfig::default()
        };
        let posts = [post(1, "Jan", 0.0), post(2, "Jan", 0.0)];
        let layout = compute_layout(&posts, &config);
        for placed in &layout.points {
            assert_eq!(placed.position, placed.target);
        }
    }

    #[test]
    fn layout_serializes_points_and_bands() {
        let layout = compute_layout(&[post(1, "Jan", 1.0)], &LayoutConfig::default());
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["bands"]["bands"][0]["label"], "Jan");
        assert!(json["points"][0]["position"]["x"].is_number());
    }
}
