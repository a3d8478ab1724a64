//! Property-based invariants for `compute_layout`.
//!
//! 1. Identical input produces identical output.
//! 2. Every position is finite, whatever the inputs.
//! 3. A lone post settles exactly on its target.
//! 4. Targets stay inside the plot area.
//! 5. Two posts competing for the same spot end at least a collision radius apart.

use proptest::prelude::*;
use sentiscope_core::Post;
use sentiscope_core::post::PostRecord;
use sentiscope_layout::{LayoutConfig, compute_layout};

fn post(idx: i64, month: &str, d1: f64) -> Post {
    Post::from(PostRecord::new(idx, "b'p'", month).dimensions(d1, 0.0))
}

fn posts_strategy() -> impl Strategy<Value = Vec<Post>> {
    prop::collection::vec((0usize..4, -50.0f64..50.0), 0..24).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (month, d1))| post(i as i64, ["Jan", "Feb", "Mar", "Apr"][month], d1))
            .collect()
    })
}

fn fast_config() -> LayoutConfig {
    LayoutConfig {
        iterations: 120,
        ..LayoutConfig::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn layout_is_deterministic(posts in posts_strategy()) {
        let config = fast_config();
        prop_assert_eq!(compute_layout(&posts, &config), compute_layout(&posts, &config));
    }

    #[test]
    fn positions_are_finite(posts in posts_strategy()) {
        let layout = compute_layout(&posts, &fast_config());
        prop_assert_eq!(layout.len(), posts.len());
        for p in layout.positions() {
            prop_assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn lone_post_sits_on_target(d1 in -1e6f64..1e6, month in "[A-Z][a-z]{2}") {
        let layout = compute_layout(&[post(0, &month, d1)], &LayoutConfig::default());
        let placed = layout.points[0];
        prop_assert_eq!(placed.position, placed.target);
    }

    #[test]
    fn targets_inside_plot_area(posts in posts_strategy()) {
        let config = fast_config();
        let layout = compute_layout(&posts, &config);
        for placed in &layout.points {
            prop_assert!((0.0..=config.plot_width).contains(&placed.target.x));
            prop_assert!((0.0..=config.plot_height).contains(&placed.target.y));
        }
    }

    #[test]
    fn crowded_pair_is_separated(d1 in 0.0f64..1.0, nudge in 0.0f64..1e-3) {
        let config = LayoutConfig::default();
        let posts = [
            post(0, "Jan", d1),
            post(1, "Jan", d1 + nudge),
            post(2, "Feb", -100.0),
            post(3, "Feb", 100.0),
        ];
        let layout = compute_layout(&posts, &config);
        let d = layout.points[0].position.distance(layout.points[1].position);
        prop_assert!(d >= config.collision_radius(), "distance {}", d);
    }
}
