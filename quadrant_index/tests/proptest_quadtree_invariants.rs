// Copyright 2025 the Quadrant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-based invariant tests for the quadtree and the geocoder.
//!
//! These tests verify invariants that must hold for any valid inputs:
//!
//! 1. Every inserted point is found by `contains`.
//! 2. `query_range` returns exactly the inserted points inside the query box.
//! 3. Splitting past `max_points` keeps every point reachable.
//! 4. Leaves at the depth ceiling overflow instead of splitting.
//! 5. The geohash is deterministic and restartable.
//! 6. Out-of-bounds inserts fail and leave the size unchanged.
//! 7. The tree's quadrant path for a point matches its geohash.

use proptest::prelude::*;
use quadrant_index::{BBox, Error, Point, QuadTree, QuadTreeConfig, Quadrant, geohash};

// ── Helpers ─────────────────────────────────────────────────────────────

const WORLD: BBox<f64> = BBox::new(0.0, 100.0, 0.0, 100.0);

fn point_strategy() -> impl Strategy<Value = Point<f64>> {
    (0.0..100.0_f64, 0.0..100.0_f64).prop_map(|(x, y)| Point::new(x, y))
}

/// Points snapped to a coarse grid so that duplicates and shared edges are common.
fn grid_point_strategy() -> impl Strategy<Value = Point<f64>> {
    (0..20_u32, 0..20_u32).prop_map(|(x, y)| Point::new(f64::from(x) * 5.0, f64::from(y) * 5.0))
}

fn query_strategy() -> impl Strategy<Value = BBox<f64>> {
    (-10.0..110.0_f64, -10.0..110.0_f64, -10.0..110.0_f64, -10.0..110.0_f64).prop_map(
        |(a, b, c, d)| BBox::new(a.min(b), a.max(b), c.min(d), c.max(d)),
    )
}

fn config_strategy() -> impl Strategy<Value = QuadTreeConfig> {
    (1_usize..6, 0_usize..12).prop_map(|(p, d)| QuadTreeConfig::new(p, d))
}

fn build(config: QuadTreeConfig, points: &[Point<f64>]) -> QuadTree {
    let mut tree = QuadTree::with_config(WORLD, config);
    for &p in points {
        tree.insert(p).expect("generated points are inside the world box");
    }
    tree
}

fn sorted(mut v: Vec<Point<f64>>) -> Vec<Point<f64>> {
    v.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    v
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Every inserted point is found
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn inserted_points_are_contained(
        config in config_strategy(),
        points in prop::collection::vec(point_strategy(), 0..200),
    ) {
        let tree = build(config, &points);
        prop_assert_eq!(tree.len(), points.len());
        for p in &points {
            prop_assert!(tree.contains(*p), "{:?} missing from {:?}", p, tree);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Range query equals a brute-force filter
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn query_range_matches_brute_force(
        config in config_strategy(),
        points in prop::collection::vec(grid_point_strategy(), 0..200),
        query in query_strategy(),
    ) {
        let tree = build(config, &points);
        let expected: Vec<_> = points.iter().copied().filter(|p| query.contains(*p)).collect();
        let got = tree.query_range(query);
        prop_assert_eq!(sorted(got.clone()), sorted(expected));
        prop_assert_eq!(got, tree.query_range(query), "query order is not stable");
    }
}

proptest! {
    #[test]
    fn whole_world_query_returns_everything(
        points in prop::collection::vec(point_strategy(), 0..100),
    ) {
        let tree = build(QuadTreeConfig::new(3, 20), &points);
        prop_assert_eq!(tree.query_range(WORLD).len(), points.len());
        prop_assert_eq!(tree.iter().count(), points.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Splitting keeps every point reachable
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn split_preserves_membership(
        max_points in 1_usize..8,
        seed in prop::collection::vec(point_strategy(), 9),
    ) {
        let points = &seed[..=max_points];
        let tree = build(QuadTreeConfig::new(max_points, 50), points);
        prop_assert!(tree.height() >= 1, "root did not split");
        for p in points {
            prop_assert!(tree.contains(*p));
        }
        prop_assert_eq!(tree.query_range(WORLD).len(), max_points + 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Depth ceiling overflow
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn depth_ceiling_overflows(
        max_depth in 0_usize..6,
        offsets in prop::collection::vec((0.0..1.0_f64, 0.0..1.0_f64), 3..40),
    ) {
        // All points share one cell at every depth up to 5.
        let points: Vec<_> = offsets
            .iter()
            .map(|&(dx, dy)| Point::new(10.0 + dx, 10.0 + dy))
            .collect();
        let tree = build(QuadTreeConfig::new(2, max_depth), &points);
        prop_assert!(tree.height() <= max_depth);
        prop_assert_eq!(tree.len(), points.len());
        for p in &points {
            prop_assert!(tree.contains(*p));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Geohash determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn geohash_is_restartable(p in point_strategy(), n in 1_usize..40) {
        let a: Vec<_> = geohash(WORLD, p).unwrap().take(n).collect();
        let b: Vec<_> = geohash(WORLD, p).unwrap().take(n).collect();
        prop_assert_eq!(a, b);
    }
}

proptest! {
    #[test]
    fn geohash_first_level_separates_quadrants(a in point_strategy(), b in point_strategy()) {
        let qa = WORLD.quadrant_of(a);
        let qb = WORLD.quadrant_of(b);
        let ha = geohash(WORLD, a).unwrap().next().unwrap().unwrap();
        let hb = geohash(WORLD, b).unwrap().next().unwrap().unwrap();
        prop_assert_eq!(ha, qa);
        prop_assert_eq!(qa != qb, ha != hb);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Out-of-bounds rejection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn out_of_bounds_insert_is_rejected(
        points in prop::collection::vec(point_strategy(), 0..20),
        x in 100.0..1e6_f64,
        y in -1e6..1e6_f64,
    ) {
        let mut tree = build(QuadTreeConfig::default(), &points);
        let before = tree.len();
        prop_assert_eq!(tree.insert(Point::new(x, y)), Err(Error::OutOfBounds));
        prop_assert_eq!(tree.insert(Point::new(y, x)), Err(Error::OutOfBounds));
        prop_assert_eq!(tree.len(), before);
        prop_assert_eq!(tree.iter().count(), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Tree subdivision agrees with the geohash
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn geohash_cell_contains_point(p in point_strategy(), n in 1_usize..30) {
        let mut hash = geohash(WORLD, p).unwrap();
        let mut cell = WORLD;
        for _ in 0..n {
            let q: Quadrant = hash.next().unwrap().unwrap();
            cell = cell.quadrant(q);
            prop_assert!(cell.contains(p));
        }
        prop_assert_eq!(cell, hash.cell());
    }
}
