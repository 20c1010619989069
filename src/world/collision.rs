//! Actor-versus-shape intersection tests
//!
//! The actor is always a circle. Touching counts as a miss: every test uses
//! a strict comparison on squared distances.

use glam::Vec2;

use super::shape::Geometry;

/// Two circles overlap iff the distance between centers is strictly less
/// than the sum of radii
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) < reach * reach
}

/// Closest point on (or inside) an axis-aligned rectangle to `p`
#[inline]
pub fn nearest_point_on_rect(p: Vec2, min: Vec2, size: Vec2) -> Vec2 {
    p.max(min).min(min + size)
}

/// Circle overlaps a rectangle iff the nearest rectangle point lies
/// strictly inside the circle
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, min: Vec2, size: Vec2) -> bool {
    let nearest = nearest_point_on_rect(center, min, size);
    center.distance_squared(nearest) < radius * radius
}

/// Check whether an actor circle at `center` intersects `geometry`
pub fn actor_overlaps(geometry: &Geometry, center: Vec2, radius: f32) -> bool {
    match *geometry {
        Geometry::Rectangle { min, size } => circle_rect_overlap(center, radius, min, size),
        Geometry::Circle {
            center: other,
            radius: other_radius,
        } => circles_overlap(center, radius, other, other_radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_circles_touching_do_not_overlap() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(15.0, 0.0);
        assert!(!circles_overlap(a, 5.0, b, 10.0));
        assert!(circles_overlap(a, 5.0, Vec2::new(14.9, 0.0), 10.0));
    }

    #[test]
    fn test_concentric_circles_overlap() {
        let c = Vec2::new(100.0, 100.0);
        assert!(circles_overlap(c, 5.0, c, 10.0));
    }

    #[test]
    fn test_nearest_point_clamps_to_bounds() {
        let min = Vec2::new(0.0, 0.0);
        let size = Vec2::new(32.0, 32.0);
        // Inside: the point itself
        assert_eq!(nearest_point_on_rect(Vec2::new(16.0, 16.0), min, size), Vec2::new(16.0, 16.0));
        // Left of the box
        assert_eq!(nearest_point_on_rect(Vec2::new(-5.0, 10.0), min, size), Vec2::new(0.0, 10.0));
        // Beyond the far corner
        assert_eq!(nearest_point_on_rect(Vec2::new(40.0, 50.0), min, size), Vec2::new(32.0, 32.0));
    }

    #[test]
    fn test_circle_rect_center_inside() {
        let min = Vec2::ZERO;
        let size = Vec2::new(32.0, 32.0);
        assert!(circle_rect_overlap(Vec2::new(16.0, 16.0), 5.0, min, size));
    }

    #[test]
    fn test_circle_rect_corner_distance_is_a_miss() {
        let min = Vec2::ZERO;
        let size = Vec2::new(10.0, 10.0);
        // Corner (10, 10), center (13, 14): distance exactly 5
        assert!(!circle_rect_overlap(Vec2::new(13.0, 14.0), 5.0, min, size));
        assert!(circle_rect_overlap(Vec2::new(13.0, 14.0), 5.01, min, size));
    }

    #[test]
    fn test_circle_rect_edge_touch_is_a_miss() {
        let min = Vec2::ZERO;
        let size = Vec2::new(32.0, 32.0);
        assert!(!circle_rect_overlap(Vec2::new(40.0, 16.0), 8.0, min, size));
        assert!(circle_rect_overlap(Vec2::new(39.0, 16.0), 8.0, min, size));
    }

    #[test]
    fn test_actor_overlaps_dispatch() {
        let rect = Geometry::rect(0.0, 0.0, 32.0, 32.0);
        let circle = Geometry::circle(100.0, 100.0, 10.0);
        assert!(actor_overlaps(&rect, Vec2::new(16.0, 16.0), 5.0));
        assert!(!actor_overlaps(&rect, Vec2::new(100.0, 100.0), 5.0));
        assert!(actor_overlaps(&circle, Vec2::new(100.0, 100.0), 5.0));
        assert!(!actor_overlaps(&circle, Vec2::new(16.0, 16.0), 5.0));
    }

    proptest! {
        #[test]
        fn prop_touching_circles_never_overlap(
            x in -500i32..500,
            y in -500i32..500,
            r1 in 1i32..50,
            r2 in 1i32..50,
            horizontal in any::<bool>(),
        ) {
            let a = Vec2::new(x as f32, y as f32);
            let gap = (r1 + r2) as f32;
            let b = if horizontal { a + Vec2::new(gap, 0.0) } else { a + Vec2::new(0.0, gap) };
            prop_assert!(!circles_overlap(a, r1 as f32, b, r2 as f32));
            prop_assert!(!circles_overlap(b, r2 as f32, a, r1 as f32));
        }

        #[test]
        fn prop_circle_overlap_is_symmetric(
            ax in -200.0f32..200.0, ay in -200.0f32..200.0,
            bx in -200.0f32..200.0, by in -200.0f32..200.0,
            r1 in 0.5f32..60.0, r2 in 0.5f32..60.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, r1, b, r2), circles_overlap(b, r2, a, r1));
        }

        #[test]
        fn prop_center_inside_rect_always_overlaps(
            x in -100.0f32..100.0, y in -100.0f32..100.0,
            w in 1.0f32..80.0, h in 1.0f32..80.0,
            tx in 0.0f32..=1.0, ty in 0.0f32..=1.0,
            r in 0.1f32..20.0,
        ) {
            let min = Vec2::new(x, y);
            let size = Vec2::new(w, h);
            let center = min + size * Vec2::new(tx, ty);
            let inside = nearest_point_on_rect(center, min, size);
            // Clamping a point that is already inside is the identity
            prop_assume!(inside == center);
            prop_assert!(circle_rect_overlap(center, r, min, size));
        }

        #[test]
        fn prop_circle_clear_of_rect_misses(
            x in -100i32..100, y in -100i32..100,
            w in 1i32..80, h in 1i32..80,
            r in 1i32..20, gap in 0i32..20,
        ) {
            let min = Vec2::new(x as f32, y as f32);
            let size = Vec2::new(w as f32, h as f32);
            // Directly right of the box, at least radius away from its edge
            let center = Vec2::new((x + w + r + gap) as f32, (y + h / 2) as f32);
            prop_assert!(!circle_rect_overlap(center, r as f32, min, size));
        }
    }
}
