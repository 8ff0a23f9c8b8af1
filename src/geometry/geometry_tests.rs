use crate::assert_float_eq;
use crate::geometry::{Point, Rect};

#[test]
fn test_contains_half_open_edges() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    // Minimum edges are inclusive.
    assert!(rect.contains(Point::new(0.0, 0.0)));
    assert!(rect.contains(Point::new(0.0, 5.0)));
    assert!(rect.contains(Point::new(5.0, 0.0)));
    // Maximum edges are exclusive.
    assert!(!rect.contains(Point::new(10.0, 5.0)));
    assert!(!rect.contains(Point::new(5.0, 10.0)));
    assert!(!rect.contains(Point::new(10.0, 10.0)));
}

#[test]
fn test_contains_rejects_outside_points() {
    let rect = Rect::new(-5.0, -5.0, 10.0, 10.0);
    assert!(!rect.contains(Point::new(-5.1, 0.0)));
    assert!(!rect.contains(Point::new(0.0, 7.0)));
    assert!(rect.contains(Point::new(-5.0, -5.0)));
}

#[test]
fn test_subdivide_partitions_without_overlap() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    let (nw, ne, sw, se) = rect.subdivide();

    assert_float_eq(nw.width, 50.0, 1e-9, None);
    assert_float_eq(nw.height, 50.0, 1e-9, None);
    assert_float_eq(ne.x, 50.0, 1e-9, None);
    assert_float_eq(sw.y, 50.0, 1e-9, None);
    assert_float_eq(se.x, 50.0, 1e-9, None);
    assert_float_eq(se.y, 50.0, 1e-9, None);

    // Every interior point lands in exactly one quadrant.
    let samples = [
        Point::new(10.0, 10.0),
        Point::new(50.0, 50.0),
        Point::new(49.999, 50.0),
        Point::new(50.0, 49.999),
        Point::new(99.9, 0.0),
    ];
    for p in samples {
        let hits = [nw, ne, sw, se].iter().filter(|q| q.contains(p)).count();
        assert_eq!(hits, 1, "point {:?} should land in exactly one quadrant", p);
    }
}

#[test]
fn test_split_line_follows_half_open_rule() {
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    let (nw, ne, sw, se) = rect.subdivide();
    // A point exactly on the vertical split belongs to the high-side child.
    assert!(ne.contains(Point::new(50.0, 10.0)));
    assert!(!nw.contains(Point::new(50.0, 10.0)));
    // Same on the horizontal split.
    assert!(sw.contains(Point::new(10.0, 50.0)));
    assert!(se.contains(Point::new(50.0, 50.0)));
}

#[test]
fn test_intersects_overlapping_and_disjoint() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    let c = Rect::new(20.0, 20.0, 5.0, 5.0);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
    assert!(!a.intersects(&c));
}

#[test]
fn test_intersects_touching_edges_counts() {
    // Pruning must not drop a subtree that merely touches the query range.
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 10.0, 10.0);
    assert!(a.intersects(&b));
}

#[test]
fn test_max_extent() {
    let rect = Rect::new(0.0, 0.0, 30.0, 70.0);
    assert_float_eq(rect.max_extent(), 70.0, 1e-12, None);
}

#[test]
fn test_point_distances() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(4.0, 6.0);
    assert_float_eq(a.distance_sq_to(b), 25.0, 1e-12, None);
    assert_float_eq(a.distance_to(b), 5.0, 1e-12, None);
    assert_float_eq(a.distance_to(a), 0.0, 1e-12, None);
}
