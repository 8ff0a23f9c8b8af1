use rand::prelude::*;

use crate::geometry::{Point, Rect};
use crate::spatial::Quadtree;
use crate::utils::LayoutError;

fn boundary() -> Rect {
    Rect::new(0.0, 0.0, 100.0, 100.0)
}

#[test]
fn test_rejects_malformed_boundary() {
    assert!(matches!(
        Quadtree::<u32>::new(Rect::new(0.0, 0.0, 0.0, 10.0), 4),
        Err(LayoutError::InvalidBoundary)
    ));
    assert!(matches!(
        Quadtree::<u32>::new(Rect::new(0.0, 0.0, 10.0, -1.0), 4),
        Err(LayoutError::InvalidBoundary)
    ));
    assert!(matches!(
        Quadtree::<u32>::new(Rect::new(0.0, 0.0, f64::NAN, 10.0), 4),
        Err(LayoutError::InvalidBoundary)
    ));
}

#[test]
fn test_rejects_zero_capacity() {
    assert!(matches!(
        Quadtree::<u32>::new(boundary(), 0),
        Err(LayoutError::InvalidCapacity)
    ));
}

#[test]
fn test_insert_inside_returns_true_and_is_retrievable() {
    let mut tree = Quadtree::new(boundary(), 4).unwrap();
    let p = Point::new(25.0, 75.0);
    assert!(tree.insert(p, "payload"));
    assert_eq!(tree.len(), 1);

    let all = tree.entries();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].0, p);
    assert_eq!(*all[0].1, "payload");

    let hits = tree.query(&boundary());
    assert_eq!(hits.len(), 1);
}

#[test]
fn test_insert_outside_returns_false_without_mutation() {
    let mut tree = Quadtree::new(boundary(), 4).unwrap();
    tree.insert(Point::new(50.0, 50.0), 0_u32);
    assert!(!tree.insert(Point::new(150.0, 50.0), 1));
    assert!(!tree.insert(Point::new(-0.1, 50.0), 2));
    assert!(!tree.insert(Point::new(100.0, 50.0), 3)); // far edge is exclusive
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_subdivision_does_not_lose_entries() {
    // Capacity 4, five inserts: the induced subdivision must keep all five.
    let mut tree = Quadtree::new(boundary(), 4).unwrap();
    let points = [
        Point::new(10.0, 10.0),
        Point::new(90.0, 10.0),
        Point::new(10.0, 90.0),
        Point::new(90.0, 90.0),
        Point::new(50.0, 50.0),
    ];
    for (i, p) in points.iter().enumerate() {
        assert!(tree.insert(*p, i));
    }
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.entries().len(), 5);
    assert_eq!(tree.query(&boundary()).len(), 5);
}

#[test]
fn test_query_returns_only_entries_in_range() {
    let mut tree = Quadtree::new(boundary(), 2).unwrap();
    tree.insert(Point::new(10.0, 10.0), "nw");
    tree.insert(Point::new(90.0, 10.0), "ne");
    tree.insert(Point::new(10.0, 90.0), "sw");
    tree.insert(Point::new(90.0, 90.0), "se");

    let hits = tree.query(&Rect::new(0.0, 0.0, 50.0, 50.0));
    assert_eq!(hits.len(), 1);
    assert_eq!(*hits[0].1, "nw");

    let hits = tree.query(&Rect::new(60.0, 0.0, 40.0, 100.0));
    assert_eq!(hits.len(), 2);

    let hits = tree.query(&Rect::new(40.0, 40.0, 5.0, 5.0));
    assert!(hits.is_empty());
}

#[test]
fn test_query_radius_exact_distance_check() {
    let mut tree = Quadtree::new(boundary(), 4).unwrap();
    tree.insert(Point::new(50.0, 50.0), "center");
    tree.insert(Point::new(53.0, 54.0), "inside"); // distance 5
    // Inside the circumscribing square of a radius-6 circle, but at
    // distance ~7.07 from the center: a bounding-box false positive.
    tree.insert(Point::new(55.0, 55.0), "corner");
    tree.insert(Point::new(90.0, 90.0), "far");

    let hits = tree.query_radius(Point::new(50.0, 50.0), 6.0);
    let mut names: Vec<&str> = hits.iter().map(|(_, v)| **v).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["center", "inside"]);
}

#[test]
fn test_query_radius_boundary_is_inclusive() {
    let mut tree = Quadtree::new(boundary(), 4).unwrap();
    tree.insert(Point::new(60.0, 50.0), "on-circle");
    let hits = tree.query_radius(Point::new(50.0, 50.0), 10.0);
    assert_eq!(hits.len(), 1);
}

#[test]
fn test_query_radius_negative_radius_is_empty() {
    let mut tree = Quadtree::new(boundary(), 4).unwrap();
    tree.insert(Point::new(50.0, 50.0), ());
    assert!(tree.query_radius(Point::new(50.0, 50.0), -1.0).is_empty());
}

#[test]
fn test_clear_resets_to_empty_leaf() {
    let mut tree = Quadtree::new(boundary(), 2).unwrap();
    for i in 0..20 {
        tree.insert(Point::new(i as f64 * 4.0, i as f64 * 4.0), i);
    }
    assert_eq!(tree.len(), 20);
    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.entries().is_empty());
    // The original boundary survives the reset.
    assert!(tree.insert(Point::new(99.0, 99.0), 0));
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_coincident_points_do_not_recurse_unboundedly() {
    let mut tree = Quadtree::new(boundary(), 1).unwrap();
    for i in 0..50 {
        assert!(tree.insert(Point::new(42.0, 42.0), i));
    }
    assert_eq!(tree.len(), 50);
    assert_eq!(tree.query_radius(Point::new(42.0, 42.0), 0.5).len(), 50);
}

#[test]
fn test_randomized_inserts_are_all_retrievable() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut tree = Quadtree::new(boundary(), 4).unwrap();
    let mut points = Vec::new();
    for i in 0..500 {
        let p = Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
        assert!(tree.insert(p, i), "point {:?} should be inside", p);
        points.push(p);
    }
    assert_eq!(tree.len(), 500);
    assert_eq!(tree.entries().len(), 500);
    assert_eq!(tree.query(&boundary()).len(), 500);

    // Range queries agree with a brute-force filter.
    let range = Rect::new(20.0, 30.0, 35.0, 25.0);
    let expected = points.iter().filter(|p| range.contains(**p)).count();
    assert_eq!(tree.query(&range).len(), expected);

    // Radius queries agree with a brute-force filter.
    let center = Point::new(50.0, 50.0);
    let radius = 22.5;
    let expected = points
        .iter()
        .filter(|p| p.distance_sq_to(center) <= radius * radius)
        .count();
    assert_eq!(tree.query_radius(center, radius).len(), expected);
}
