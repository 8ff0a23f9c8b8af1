use std::collections::HashMap;

use log::warn;
use rayon::prelude::*;

use crate::geometry::{Point, Rect};
use crate::utils::{LayoutError, DEFAULT_THETA, DIST_EPSILON, MAX_DEPTH};

// Classic Barnes-Hut: one body per leaf. Leaves only grow past this at
// MAX_DEPTH, where coincident bodies would otherwise subdivide forever.
const LEAF_CAPACITY: usize = 1;

/// A point mass in the layout: one graph node's position and weight.
///
/// Mass is expected to be positive in normal use; a zero-mass body is
/// degenerate but legal and simply contributes nothing to any force.
///
/// # Examples
///
/// ```
/// use layout_repulsion::spatial::Body;
///
/// let body = Body::new(7, 120.0, 80.0, 2.5);
/// assert_eq!(body.id, 7);
/// assert_eq!(body.position().x, 120.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub mass: f64,
}

impl Body {
    pub fn new(id: u64, x: f64, y: f64, mass: f64) -> Self {
        Body { id, x, y, mass }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone)]
struct BhNode {
    boundary: Rect,
    depth: usize,
    total_mass: f64,
    center_of_mass: Point,
    body_count: usize,
    bodies: Vec<Body>,
    children: Option<Box<[BhNode; 4]>>,
}

impl BhNode {
    fn new(boundary: Rect, depth: usize) -> Self {
        BhNode {
            boundary,
            depth,
            total_mass: 0.0,
            center_of_mass: Point::new(0.0, 0.0),
            body_count: 0,
            bodies: Vec::new(),
            children: None,
        }
    }

    // Precondition: self.boundary.contains(body.position()).
    fn insert_contained(&mut self, body: Body) {
        // Incremental aggregate update along the insertion path:
        // new_com = (old_com * old_mass + pos * mass) / (old_mass + mass).
        let new_mass = self.total_mass + body.mass;
        if new_mass > 0.0 {
            self.center_of_mass = Point::new(
                (self.center_of_mass.x * self.total_mass + body.x * body.mass) / new_mass,
                (self.center_of_mass.y * self.total_mass + body.y * body.mass) / new_mass,
            );
        } else if self.body_count == 0 {
            // Massless first body: keep the single-body invariant that the
            // center of mass equals that body's position.
            self.center_of_mass = body.position();
        }
        self.total_mass = new_mass;
        self.body_count += 1;

        if self.children.is_none() {
            if self.bodies.len() < LEAF_CAPACITY || self.depth >= MAX_DEPTH {
                self.bodies.push(body);
                return;
            }
            self.subdivide();
        }
        self.insert_into_child(body);
    }

    fn insert_into_child(&mut self, body: Body) {
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if child.boundary.contains(body.position()) {
                    child.insert_contained(body);
                    return;
                }
            }
        }
        // Rounding at the far quadrant edge can leave a contained body
        // unclaimed by every child; keep it on this node. The aggregates
        // above already account for it.
        self.bodies.push(body);
    }

    fn subdivide(&mut self) {
        let (nw, ne, sw, se) = self.boundary.subdivide();
        let depth = self.depth + 1;
        self.children = Some(Box::new([
            BhNode::new(nw, depth),
            BhNode::new(ne, depth),
            BhNode::new(sw, depth),
            BhNode::new(se, depth),
        ]));
        let held = std::mem::take(&mut self.bodies);
        for body in held {
            self.insert_into_child(body);
        }
    }

    fn force_on(&self, body: &Body, theta: f64, strength: f64) -> (f64, f64) {
        if self.body_count == 0 || self.total_mass == 0.0 {
            return (0.0, 0.0);
        }
        match &self.children {
            None => self.direct_sum(body, strength),
            Some(children) => {
                let dx = body.x - self.center_of_mass.x;
                let dy = body.y - self.center_of_mass.y;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq > DIST_EPSILON {
                    let dist = dist_sq.sqrt();
                    if self.boundary.max_extent() / dist < theta {
                        // Far enough: the whole subtree acts as one point
                        // mass at its center of mass.
                        let magnitude = strength * self.total_mass / dist_sq;
                        return (magnitude * dx / dist, magnitude * dy / dist);
                    }
                }
                let (mut fx, mut fy) = self.direct_sum(body, strength);
                for child in children.iter() {
                    let (cfx, cfy) = child.force_on(body, theta, strength);
                    fx += cfx;
                    fy += cfy;
                }
                (fx, fy)
            }
        }
    }

    // Exact per-body summation over this node's own entries, skipping the
    // query body itself and flooring coincident positions to zero.
    fn direct_sum(&self, body: &Body, strength: f64) -> (f64, f64) {
        let mut fx = 0.0;
        let mut fy = 0.0;
        for other in &self.bodies {
            if other.id == body.id {
                continue;
            }
            let dx = body.x - other.x;
            let dy = body.y - other.y;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq <= DIST_EPSILON || other.mass == 0.0 {
                continue;
            }
            let dist = dist_sq.sqrt();
            let magnitude = strength * other.mass / dist_sq;
            fx += magnitude * dx / dist;
            fy += magnitude * dy / dist;
        }
        (fx, fy)
    }
}

/// A quadtree over [`Body`] values that maintains, at every node, the total
/// mass and mass-weighted center of position of all bodies beneath it, and
/// uses those aggregates to approximate pairwise repulsion in O(n log n).
///
/// Trees are ephemeral: built fresh from the current body positions at the
/// start of each layout tick, queried, then discarded. Aggregates are only
/// valid for the positions the tree was built from, so there is no
/// per-entry removal — just [`clear`](BarnesHutTree::clear) or drop.
///
/// # Examples
///
/// ```
/// use layout_repulsion::geometry::Rect;
/// use layout_repulsion::spatial::{BarnesHutTree, Body};
///
/// let boundary = Rect::new(0.0, 0.0, 1000.0, 1000.0);
/// let mut tree = BarnesHutTree::new(boundary).expect("valid boundary");
/// assert_eq!(tree.theta(), 0.5); // default accuracy parameter
///
/// tree.insert(Body::new(1, 100.0, 500.0, 1.0));
/// tree.insert(Body::new(2, 300.0, 500.0, 3.0));
///
/// // Mass-weighted center: (100*1 + 300*3) / 4 = 250.
/// assert!((tree.center_of_mass().x - 250.0).abs() < 1e-9);
///
/// let (fx, fy) = tree.calculate_force(&Body::new(1, 100.0, 500.0, 1.0), 1000.0);
/// assert!(fx < 0.0); // pushed away from the mass to its right
/// assert!(fy.abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BarnesHutTree {
    root: BhNode,
    theta: f64,
}

impl BarnesHutTree {
    /// Creates an empty tree over `boundary` with the default theta of 0.5.
    pub fn new(boundary: Rect) -> Result<Self, LayoutError> {
        Self::with_theta(boundary, DEFAULT_THETA)
    }

    /// Creates an empty tree with an explicit accuracy parameter.
    ///
    /// Smaller theta values are stricter (more accurate, slower); 0.0
    /// degenerates toward exact pairwise calculation.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidBoundary`] for non-positive or
    /// non-finite boundary dimensions, and [`LayoutError::InvalidTheta`]
    /// for a negative or non-finite theta.
    pub fn with_theta(boundary: Rect, theta: f64) -> Result<Self, LayoutError> {
        if !(boundary.width > 0.0)
            || !(boundary.height > 0.0)
            || !boundary.width.is_finite()
            || !boundary.height.is_finite()
            || !boundary.x.is_finite()
            || !boundary.y.is_finite()
        {
            return Err(LayoutError::InvalidBoundary);
        }
        if !theta.is_finite() || theta < 0.0 {
            return Err(LayoutError::InvalidTheta);
        }
        Ok(BarnesHutTree {
            root: BhNode::new(boundary, 0),
            theta,
        })
    }

    /// The accuracy parameter this tree was constructed with.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// The rectangle this tree covers.
    pub fn boundary(&self) -> Rect {
        self.root.boundary
    }

    /// Number of bodies stored in the tree.
    pub fn body_count(&self) -> usize {
        self.root.body_count
    }

    /// Sum of all stored body masses.
    pub fn total_mass(&self) -> f64 {
        self.root.total_mass
    }

    /// Mass-weighted average position of all stored bodies. Meaningless
    /// while `total_mass()` is zero.
    pub fn center_of_mass(&self) -> Point {
        self.root.center_of_mass
    }

    /// Inserts a body, updating mass aggregates at every node on the
    /// insertion path.
    ///
    /// Returns `false` without mutation when the body's position lies
    /// outside the tree's boundary.
    pub fn insert(&mut self, body: Body) -> bool {
        if !self.root.boundary.contains(body.position()) {
            return false;
        }
        self.root.insert_contained(body);
        true
    }

    /// Computes the net approximate repulsion force on `body` from every
    /// other body in the tree.
    ///
    /// Recursion follows the Barnes-Hut criterion: a subtree whose extent
    /// `s` and center-of-mass distance `d` satisfy `s / d < theta` is
    /// treated as a single point mass contributing
    /// `repulsion_strength * total_mass / d²` directed away from the
    /// center of mass; otherwise all four children are visited. Leaf
    /// entries are summed exactly, skipping the query body itself and any
    /// position numerically coincident with it — the result is always
    /// finite, even for degenerate input.
    ///
    /// Returns `(0.0, 0.0)` on an empty tree.
    pub fn calculate_force(&self, body: &Body, repulsion_strength: f64) -> (f64, f64) {
        self.root.force_on(body, self.theta, repulsion_strength)
    }

    /// Computes the repulsion force for each body in `bodies` against the
    /// already-built tree, keyed by body id.
    ///
    /// The tree is read-only during this pass, so the per-body queries run
    /// in parallel. The caller is responsible for passing the same body set
    /// the tree was built from; a count mismatch is logged but not
    /// rejected.
    pub fn calculate_all_forces(
        &self,
        bodies: &[Body],
        repulsion_strength: f64,
    ) -> HashMap<u64, (f64, f64)> {
        if bodies.len() != self.body_count() {
            warn!(
                "force pass over {} bodies, but the tree holds {}",
                bodies.len(),
                self.body_count()
            );
        }
        bodies
            .par_iter()
            .map(|body| (body.id, self.calculate_force(body, repulsion_strength)))
            .collect()
    }

    /// Resets the tree to a single empty leaf and zeroes the aggregates.
    pub fn clear(&mut self) {
        self.root = BhNode::new(self.root.boundary, 0);
    }
}
