use log::{debug, warn};

use crate::geometry::Rect;
use crate::spatial::{BarnesHutTree, Body};
use crate::utils::{LayoutError, BOUNDS_PADDING_FACTOR, DEFAULT_THETA, MIN_BOUNDS_PADDING};

/// Builds a Barnes-Hut tree spanning all of `bodies`.
///
/// The boundary is the axis-aligned bounding box of the body positions,
/// expanded on every side by a padding margin so that bodies sitting exactly
/// on the computed min/max still pass the half-open containment check. An
/// empty body list is not an error: it yields a unit-boundary tree with
/// `body_count() == 0` and `total_mass() == 0`.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidTheta`] for a negative or non-finite
/// theta, and [`LayoutError::InvalidBoundary`] when the body positions do
/// not admit a finite bounding box. A stray non-finite position among
/// otherwise finite ones is skipped with a warning instead.
///
/// # Examples
///
/// ```
/// use layout_repulsion::spatial::{build_barnes_hut_tree, Body};
///
/// let bodies = vec![
///     Body::new(1, 0.0, 0.0, 1.0),
///     Body::new(2, 100.0, 100.0, 1.0),
///     Body::new(3, 50.0, 20.0, 2.0),
/// ];
/// let tree = build_barnes_hut_tree(&bodies, 0.5).expect("finite positions");
///
/// assert_eq!(tree.body_count(), 3);
/// assert_eq!(tree.total_mass(), 4.0);
///
/// let forces = tree.calculate_all_forces(&bodies, 1000.0);
/// assert_eq!(forces.len(), 3);
/// ```
pub fn build_barnes_hut_tree(bodies: &[Body], theta: f64) -> Result<BarnesHutTree, LayoutError> {
    if bodies.is_empty() {
        return BarnesHutTree::with_theta(Rect::new(0.0, 0.0, 1.0, 1.0), theta);
    }

    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for body in bodies {
        min_x = min_x.min(body.x);
        min_y = min_y.min(body.y);
        max_x = max_x.max(body.x);
        max_y = max_y.max(body.y);
    }

    // A fraction of the larger extent, floored so single-point and collinear
    // sets still get a positive-area boundary.
    let extent = (max_x - min_x).max(max_y - min_y);
    let padding = (extent * BOUNDS_PADDING_FACTOR).max(MIN_BOUNDS_PADDING);
    let boundary = Rect::new(
        min_x - padding,
        min_y - padding,
        (max_x - min_x) + padding * 2.0,
        (max_y - min_y) + padding * 2.0,
    );

    let mut tree = BarnesHutTree::with_theta(boundary, theta)?;
    for body in bodies {
        if !tree.insert(*body) {
            // Unreachable with the padding above, unless a position is NaN.
            warn!(
                "body {} at ({}, {}) fell outside the padded layout bounds",
                body.id, body.x, body.y
            );
        }
    }
    debug!(
        "built Barnes-Hut tree: {} bodies, theta {}, bounds {:?}",
        tree.body_count(),
        theta,
        boundary
    );
    Ok(tree)
}

/// [`build_barnes_hut_tree`] with the default theta of 0.5.
pub fn build_barnes_hut_tree_default(bodies: &[Body]) -> Result<BarnesHutTree, LayoutError> {
    build_barnes_hut_tree(bodies, DEFAULT_THETA)
}
