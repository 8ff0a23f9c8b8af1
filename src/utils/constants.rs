/// Default Barnes-Hut accuracy parameter. Smaller values recurse deeper and
/// approximate less; 0.0 degenerates toward exact pairwise summation.
pub const DEFAULT_THETA: f64 = 0.5;

/// Default leaf capacity for the generic quadtree.
pub const DEFAULT_CAPACITY: usize = 4;

/// Subdivision depth cap. A leaf at this depth grows past its capacity
/// instead of splitting, so coincident points cannot recurse unboundedly.
pub const MAX_DEPTH: usize = 32;

/// Squared-distance floor below which two positions are treated as
/// coincident and contribute zero force.
pub const DIST_EPSILON: f64 = 1e-12;

/// Fraction of the larger bounding-box extent added as padding on every
/// side when building a tree from a body set.
pub const BOUNDS_PADDING_FACTOR: f64 = 0.1;

/// Minimum absolute padding, so degenerate (single-point or collinear)
/// body sets still get a positive-area boundary.
pub const MIN_BOUNDS_PADDING: f64 = 1.0;
