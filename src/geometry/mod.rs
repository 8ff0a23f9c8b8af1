/// A point in 2D layout space.
///
/// # Examples
///
/// ```
/// use layout_repulsion::geometry::Point;
///
/// let a = Point { x: 0.0, y: 0.0 };
/// let b = Point { x: 3.0, y: 4.0 };
/// assert_eq!(a.distance_to(b), 5.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Squared Euclidean distance to `other`. Cheaper than `distance_to`
    /// when only comparing against a squared threshold.
    pub fn distance_sq_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        self.distance_sq_to(other).sqrt()
    }
}

/// An axis-aligned rectangle anchored at its minimum corner.
///
/// Used both as an index boundary and as a query shape. Width and height
/// are expected to be positive; the spatial indexes validate that at
/// construction rather than on the struct itself.
///
/// # Examples
///
/// ```
/// use layout_repulsion::geometry::{Point, Rect};
///
/// let rect = Rect { x: 0.0, y: 0.0, width: 100.0, height: 50.0 };
/// assert!(rect.contains(Point::new(0.0, 0.0)));
/// assert!(rect.contains(Point::new(99.9, 49.9)));
/// assert!(!rect.contains(Point::new(100.0, 25.0))); // upper edges are exclusive
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    /// Returns true if `point` lies inside this rectangle.
    ///
    /// Containment is half-open: inclusive on the minimum edges, exclusive
    /// on the maximum edges (`[x, x + width)` × `[y, y + height)`). The same
    /// rule applies at quadrant split lines, so the four quadrants of
    /// [`subdivide`](Rect::subdivide) partition the parent without overlap.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x &&
            point.x < self.x + self.width &&
            point.y >= self.y &&
            point.y < self.y + self.height
    }

    /// Returns true if this rectangle overlaps `other`.
    ///
    /// Edge-touching rectangles count as overlapping. This is only used to
    /// prune subtrees during queries, where an extra visit is harmless and a
    /// false prune would drop results.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width &&
            other.x <= self.x + self.width &&
            self.y <= other.y + other.height &&
            other.y <= self.y + self.height
    }

    /// Splits the rectangle into four equal quadrants.
    ///
    /// # Returns
    ///
    /// A tuple of (NW, NE, SW, SE) quadrants, with y growing downward as in
    /// screen coordinates: NW/NE share the top edge, SW/SE the bottom.
    ///
    /// # Examples
    ///
    /// ```
    /// use layout_repulsion::geometry::{Point, Rect};
    ///
    /// let rect = Rect { x: 0.0, y: 0.0, width: 100.0, height: 100.0 };
    /// let (nw, ne, sw, se) = rect.subdivide();
    ///
    /// assert_eq!(nw.width, 50.0);
    /// assert!(nw.contains(Point::new(10.0, 10.0)));
    /// assert!(ne.contains(Point::new(60.0, 10.0)));
    /// assert!(sw.contains(Point::new(10.0, 60.0)));
    /// assert!(se.contains(Point::new(60.0, 60.0)));
    ///
    /// // Split lines follow the half-open rule: the midpoint lands in SE.
    /// assert!(se.contains(Point::new(50.0, 50.0)));
    /// assert!(!nw.contains(Point::new(50.0, 50.0)));
    /// ```
    pub fn subdivide(&self) -> (Rect, Rect, Rect, Rect) {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        (
            Rect { x: self.x, y: self.y, width: hw, height: hh },           // NW
            Rect { x: self.x + hw, y: self.y, width: hw, height: hh },      // NE
            Rect { x: self.x, y: self.y + hh, width: hw, height: hh },      // SW
            Rect { x: self.x + hw, y: self.y + hh, width: hw, height: hh }, // SE
        )
    }

    /// The larger of width and height — the node extent `s` in the
    /// Barnes-Hut acceptance criterion `s / d < theta`.
    pub fn max_extent(&self) -> f64 {
        self.width.max(self.height)
    }
}

#[cfg(test)]
mod geometry_tests;
