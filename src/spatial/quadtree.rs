use crate::geometry::{Point, Rect};
use crate::utils::{LayoutError, DEFAULT_CAPACITY, MAX_DEPTH};

/// A capacity-bounded point index over an arbitrary payload type.
///
/// Each node is either a leaf holding up to `capacity` entries, or an
/// internal node owning four children that partition its rectangle into
/// NW/NE/SW/SE quadrants. A leaf converts to internal exactly once, when an
/// insertion would exceed its capacity; the held entries are then
/// redistributed into the children.
///
/// All runtime failure is communicated through return values: an insertion
/// outside the boundary returns `false`, a query over empty space returns an
/// empty vector. Nothing panics.
///
/// # Examples
///
/// ```
/// use layout_repulsion::geometry::{Point, Rect};
/// use layout_repulsion::spatial::Quadtree;
///
/// let boundary = Rect::new(0.0, 0.0, 100.0, 100.0);
/// let mut tree = Quadtree::new(boundary, 4).expect("valid boundary");
///
/// assert!(tree.insert(Point::new(10.0, 10.0), "a"));
/// assert!(tree.insert(Point::new(90.0, 90.0), "b"));
/// assert!(!tree.insert(Point::new(150.0, 10.0), "outside"));
///
/// let hits = tree.query(&Rect::new(0.0, 0.0, 50.0, 50.0));
/// assert_eq!(hits.len(), 1);
/// assert_eq!(*hits[0].1, "a");
/// ```
#[derive(Debug, Clone)]
pub struct Quadtree<T> {
    boundary: Rect,
    capacity: usize,
    depth: usize,
    entries: Vec<(Point, T)>,
    children: Option<Box<[Quadtree<T>; 4]>>,
}

impl<T> Quadtree<T> {
    /// Creates an empty index over `boundary` with the given leaf capacity.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidBoundary`] for non-positive or
    /// non-finite width/height, and [`LayoutError::InvalidCapacity`] for a
    /// capacity of zero — either would make subdivision degenerate.
    pub fn new(boundary: Rect, capacity: usize) -> Result<Self, LayoutError> {
        if !(boundary.width > 0.0)
            || !(boundary.height > 0.0)
            || !boundary.width.is_finite()
            || !boundary.height.is_finite()
            || !boundary.x.is_finite()
            || !boundary.y.is_finite()
        {
            return Err(LayoutError::InvalidBoundary);
        }
        if capacity == 0 {
            return Err(LayoutError::InvalidCapacity);
        }
        Ok(Self::node(boundary, capacity, 0))
    }

    /// Creates an empty index with [`DEFAULT_CAPACITY`] entries per leaf.
    pub fn with_default_capacity(boundary: Rect) -> Result<Self, LayoutError> {
        Self::new(boundary, DEFAULT_CAPACITY)
    }

    fn node(boundary: Rect, capacity: usize, depth: usize) -> Self {
        Quadtree {
            boundary,
            capacity,
            depth,
            entries: Vec::new(),
            children: None,
        }
    }

    /// The rectangle this index covers.
    pub fn boundary(&self) -> Rect {
        self.boundary
    }

    /// The leaf capacity this index was constructed with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of stored entries, across all subdivision levels.
    pub fn len(&self) -> usize {
        let mut count = self.entries.len();
        if let Some(children) = &self.children {
            count += children.iter().map(|c| c.len()).sum::<usize>();
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `value` at `point`.
    ///
    /// Returns `false` without mutation when `point` lies outside the
    /// index's boundary; the caller decides whether to enlarge the boundary
    /// and rebuild, or drop the point.
    pub fn insert(&mut self, point: Point, value: T) -> bool {
        if !self.boundary.contains(point) {
            return false;
        }
        self.insert_contained(point, value);
        true
    }

    // Precondition: self.boundary.contains(point).
    fn insert_contained(&mut self, point: Point, value: T) {
        if self.children.is_none() {
            if self.entries.len() < self.capacity || self.depth >= MAX_DEPTH {
                self.entries.push((point, value));
                return;
            }
            self.subdivide();
        }
        self.insert_into_child(point, value);
    }

    fn insert_into_child(&mut self, point: Point, value: T) {
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                if child.boundary.contains(point) {
                    child.insert_contained(point, value);
                    return;
                }
            }
        }
        // Rounding at the far quadrant edge can leave a contained point
        // unclaimed by every child; keep it on this node rather than lose it.
        self.entries.push((point, value));
    }

    fn subdivide(&mut self) {
        let (nw, ne, sw, se) = self.boundary.subdivide();
        let depth = self.depth + 1;
        self.children = Some(Box::new([
            Quadtree::node(nw, self.capacity, depth),
            Quadtree::node(ne, self.capacity, depth),
            Quadtree::node(sw, self.capacity, depth),
            Quadtree::node(se, self.capacity, depth),
        ]));
        let held = std::mem::take(&mut self.entries);
        for (point, value) in held {
            self.insert_into_child(point, value);
        }
    }

    /// Returns every stored entry whose point lies inside `range`.
    ///
    /// Subtrees whose rectangle does not intersect `range` are pruned.
    pub fn query(&self, range: &Rect) -> Vec<(Point, &T)> {
        let mut out = Vec::new();
        self.query_into(range, &mut out);
        out
    }

    fn query_into<'a>(&'a self, range: &Rect, out: &mut Vec<(Point, &'a T)>) {
        if !self.boundary.intersects(range) {
            return;
        }
        for (point, value) in &self.entries {
            if range.contains(*point) {
                out.push((*point, value));
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_into(range, out);
            }
        }
    }

    /// Returns every entry within Euclidean distance `radius` of `center`.
    ///
    /// Subtrees are prefiltered with the square circumscribing the circle;
    /// an exact distance check (`<= radius`, boundary included) then removes
    /// the bounding-box false positives.
    pub fn query_radius(&self, center: Point, radius: f64) -> Vec<(Point, &T)> {
        let mut out = Vec::new();
        if !(radius >= 0.0) {
            return out;
        }
        let bounds = Rect::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        );
        self.query_radius_into(center, radius * radius, &bounds, &mut out);
        out
    }

    fn query_radius_into<'a>(
        &'a self,
        center: Point,
        radius_sq: f64,
        bounds: &Rect,
        out: &mut Vec<(Point, &'a T)>,
    ) {
        if !self.boundary.intersects(bounds) {
            return;
        }
        for (point, value) in &self.entries {
            if point.distance_sq_to(center) <= radius_sq {
                out.push((*point, value));
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_radius_into(center, radius_sq, bounds, out);
            }
        }
    }

    /// Full traversal: every stored entry, regardless of subdivision depth.
    pub fn entries(&self) -> Vec<(Point, &T)> {
        let mut out = Vec::new();
        self.entries_into(&mut out);
        out
    }

    fn entries_into<'a>(&'a self, out: &mut Vec<(Point, &'a T)>) {
        for (point, value) in &self.entries {
            out.push((*point, value));
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.entries_into(out);
            }
        }
    }

    /// Resets the index to a single empty leaf over the original boundary.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.children = None;
    }
}
