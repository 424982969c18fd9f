use super::{Point2, TOLERANCE};

/// Axis-aligned rectangle in model coordinates (y axis pointing up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds2 {
    /// Creates bounds from the lower-left and upper-right corners.
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Point2::new(min_x, min_y),
            max: Point2::new(max_x, max_y),
        }
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns `true` for finite bounds with positive width and height.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.min.x, self.min.y, self.max.x, self.max.y]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > TOLERANCE
            && self.height() > TOLERANCE
    }

    /// Closed containment test; points on the boundary are inside.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x - TOLERANCE
            && p.x <= self.max.x + TOLERANCE
            && p.y >= self.min.y - TOLERANCE
            && p.y <= self.max.y + TOLERANCE
    }

    /// Corners in clockwise order starting at the top-left corner.
    #[must_use]
    pub fn corners_clockwise(&self) -> [Point2; 4] {
        [
            Point2::new(self.min.x, self.max.y),
            Point2::new(self.max.x, self.max.y),
            Point2::new(self.max.x, self.min.y),
            Point2::new(self.min.x, self.min.y),
        ]
    }

    /// Boundary edges in clockwise order: top, right, bottom, left.
    ///
    /// Edge `i` runs from corner `i` to corner `i + 1`.
    #[must_use]
    pub fn edges_clockwise(&self) -> [(Point2, Point2); 4] {
        let c = self.corners_clockwise();
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }

    /// Arc-length parameter of the corner `index` along the clockwise perimeter.
    #[must_use]
    pub fn corner_parameter(&self, index: usize) -> f64 {
        let (w, h) = (self.width(), self.height());
        match index % 4 {
            0 => 0.0,
            1 => w,
            2 => w + h,
            _ => 2.0 * w + h,
        }
    }

    /// Total perimeter length.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }
}
