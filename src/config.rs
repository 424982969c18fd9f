use crate::error::ConfigError;
use crate::math::polygon_2d::is_simple_polygon;
use crate::math::{Bounds2, Point2};
use crate::topology::VertexLabel;

/// Base tolerance intervals for the equality tests of the shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceConfig {
    /// Angle comparisons, in radians. Also the base interval for parallel
    /// side detection.
    pub angle: f64,
    /// Length comparisons, in model units.
    pub length: f64,
    /// Multiplier applied to the base intervals while several vertices are
    /// moved at once.
    pub scale_up_factor: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            angle: 1e-3,
            length: 1e-3,
            scale_up_factor: 10.0,
        }
    }
}

impl ToleranceConfig {
    /// Returns `(angle, length)` intervals for the given number of pressed
    /// vertices: coarser while two or more are held.
    #[must_use]
    pub fn interactive(&self, pressed_vertices: usize) -> (f64, f64) {
        if pressed_vertices >= 2 {
            (
                self.angle * self.scale_up_factor,
                self.length * self.scale_up_factor,
            )
        } else {
            (self.angle, self.length)
        }
    }

    /// # Errors
    ///
    /// Returns an error if an interval is not finite and positive, or the
    /// scale-up factor is below 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("angle", self.angle), ("length", self.length)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }
        if !self.scale_up_factor.is_finite() || self.scale_up_factor < 1.0 {
            return Err(ConfigError::InvalidScaleFactor(self.scale_up_factor));
        }
        Ok(())
    }
}

/// Configuration consumed by a quadrilateral model.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadrilateralConfig {
    /// World rectangle every vertex must stay within.
    pub bounds: Bounds2,
    pub tolerances: ToleranceConfig,
    /// Vertices closer than this are treated as coinciding.
    pub min_vertex_separation: f64,
    /// When set, proposed positions are rounded to this grid.
    pub grid_step: Option<f64>,
    /// Positions used at construction and on reset, indexed by [`VertexLabel`].
    pub initial_positions: [Point2; 4],
}

impl Default for QuadrilateralConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds2::new(-1.0, -0.8, 1.0, 0.8),
            tolerances: ToleranceConfig::default(),
            min_vertex_separation: 0.02,
            grid_step: None,
            initial_positions: [
                Point2::new(-0.25, 0.25),
                Point2::new(0.25, 0.25),
                Point2::new(0.25, -0.25),
                Point2::new(-0.25, -0.25),
            ],
        }
    }
}

impl QuadrilateralConfig {
    /// Replaces the world rectangle.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds2) -> Self {
        self.bounds = bounds;
        self
    }

    /// Replaces the base tolerance intervals.
    #[must_use]
    pub fn with_tolerances(mut self, tolerances: ToleranceConfig) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Sets the minimum vertex-vertex and vertex-side clearance.
    #[must_use]
    pub fn with_min_vertex_separation(mut self, separation: f64) -> Self {
        self.min_vertex_separation = separation;
        self
    }

    /// Enables snapping of proposed positions to a grid of `step`.
    #[must_use]
    pub fn with_grid_step(mut self, step: f64) -> Self {
        self.grid_step = Some(step);
        self
    }

    /// Replaces the positions used at construction and on reset.
    #[must_use]
    pub fn with_initial_positions(mut self, positions: [Point2; 4]) -> Self {
        self.initial_positions = positions;
        self
    }

    /// Rounds `p` to the configured grid, if any.
    #[must_use]
    pub fn snap(&self, p: Point2) -> Point2 {
        match self.grid_step {
            Some(step) => Point2::new((p.x / step).round() * step, (p.y / step).round() * step),
            None => p,
        }
    }

    /// Checks every field, including that the initial positions form a simple
    /// quadrilateral inside the bounds.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bounds.is_valid() {
            return Err(ConfigError::InvalidBounds);
        }
        self.tolerances.validate()?;
        if !self.min_vertex_separation.is_finite() || self.min_vertex_separation < 0.0 {
            return Err(ConfigError::InvalidSeparation(self.min_vertex_separation));
        }
        if let Some(step) = self.grid_step {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::InvalidGridStep(step));
            }
        }

        for label in VertexLabel::ALL {
            let p = self.initial_positions[label.index()];
            if !p.x.is_finite() || !p.y.is_finite() || !self.bounds.contains(&p) {
                return Err(ConfigError::InvalidInitialShape(format!(
                    "vertex {label} at ({}, {}) is outside the bounds",
                    p.x, p.y
                )));
            }
        }
        if !is_simple_polygon(&self.initial_positions) {
            return Err(ConfigError::InvalidInitialShape(
                "initial positions do not form a simple quadrilateral".to_owned(),
            ));
        }
        Ok(())
    }
}
