use crate::error::{VoronoiError, VoronoiResult};

/// Axis-aligned bounding box in 2D space.
///
/// The box is the starting cell of every site, so its corner order fixes the
/// winding of all cells in a diagram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// Creates the box covering a drawing surface of `width` x `height`, grown by
    /// `padding` on every side.
    pub fn from_surface(width: f64, height: f64, padding: f64) -> VoronoiResult<Self> {
        if !padding.is_finite() || padding < 0.0 {
            return Err(VoronoiError::InvalidPadding { padding });
        }
        Self::new([-padding, -padding], [width + padding, height + padding]).validated()
    }

    /// Checks that the box is finite and has a positive extent on both axes.
    pub fn validated(self) -> VoronoiResult<Self> {
        let finite = self.min.iter().chain(self.max.iter()).all(|v| v.is_finite());
        if !finite || self.max[0] <= self.min[0] || self.max[1] <= self.min[1] {
            return Err(VoronoiError::InvalidBounds { min: self.min, max: self.max });
        }
        Ok(self)
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Corners in the order (min,min), (max,min), (max,max), (min,max).
    pub fn corners(&self) -> [[f64; 2]; 4] {
        [
            [self.min[0], self.min[1]],
            [self.max[0], self.min[1]],
            [self.max[0], self.max[1]],
            [self.min[0], self.max[1]],
        ]
    }

    /// The closest point of the box.
    pub fn clamp(&self, point: &[f64; 2]) -> [f64; 2] {
        [point[0].clamp(self.min[0], self.max[0]), point[1].clamp(self.min[1], self.max[1])]
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &[f64; 2]) -> bool {
        point[0] >= self.min[0] && point[0] <= self.max[0] && point[1] >= self.min[1] && point[1] <= self.max[1]
    }
}
