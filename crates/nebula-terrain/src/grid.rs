//! Row-major grid of height samples.

/// Rejected grid shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeightfieldError {
    /// A grid needs at least one quad, i.e. 2x2 samples.
    #[error("height grid must be at least 2x2, got {width}x{height}")]
    GridTooSmall { width: usize, height: usize },

    /// The sample slice does not cover `width * height` cells exactly.
    #[error("expected {expected} height samples for the grid, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// Vertex indices would not fit in `u32`.
    #[error("{width}x{height} grid exceeds the 32-bit index range")]
    TooManyVertices { width: usize, height: usize },
}

/// Immutable `width x height` array of scalar heights, row-major with the
/// origin at sample `(0, 0)`.
///
/// Construction enforces the shape preconditions of mesh generation, so any
/// `HeightGrid` can be triangulated.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl HeightGrid {
    /// Wrap `samples` as a `width x height` grid.
    pub fn new(width: usize, height: usize, samples: Vec<f32>) -> Result<Self, HeightfieldError> {
        validate_shape(width, height)?;
        let expected = width * height;
        if samples.len() != expected {
            return Err(HeightfieldError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell in row-major order.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Result<Self, HeightfieldError> {
        validate_shape(width, height)?;
        let mut samples = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// A grid of zeros.
    pub fn flat(width: usize, height: usize) -> Result<Self, HeightfieldError> {
        Self::from_fn(width, height, |_, _| 0.0)
    }

    /// Samples along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Samples along y (rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Height at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn sample(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.width && y < self.height,
            "sample ({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        self.samples[y * self.width + x]
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// `(min, max)` over all samples.
    pub fn height_range(&self) -> (f32, f32) {
        self.samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

fn validate_shape(width: usize, height: usize) -> Result<(), HeightfieldError> {
    if width < 2 || height < 2 {
        return Err(HeightfieldError::GridTooSmall { width, height });
    }
    match width.checked_mul(height) {
        Some(count) if count <= u32::MAX as usize => Ok(()),
        _ => Err(HeightfieldError::TooManyVertices { width, height }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_exact_sample_count() {
        let grid = HeightGrid::new(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.sample(2, 0), 2.0);
        assert_eq!(grid.sample(0, 1), 3.0);
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        assert_eq!(
            HeightGrid::new(3, 3, vec![0.0; 8]),
            Err(HeightfieldError::SampleCountMismatch {
                expected: 9,
                actual: 8
            })
        );
        assert!(HeightGrid::new(2, 2, vec![0.0; 5]).is_err());
    }

    #[test]
    fn test_rejects_degenerate_shapes() {
        assert_eq!(
            HeightGrid::new(1, 4, vec![0.0; 4]),
            Err(HeightfieldError::GridTooSmall {
                width: 1,
                height: 4
            })
        );
        assert!(HeightGrid::flat(2, 0).is_err());
    }

    #[test]
    fn test_rejects_index_overflow() {
        let result = HeightGrid::from_fn(1 << 17, 1 << 16, |_, _| 0.0);
        assert_eq!(
            result,
            Err(HeightfieldError::TooManyVertices {
                width: 1 << 17,
                height: 1 << 16
            })
        );
    }

    #[test]
    fn test_from_fn_is_row_major() {
        let grid = HeightGrid::from_fn(4, 3, |x, y| (y * 10 + x) as f32).unwrap();
        assert_eq!(grid.samples()[5], 11.0);
        assert_eq!(grid.sample(3, 2), 23.0);
    }

    #[test]
    fn test_height_range() {
        let grid = HeightGrid::new(2, 2, vec![-1.5, 0.0, 4.0, 2.0]).unwrap();
        assert_eq!(grid.height_range(), (-1.5, 4.0));
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn test_sample_out_of_bounds_panics() {
        HeightGrid::flat(2, 2).unwrap().sample(2, 0);
    }
}
