//! Ordered (x, y) sequences whose y-values receive exceedance probabilities.
//!
//! The x-values are fixed when a sequence is built; only y-values are ever
//! written.

use crate::error::{Error, Result};

/// An ordered sequence of points with fixed x-values and writable y-values.
pub trait XySequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn x(&self, i: usize) -> f64;

    fn y(&self, i: usize) -> f64;

    fn set_y(&mut self, i: usize, y: f64);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XyPoint {
    x: f64,
    pub y: f64,
}

impl XyPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }
}

impl XySequence for [XyPoint] {
    fn len(&self) -> usize {
        <[XyPoint]>::len(self)
    }

    fn x(&self, i: usize) -> f64 {
        self[i].x
    }

    fn y(&self, i: usize) -> f64 {
        self[i].y
    }

    fn set_y(&mut self, i: usize, y: f64) {
        self[i].y = y;
    }
}

impl XySequence for Vec<XyPoint> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn x(&self, i: usize) -> f64 {
        self[i].x
    }

    fn y(&self, i: usize) -> f64 {
        self[i].y
    }

    fn set_y(&mut self, i: usize, y: f64) {
        self[i].y = y;
    }
}

/// A sequence stored as two parallel arrays, the layout curve code iterates
/// over most often.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayXySequence {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl ArrayXySequence {
    /// A sequence over `xs` with every y set to zero.
    pub fn new(xs: Vec<f64>) -> Self {
        let ys = vec![0.0; xs.len()];
        Self { xs, ys }
    }

    /// A sequence over the natural logs of positive ground-motion levels.
    pub fn from_levels(levels: &[f64]) -> Result<Self> {
        let mut xs = Vec::with_capacity(levels.len());
        for &level in levels {
            if !(level > 0.0 && level.is_finite()) {
                return Err(Error::InvalidParameter {
                    name: "level",
                    value: level,
                });
            }
            xs.push(level.ln());
        }
        Ok(Self::new(xs))
    }

    /// `count` levels evenly spaced in log space from `min` to `max`
    /// (both included), stored as natural logs.
    pub fn log_spaced(min: f64, max: f64, count: usize) -> Result<Self> {
        if count < 2 {
            return Err(Error::InvalidParameter {
                name: "count",
                value: count as f64,
            });
        }
        for (name, value) in [("min", min), ("max", max)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        if max <= min {
            return Err(Error::InvalidParameter {
                name: "max",
                value: max,
            });
        }
        let lo = min.ln();
        let delta = (max.ln() - lo) / (count - 1) as f64;
        let mut xs: Vec<f64> = (0..count).map(|i| lo + i as f64 * delta).collect();
        // avoid accumulated rounding at the top end
        xs[count - 1] = max.ln();
        Ok(Self::new(xs))
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// The x-values together with mutable access to the y-values, so that
    /// callers can fill the ys without being able to touch the xs.
    pub fn split_mut(&mut self) -> (&[f64], &mut [f64]) {
        (&self.xs, &mut self.ys)
    }

    pub fn iter(&self) -> impl Iterator<Item = XyPoint> + '_ {
        self.xs
            .iter()
            .zip(self.ys.iter())
            .map(|(&x, &y)| XyPoint::new(x, y))
    }
}

impl XySequence for ArrayXySequence {
    fn len(&self) -> usize {
        self.xs.len()
    }

    fn x(&self, i: usize) -> f64 {
        self.xs[i]
    }

    fn y(&self, i: usize) -> f64 {
        self.ys[i]
    }

    fn set_y(&mut self, i: usize, y: f64) {
        self.ys[i] = y;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_zeroes_ys() {
        let seq = ArrayXySequence::new(vec![-1.0, 0.0, 1.0]);
        assert_eq!(seq.ys(), &[0.0, 0.0, 0.0]);
        assert_eq!(seq.len(), 3);
        assert!(!seq.is_empty());
    }

    #[test]
    fn test_from_levels() {
        let seq = ArrayXySequence::from_levels(&[0.1, 1.0, 2.0]).unwrap();
        assert_eq!(seq.xs(), &[0.1f64.ln(), 0.0, 2.0f64.ln()]);
        assert_eq!(
            ArrayXySequence::from_levels(&[0.1, 0.0]),
            Err(Error::InvalidParameter {
                name: "level",
                value: 0.0
            })
        );
        assert!(ArrayXySequence::from_levels(&[-0.5]).is_err());
    }

    #[test]
    fn test_log_spaced() {
        let seq = ArrayXySequence::log_spaced(0.01, 1.0, 3).unwrap();
        assert_eq!(seq.len(), 3);
        assert!((seq.x(0) - 0.01f64.ln()).abs() < 1e-12);
        assert!((seq.x(1) - 0.1f64.ln()).abs() < 1e-12);
        assert_eq!(seq.x(2), 0.0);
        assert!(ArrayXySequence::log_spaced(0.01, 1.0, 1).is_err());
        assert!(ArrayXySequence::log_spaced(1.0, 0.01, 10).is_err());
        assert!(ArrayXySequence::log_spaced(0.0, 1.0, 10).is_err());
    }

    #[test]
    fn test_set_y_leaves_x() {
        let mut seq = ArrayXySequence::new(vec![0.5, 1.5]);
        seq.set_y(1, 0.25);
        let points: Vec<XyPoint> = seq.iter().collect();
        assert_eq!(points, vec![XyPoint::new(0.5, 0.0), XyPoint::new(1.5, 0.25)]);
    }

    #[test]
    fn test_point_slices() {
        let mut points = vec![XyPoint::new(1.0, 0.0), XyPoint::new(2.0, 0.0)];
        points.set_y(0, 0.75);
        assert_eq!(XySequence::len(&points), 2);
        assert_eq!(points.y(0), 0.75);
        assert_eq!(points[0].x(), 1.0);
        let slice: &mut [XyPoint] = &mut points;
        slice.set_y(1, 0.5);
        assert_eq!(points[1].y, 0.5);
    }
}
