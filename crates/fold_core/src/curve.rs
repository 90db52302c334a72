//! Sample-based polylines
//!
//! A layer boundary is tabulated as parallel x and y lists. Consecutive
//! samples become straight segments; there is no interpolation, so the
//! curve is only as smooth as the table is dense.

use fold_math::Vec2;
use fold_physics::EdgeShape;
use serde::{Serialize, Deserialize};

use crate::error::CurveError;

/// Tabulated curve data as it appears in a scene template
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveSamples {
    pub xs: Vec<f32>,
    pub ys: Vec<f32>,
}

impl CurveSamples {
    /// Create samples from parallel coordinate lists
    pub fn new(xs: Vec<f32>, ys: Vec<f32>) -> Self {
        Self { xs, ys }
    }

    /// Build the polyline these samples describe
    pub fn to_polyline(&self) -> Result<Polyline, CurveError> {
        Polyline::from_samples(&self.xs, &self.ys)
    }
}

/// An ordered, validated sequence of at least two points
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    points: Vec<Vec2>,
}

impl Polyline {
    /// Pair up `xs` and `ys` into a polyline
    ///
    /// Fails if the lists differ in length, hold fewer than two samples,
    /// contain a non-finite coordinate, or repeat a point back to back.
    pub fn from_samples(xs: &[f32], ys: &[f32]) -> Result<Self, CurveError> {
        if xs.len() != ys.len() {
            return Err(CurveError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        Self::from_points(xs.iter().zip(ys).map(|(&x, &y)| Vec2::new(x, y)).collect())
    }

    /// Validate an already paired point list
    pub fn from_points(points: Vec<Vec2>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewSamples(points.len()));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(CurveError::NonFinite { index });
        }
        if let Some(index) = points.windows(2).position(|w| w[0] == w[1]) {
            return Err(CurveError::RepeatedPoint { index: index + 1 });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a polyline holds at least two points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments (one fewer than points)
    pub fn segment_count(&self) -> usize {
        self.points.len() - 1
    }

    /// Segments between consecutive points, in input order
    pub fn segments(&self) -> impl Iterator<Item = EdgeShape> + '_ {
        self.points.windows(2).map(|w| EdgeShape::new(w[0], w[1]))
    }

    /// Segments joining points `start..=end`
    ///
    /// Returns an empty iterator when `start == end`. Callers validate the
    /// range first; out-of-range indices are clipped to the polyline.
    pub fn segments_between(&self, start: usize, end: usize) -> impl Iterator<Item = EdgeShape> + '_ {
        let end = end.min(self.points.len() - 1);
        let start = start.min(end);
        self.points[start..=end].windows(2).map(|w| EdgeShape::new(w[0], w[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_follow_input_order() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 0.5, 0.25, 1.0];
        let line = Polyline::from_samples(&xs, &ys).unwrap();

        let segments: Vec<EdgeShape> = line.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(line.segment_count(), 3);
        for (i, seg) in segments.iter().enumerate() {
            assert_eq!(seg.v1, Vec2::new(xs[i], ys[i]));
            assert_eq!(seg.v2, Vec2::new(xs[i + 1], ys[i + 1]));
        }
    }

    #[test]
    fn test_two_samples_make_one_segment() {
        let line = Polyline::from_samples(&[0.0, 1.0], &[0.0, 0.0]).unwrap();
        assert_eq!(line.segments().count(), 1);
    }

    #[test]
    fn test_length_mismatch() {
        let err = Polyline::from_samples(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap_err();
        assert_eq!(err, CurveError::LengthMismatch { xs: 3, ys: 2 });
    }

    #[test]
    fn test_too_few_samples() {
        assert_eq!(
            Polyline::from_samples(&[1.0], &[1.0]).unwrap_err(),
            CurveError::TooFewSamples(1)
        );
        assert_eq!(
            Polyline::from_samples(&[], &[]).unwrap_err(),
            CurveError::TooFewSamples(0)
        );
    }

    #[test]
    fn test_repeated_adjacent_point_is_degenerate() {
        let err = Polyline::from_samples(&[0.0, 1.0, 1.0, 2.0], &[0.0, 0.5, 0.5, 0.0]).unwrap_err();
        assert_eq!(err, CurveError::RepeatedPoint { index: 2 });
    }

    #[test]
    fn test_revisiting_a_point_later_is_allowed() {
        // Only back-to-back repeats produce a zero-length segment
        let line = Polyline::from_samples(&[0.0, 1.0, 0.0], &[0.0, 1.0, 0.0]).unwrap();
        assert_eq!(line.segment_count(), 2);
    }

    #[test]
    fn test_non_finite_sample() {
        let err = Polyline::from_samples(&[0.0, f32::NAN], &[0.0, 1.0]).unwrap_err();
        assert_eq!(err, CurveError::NonFinite { index: 1 });
    }

    #[test]
    fn test_segments_between() {
        let line = Polyline::from_samples(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0; 5]).unwrap();
        assert_eq!(line.segments_between(0, 2).count(), 2);
        assert_eq!(line.segments_between(2, 4).count(), 2);
        assert_eq!(line.segments_between(3, 3).count(), 0);
        let first = line.segments_between(1, 4).next().unwrap();
        assert_eq!(first.v1, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_curve_samples_to_polyline() {
        let samples = CurveSamples::new(vec![0.0, 1.0], vec![2.0, 3.0]);
        let line = samples.to_polyline().unwrap();
        assert_eq!(line.points(), &[Vec2::new(0.0, 2.0), Vec2::new(1.0, 3.0)]);
    }
}
