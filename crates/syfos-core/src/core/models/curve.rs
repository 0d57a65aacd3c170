use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    #[error("Piezo and deflection sequences differ in length ({piezo} vs {deflection})")]
    LengthMismatch { piezo: usize, deflection: usize },
    #[error("Piezo values must be strictly increasing, violated at index {index}")]
    NonIncreasingPiezo { index: usize },
    #[error("Sample range {start}..{end} is out of bounds for a curve of {len} samples")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
}

/// A force-distance curve: deflection sampled along a strictly increasing piezo axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curve {
    piezo: Vec<f64>,
    deflection: Vec<f64>,
}

impl Curve {
    /// Creates a curve after checking that both sequences have the same length and
    /// that the piezo axis is strictly increasing.
    pub fn new(piezo: Vec<f64>, deflection: Vec<f64>) -> Result<Self, CurveError> {
        if piezo.len() != deflection.len() {
            return Err(CurveError::LengthMismatch {
                piezo: piezo.len(),
                deflection: deflection.len(),
            });
        }
        check_increasing(&piezo)?;
        Ok(Self { piezo, deflection })
    }

    /// Used by the generators, which construct the piezo axis themselves from a
    /// validated [`MeasurementSetup`](super::parameters::MeasurementSetup).
    pub(crate) fn from_samples(piezo: Vec<f64>, deflection: Vec<f64>) -> Self {
        debug_assert_eq!(piezo.len(), deflection.len());
        debug_assert!(check_increasing(&piezo).is_ok());
        Self { piezo, deflection }
    }

    #[inline]
    pub fn piezo(&self) -> &[f64] {
        &self.piezo
    }

    #[inline]
    pub fn deflection(&self) -> &[f64] {
        &self.deflection
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.piezo.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.piezo.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.piezo.iter().copied().zip(self.deflection.iter().copied())
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.piezo, self.deflection)
    }

    /// Borrowed view onto a contiguous index range.
    pub fn segment(&self, range: Range<usize>) -> Result<CurveSegment<'_>, CurveError> {
        if range.start > range.end || range.end > self.len() {
            return Err(CurveError::RangeOutOfBounds {
                start: range.start,
                end: range.end,
                len: self.len(),
            });
        }
        Ok(CurveSegment {
            offset: range.start,
            piezo: &self.piezo[range.clone()],
            deflection: &self.deflection[range],
        })
    }

    /// Returns a copy with both axes shifted by constant offsets.
    ///
    /// # Errors
    ///
    /// [`CurveError::NonIncreasingPiezo`] if the piezo offset is so large relative to
    /// the step between samples that neighbouring positions round to the same value.
    pub fn shifted(&self, piezo_offset: f64, deflection_offset: f64) -> Result<Self, CurveError> {
        let piezo: Vec<f64> = self.piezo.iter().map(|z| z + piezo_offset).collect();
        check_increasing(&piezo)?;
        Ok(Self {
            piezo,
            deflection: self.deflection.iter().map(|d| d + deflection_offset).collect(),
        })
    }

    /// Returns a curve on the same piezo axis with a replaced deflection sequence.
    pub(crate) fn with_deflection(&self, deflection: Vec<f64>) -> Self {
        debug_assert_eq!(self.piezo.len(), deflection.len());
        Self {
            piezo: self.piezo.clone(),
            deflection,
        }
    }
}

fn check_increasing(piezo: &[f64]) -> Result<(), CurveError> {
    match piezo.windows(2).position(|pair| !(pair[1] > pair[0])) {
        Some(index) => Err(CurveError::NonIncreasingPiezo { index: index + 1 }),
        None => Ok(()),
    }
}

/// Contiguous, borrowed slice of a [`Curve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSegment<'a> {
    /// Index of the first sample within the parent curve.
    pub offset: usize,
    pub piezo: &'a [f64],
    pub deflection: &'a [f64],
}

impl CurveSegment<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.piezo.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.piezo.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.piezo.iter().copied().zip(self.deflection.iter().copied())
    }
}

/// Bundle of the ideal curve, its offset copy and N noisy replicas.
///
/// Order is fixed: index 0 is the ideal curve, index 1 the shifted ideal curve and
/// every further index a replica sharing the shifted piezo axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceVolume {
    curves: Vec<Curve>,
}

impl ForceVolume {
    pub(crate) fn assemble(ideal: Curve, shifted: Curve, replicas: Vec<Curve>) -> Self {
        let mut curves = Vec::with_capacity(replicas.len() + 2);
        curves.push(ideal);
        curves.push(shifted);
        curves.extend(replicas);
        Self { curves }
    }

    #[inline]
    pub fn ideal(&self) -> &Curve {
        &self.curves[0]
    }

    #[inline]
    pub fn shifted(&self) -> &Curve {
        &self.curves[1]
    }

    #[inline]
    pub fn replicas(&self) -> &[Curve] {
        &self.curves[2..]
    }

    #[inline]
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Total number of curves, including the ideal and the shifted ideal curve.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}
