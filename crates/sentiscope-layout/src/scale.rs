#![forbid(unsafe_code)]

//! Linear numeric scales.

use serde::Serialize;

/// Maps a numeric domain linearly onto an output range.
///
/// A degenerate domain (`min == max`) maps every input to the midpoint of the
/// range, so scaling a collection of identical values never divides by zero.
/// Inputs outside the domain are extrapolated, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale over the observed min/max of `values`.
    ///
    /// NaN values are ignored. An empty (or all-NaN) input produces a
    /// degenerate `(0, 0)` domain.
    pub fn from_extent(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        let extent = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            });
        Self::new(extent.unwrap_or((0.0, 0.0)), range)
    }

    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }

    /// Map a domain value into the range.
    ///
    /// Differences are taken on halved operands so that a domain spanning
    /// most of `f64` stays finite.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return (r0 + r1) / 2.0;
        }
        let t = (value / 2.0 - d0 / 2.0) / (d1 / 2.0 - d0 / 2.0);
        r0 + t * (r1 - r0)
    }
}
