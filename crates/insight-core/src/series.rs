//! Price/forecast time series with explicit gap semantics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated observation in the series
///
/// Historical rows carry `price` only; forecast rows usually add `upper`
/// and `lower` confidence bounds. A point with none of the three is a
/// rendering gap, not an error, and renderers must break the price line
/// rather than interpolate across it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub price: Option<f64>,
    pub upper: Option<f64>,
    pub lower: Option<f64>,
}

impl ChartPoint {
    /// A date-only point, rendered as a gap
    pub fn gap(date: NaiveDate) -> Self {
        Self {
            date,
            price: None,
            upper: None,
            lower: None,
        }
    }

    /// Whether a filled confidence band may be drawn at this point
    ///
    /// Both bounds must be present; a lone bound never renders.
    pub fn has_band(&self) -> bool {
        self.upper.is_some() && self.lower.is_some()
    }

    /// Whether this point carries no numeric data at all
    pub fn is_gap(&self) -> bool {
        self.price.is_none() && self.upper.is_none() && self.lower.is_none()
    }
}

/// An ordered, validated series ready for rendering
///
/// An empty series is a distinct presentation state (placeholder) from a
/// populated series containing gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(points: Vec<ChartPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether dates are monotonically non-decreasing
    ///
    /// Duplicate dates are allowed; the producer pre-sorts and the series
    /// is never reordered on this side.
    pub fn is_chronological(&self) -> bool {
        self.points.windows(2).all(|pair| pair[0].date <= pair[1].date)
    }

    /// First and last date, when the series is non-empty
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    /// Min and max over prices and band edges, for axis scaling
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for point in &self.points {
            for value in [point.price, point.lower, point.upper].into_iter().flatten() {
                bounds = Some(match bounds {
                    Some((min, max)) => (min.min(value), max.max(value)),
                    None => (value, value),
                });
            }
        }
        bounds
    }
}
