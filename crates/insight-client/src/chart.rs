//! Adaptation of raw chart records into a renderable series

use crate::payload::RawChartPoint;
use chrono::NaiveDate;
use insight_core::series::{ChartPoint, ChartSeries};
use tracing::{debug, warn};

/// Convert raw point records into a validated [`ChartSeries`]
///
/// Empty input yields an empty series (the placeholder presentation
/// state). Points keep their incoming order; a point whose date cannot be
/// parsed is dropped, and a confidence band that contradicts its own
/// price is discarded while the price survives. Missing numerics stay
/// missing so the renderer can show a gap instead of a false zero.
pub fn adapt(points: &[RawChartPoint]) -> ChartSeries {
    let mut adapted = Vec::with_capacity(points.len());
    for raw in points {
        let Some(date) = raw.date.as_deref().and_then(parse_date) else {
            debug!(date = ?raw.date, "dropping chart point without a parseable date");
            continue;
        };
        adapted.push(validate_band(ChartPoint {
            date,
            price: raw.price,
            upper: raw.upper,
            lower: raw.lower,
        }));
    }

    let series = ChartSeries::new(adapted);
    if !series.is_chronological() {
        // Producer contract violation, not a client failure; render as received.
        warn!("chart series arrived out of date order");
    }
    series
}

/// Parse a point date: the producer emits `%Y-%m-%d`, with RFC 3339
/// timestamps seen from older backends
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        chrono::DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    })
}

/// Enforce `lower <= price <= upper` where all three are present
fn validate_band(mut point: ChartPoint) -> ChartPoint {
    if let (Some(price), Some(upper), Some(lower)) = (point.price, point.upper, point.lower) {
        if !(lower <= price && price <= upper) {
            warn!(
                date = %point.date,
                price, upper, lower,
                "discarding confidence band that contradicts its price"
            );
            point.upper = None;
            point.lower = None;
        }
    }
    point
}
