//! Rendering of the analysis view-model for the terminal
//!
//! Pure presentation: everything here reads the typed view-model and
//! produces text. The two chart rules that matter are made visible
//! rather than smoothed over: an empty series renders a placeholder (a
//! different state from a populated chart), and a point without a value
//! renders an explicit gap marker, never a zero.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use insight_client::AnalysisView;
use insight_core::report::{Fundamentals, Prediction, Source};
use insight_core::series::ChartSeries;
use insight_core::{Confidence, ConfidenceTone};

/// Shown instead of the series table when no chart data arrived
pub const NO_CHART_PLACEHOLDER: &str = "No chart data available yet.";

/// Marker for a missing value inside a populated series
const GAP_MARKER: &str = "-";

/// Render the full report
pub fn render_view(view: &AnalysisView) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}  AI Executive Summary\n\n",
        confidence_badge(view.analysis.confidence)
    ));
    out.push_str(view.analysis.analysis_text.trim());
    out.push('\n');

    if let Some(summary) = &view.analysis.sentiment_summary {
        out.push_str(&format!("\nMarket sentiment: {summary}\n"));
    }

    if let Some(fundamentals) = &view.fundamentals {
        out.push_str("\nFundamental Health\n");
        out.push_str(&fundamentals_table(fundamentals).to_string());
        out.push('\n');
    }

    if view.analysis.prediction_summary.is_some() || view.prediction.is_some() {
        out.push_str("\nTechnical Outlook\n");
        if let Some(summary) = &view.analysis.prediction_summary {
            out.push_str(summary);
            out.push('\n');
        }
        if let Some(prediction) = &view.prediction {
            out.push_str(&forecast_lines(prediction));
        }
    }

    out.push_str("\nPrice Forecast & Confidence Interval\n");
    if view.series.is_empty() {
        out.push_str(NO_CHART_PLACEHOLDER);
        out.push('\n');
    } else {
        out.push_str(&series_table(&view.series).to_string());
        out.push('\n');
    }

    if let Some(risks) = &view.analysis.risk_factors {
        out.push_str(&format!("\nCritical Risk Factors\n{risks}\n"));
    }

    if !view.sources.is_empty() {
        out.push_str("\nNews Sources Analyzed\n");
        out.push_str(&sources_lines(&view.sources));
    }

    if let Some(disclaimer) = &view.analysis.disclaimer {
        out.push_str(&format!("\n{disclaimer}\n"));
    }

    out
}

/// Badge text for the confidence classification
///
/// The tone decides the accent; the label stays the backend's spelling.
pub fn confidence_badge(confidence: Confidence) -> String {
    let accent = match confidence.tone() {
        ConfidenceTone::Positive => "+",
        ConfidenceTone::Neutral => "~",
        ConfidenceTone::Caution => "!",
    };
    format!("[{accent} {} Confidence]", confidence.label())
}

fn fundamentals_table(fundamentals: &Fundamentals) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let trends = fundamentals.financial_trends.as_ref();

    let revenue = trends
        .and_then(|t| t.recent_quarterly_revenue.first().cloned())
        .unwrap_or_else(|| "N/A".to_string());
    let growth = trends.map_or(String::new(), |t| {
        let direction = if t.is_growing() { "up" } else { "down" };
        t.revenue_growth_last_q
            .as_deref()
            .map(|g| format!(" ({direction} {g})"))
            .unwrap_or_default()
    });
    table.add_row(vec![
        "Quarterly Revenue".to_string(),
        format!("{revenue}{growth}"),
    ]);

    table.add_row(vec![
        "P/E Ratio".to_string(),
        fundamentals
            .pe_ratio
            .map_or_else(|| "N/A".to_string(), |pe| format!("{pe:.2}")),
    ]);

    table.add_row(vec![
        "Profit Margin".to_string(),
        trends
            .and_then(|t| t.recent_profit_margins.first().cloned())
            .unwrap_or_else(|| "N/A".to_string()),
    ]);

    if let Some(sector) = &fundamentals.sector {
        table.add_row(vec!["Sector".to_string(), sector.clone()]);
    }

    table
}

fn forecast_lines(prediction: &Prediction) -> String {
    let mut out = String::new();
    if let Some(target) = prediction.forecast_7d {
        out.push_str(&format!("7-Day Target: ${target:.2}\n"));
    }
    if let Some((low, high)) = prediction.forecast_range() {
        out.push_str(&format!("90% Confidence Band: ${low:.2} to ${high:.2}\n"));
    }
    out
}

fn series_table(series: &ChartSeries) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Price", "Band"]);

    for point in series.points() {
        let price = point
            .price
            .map_or_else(|| GAP_MARKER.to_string(), |p| format!("{p:.2}"));
        // A filled band needs both bounds; a lone bound renders as a gap
        let band = if point.has_band() {
            match (point.lower, point.upper) {
                (Some(lower), Some(upper)) => format!("{lower:.2} .. {upper:.2}"),
                _ => GAP_MARKER.to_string(),
            }
        } else {
            GAP_MARKER.to_string()
        };
        table.add_row(vec![point.date.to_string(), price, band]);
    }

    table
}

fn sources_lines(sources: &[Source]) -> String {
    let mut out = String::new();
    for (index, source) in sources.iter().enumerate() {
        out.push_str(&format!("[{}] {} {}\n", index + 1, source.title, source.url));
    }
    out
}
