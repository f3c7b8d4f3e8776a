//! Chart descriptions and error-bar geometry.
//!
//! A [`Chart`] is plain data: it can be inspected in tests, and it is what the
//! native window (feature `plot`) renders.

use crate::math::Scalar;

#[cfg(feature = "plot")]
mod window;

#[cfg(feature = "plot")]
pub use window::show;

/// Cap half-width as a fraction of the axis span the cap lies along.
pub const CAP_FRACTION: Scalar = 0.004;

/// RGB colour of a series.
pub type Rgb = [u8; 3];

/// Blue used for measured data.
pub const BLUE: Rgb = [31, 119, 180];
/// Green used for model predictions.
pub const GREEN: Rgb = [44, 160, 44];
/// Colour of every error bar.
pub const ERROR_BAR: Rgb = [0, 0, 0];

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    /// Markers joined by a line, with error bars.
    ErrorBars,
    /// A smooth line without markers.
    Line,
}

/// One plotted series.
#[derive(Debug, Clone)]
pub struct Series {
    /// Legend label.
    pub label: String,
    /// `[x, y]` points in drawing order.
    pub points: Vec<[Scalar; 2]>,
    /// Horizontal 1σ error per point.
    pub x_err: Vec<Scalar>,
    /// Vertical 1σ error per point.
    pub y_err: Vec<Scalar>,
    /// Marker and line colour.
    pub color: Rgb,
    /// Drawing style.
    pub style: SeriesStyle,
}

impl Series {
    /// Series of measured points with error bars.
    #[must_use]
    pub fn with_errors(
        label: impl Into<String>,
        x: &[Scalar],
        y: &[Scalar],
        x_err: &[Scalar],
        y_err: &[Scalar],
        color: Rgb,
    ) -> Self {
        Self {
            label: label.into(),
            points: x.iter().zip(y).map(|(&x, &y)| [x, y]).collect(),
            x_err: x_err.to_vec(),
            y_err: y_err.to_vec(),
            color,
            style: SeriesStyle::ErrorBars,
        }
    }

    /// Error-free line through `points`.
    #[must_use]
    pub fn line(label: impl Into<String>, points: Vec<[Scalar; 2]>, color: Rgb) -> Self {
        Self {
            label: label.into(),
            points,
            x_err: Vec::new(),
            y_err: Vec::new(),
            color,
            style: SeriesStyle::Line,
        }
    }
}

/// A titled chart with labelled axes.
#[derive(Debug, Clone)]
pub struct Chart {
    /// Window and chart title.
    pub title: String,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// Series in drawing order.
    pub series: Vec<Series>,
    /// Whether a legend is shown.
    pub legend: bool,
}

/// A straight segment between two plot-space points.
pub type Segment = [[Scalar; 2]; 2];

fn span(values: impl Iterator<Item = Scalar>) -> Scalar {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((Scalar::INFINITY, Scalar::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if hi > lo {
        hi - lo
    } else {
        0.0
    }
}

/// Whiskers and caps for every non-zero error of `series`.
///
/// Caps are sized relative to the series' extent along the cap direction, so
/// they keep a constant on-screen proportion of the data range.
#[must_use]
pub fn error_bar_segments(series: &Series) -> Vec<Segment> {
    let cap_x = CAP_FRACTION * span(series.points.iter().map(|p| p[0]));
    let cap_y = CAP_FRACTION * span(series.points.iter().map(|p| p[1]));

    let mut segments = Vec::new();
    for (i, &[x, y]) in series.points.iter().enumerate() {
        let ey = series.y_err.get(i).copied().unwrap_or(0.0);
        if ey > 0.0 {
            let (lo, hi) = (y - ey, y + ey);
            segments.push([[x, lo], [x, hi]]);
            segments.push([[x - cap_x, lo], [x + cap_x, lo]]);
            segments.push([[x - cap_x, hi], [x + cap_x, hi]]);
        }
        let ex = series.x_err.get(i).copied().unwrap_or(0.0);
        if ex > 0.0 {
            let (lo, hi) = (x - ex, x + ex);
            segments.push([[lo, y], [hi, y]]);
            segments.push([[lo, y - cap_y], [lo, y + cap_y]]);
            segments.push([[hi, y - cap_y], [hi, y + cap_y]]);
        }
    }
    segments
}
