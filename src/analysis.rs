//! The two bench analyses: current and power against angular frequency.

use tracing::info;

use crate::circuits::{CircuitConstants, SeriesRlc};
use crate::constants::resistance_with_tolerance;
use crate::dataset::Dataset;
use crate::errors::AnalysisError;
use crate::math::Scalar;
use crate::plot::{Chart, Series, BLUE, GREEN};
use crate::point::{process_raw, DataPoint};
use crate::sweep::{logspace, sweep_map};
use crate::table::{Column, ResultTable};
use crate::uncertain::Uncertain;

/// Samples in a model curve.
pub const MODEL_CURVE_SAMPLES: usize = 400;

/// Which quantity is analysed against angular frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    /// Measured and theoretical current.
    Current,
    /// Power dissipated in the resistor.
    Power,
}

impl AnalysisKind {
    /// Tabulated quantities besides angular frequency.
    #[must_use]
    pub fn columns(self) -> &'static [Column] {
        match self {
            Self::Current => &[Column::MeasuredCurrent, Column::TheoreticalCurrent],
            Self::Power => &[Column::Power],
        }
    }

    /// Whether every derived point is printed without `--print-points`.
    #[must_use]
    pub const fn lists_points(self) -> bool {
        matches!(self, Self::Power)
    }

    fn title(self, resistance: Scalar) -> String {
        match self {
            Self::Current => format!("I vs w for R={resistance}"),
            Self::Power => "P vs w".to_string(),
        }
    }

    fn y_label(self) -> &'static str {
        match self {
            Self::Current => "I (A)",
            Self::Power => "P (W)",
        }
    }

    fn series_style(column: Column) -> (&'static str, [u8; 3]) {
        match column {
            Column::TheoreticalCurrent => ("Theoretical Current", GREEN),
            Column::Power => ("Measured Power", BLUE),
            Column::MeasuredCurrent | Column::AngularFrequency => ("Measured Current", BLUE),
        }
    }

    /// Nominal model prediction at angular frequency `omega`.
    fn model(self, rlc: &SeriesRlc, omega: Scalar) -> Scalar {
        let current = rlc.current(&Uncertain::exact(omega)).nominal();
        match self {
            Self::Current => current,
            Self::Power => rlc.resistor().resistance().nominal() * current * current / 2.0,
        }
    }
}

/// Settings for one analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Quantity analysed.
    pub kind: AnalysisKind,
    /// Readings to analyse.
    pub dataset: Dataset,
    /// Resistance in ohms assigned to every reading.
    pub resistance: Scalar,
    /// Shared component values.
    pub constants: CircuitConstants,
    /// Overlay the nominal model prediction as a smooth line.
    pub model_curve: bool,
}

/// Output of [`Analysis::run`].
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Points in bench order.
    pub points: Vec<DataPoint>,
    /// Table sorted by angular frequency.
    pub table: ResultTable,
    /// Chart of the table.
    pub chart: Chart,
    /// Resonant angular frequency of the modelled loop.
    pub resonance: Uncertain,
    /// Quality factor of the modelled loop.
    pub quality_factor: Uncertain,
}

impl Analysis {
    /// Creates a run with the bench constants and no model curve.
    #[must_use]
    pub fn new(kind: AnalysisKind, dataset: Dataset, resistance: Scalar) -> Self {
        Self {
            kind,
            dataset,
            resistance,
            constants: CircuitConstants::default(),
            model_curve: false,
        }
    }

    /// Derives, tabulates and charts every reading.
    ///
    /// The current analysis refuses data recorded with a different resistor.
    pub fn run(&self) -> Result<AnalysisReport, AnalysisError> {
        if self.dataset.is_empty() {
            return Err(AnalysisError::EmptyDataset(self.dataset.name.clone()));
        }
        if self.kind == AnalysisKind::Current {
            self.dataset.check_resistance(self.resistance)?;
        }

        let points = process_raw(&self.dataset, self.resistance, &self.constants);
        let table = ResultTable::tabularise(&points, self.kind.columns());
        let rlc = SeriesRlc::new(&self.constants, resistance_with_tolerance(self.resistance));
        let chart = self.chart(&table, &rlc);

        let resonance = rlc.resonant_angular_frequency();
        let quality_factor = rlc.quality_factor();
        info!(
            kind = ?self.kind,
            dataset = %self.dataset.name,
            resistance = self.resistance,
            points = points.len(),
            resonance = %resonance,
            "analysis complete"
        );

        Ok(AnalysisReport {
            points,
            table,
            chart,
            resonance,
            quality_factor,
        })
    }

    fn chart(&self, table: &ResultTable, rlc: &SeriesRlc) -> Chart {
        let w = table.values(Column::AngularFrequency).unwrap_or_default();
        let w_err = table.errors(Column::AngularFrequency).unwrap_or_default();

        let mut series: Vec<Series> = self
            .kind
            .columns()
            .iter()
            .map(|&column| {
                let (label, color) = AnalysisKind::series_style(column);
                Series::with_errors(
                    label,
                    w,
                    table.values(column).unwrap_or_default(),
                    w_err,
                    table.errors(column).unwrap_or_default(),
                    color,
                )
            })
            .collect();

        if self.model_curve {
            if let (Some(&lo), Some(&hi)) = (w.first(), w.last()) {
                let kind = self.kind;
                let curve = sweep_map(logspace(lo, hi, MODEL_CURVE_SAMPLES), |omega| {
                    kind.model(rlc, omega)
                });
                series.push(Series::line("Model", curve, GREEN));
            }
        }

        Chart {
            title: self.kind.title(self.resistance),
            x_label: Column::AngularFrequency.value_header().to_string(),
            y_label: self.kind.y_label().to_string(),
            series,
            legend: self.kind == AnalysisKind::Current,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::plot::SeriesStyle;

    #[test]
    fn current_analysis_charts_two_series() {
        let report = Analysis::new(AnalysisKind::Current, Dataset::r100(), 100.0)
            .run()
            .expect("matching dataset");
        assert_eq!(report.table.len(), 21);
        assert_eq!(report.chart.title, "I vs w for R=100");
        assert_eq!(report.chart.x_label, "w (Hz)");
        assert_eq!(report.chart.y_label, "I (A)");
        assert!(report.chart.legend);
        let labels: Vec<&str> = report.chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Measured Current", "Theoretical Current"]);
        assert_eq!(report.chart.series[0].points.len(), 21);
    }

    #[test]
    fn current_analysis_rejects_wrong_dataset() {
        let err = Analysis::new(AnalysisKind::Current, Dataset::r100(), 1_000.0)
            .run()
            .unwrap_err();
        assert!(matches!(err, AnalysisError::DatasetMismatch { .. }));
    }

    #[test]
    fn power_analysis_accepts_any_resistance() {
        let report = Analysis::new(AnalysisKind::Power, Dataset::r100(), 1_000.0)
            .run()
            .expect("no guard for power");
        assert_eq!(report.chart.title, "P vs w");
        assert!(!report.chart.legend);
        assert_eq!(report.chart.series.len(), 1);
        assert_eq!(
            report.table.headers(),
            vec!["w (Hz)", "P (W)", "w error", "P error"]
        );
    }

    #[test]
    fn only_power_lists_points_by_default() {
        assert!(AnalysisKind::Power.lists_points());
        assert!(!AnalysisKind::Current.lists_points());
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let empty = Dataset::new("none", 100.0, Vec::new());
        assert!(matches!(
            Analysis::new(AnalysisKind::Power, empty, 100.0).run(),
            Err(AnalysisError::EmptyDataset(_))
        ));
    }

    #[test]
    fn measured_peak_sits_near_modelled_resonance() {
        let report = Analysis::new(AnalysisKind::Current, Dataset::r1000(), 1_000.0)
            .run()
            .expect("matching dataset");
        let w = report.table.values(Column::AngularFrequency).expect("present");
        let im = report.table.values(Column::MeasuredCurrent).expect("present");
        let peak = im
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| w[i])
            .expect("non-empty");
        let w0 = report.resonance.nominal();
        assert!((peak - w0).abs() / w0 < 0.05, "peak {peak} vs resonance {w0}");
    }

    #[test]
    fn model_curve_spans_measured_range() {
        let mut analysis = Analysis::new(AnalysisKind::Current, Dataset::r100(), 100.0);
        analysis.model_curve = true;
        let report = analysis.run().expect("matching dataset");
        let model = report.chart.series.last().expect("model series");
        assert_eq!(model.style, SeriesStyle::Line);
        assert_eq!(model.points.len(), MODEL_CURVE_SAMPLES);

        let w = report.table.values(Column::AngularFrequency).expect("present");
        assert_relative_eq!(model.points[0][0], w[0], max_relative = 1.0e-9);
        assert_relative_eq!(model.points[MODEL_CURVE_SAMPLES - 1][0], w[w.len() - 1], max_relative = 1.0e-9);
    }
}
