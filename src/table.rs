//! Column-oriented result tables.

use std::cmp::Ordering;
use std::fmt;

use crate::math::Scalar;
use crate::point::DataPoint;
use crate::uncertain::Uncertain;

/// A derived quantity that can be tabulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Angular frequency `w`.
    AngularFrequency,
    /// Current from the measured voltage.
    MeasuredCurrent,
    /// Current predicted by the series RLC model.
    TheoreticalCurrent,
    /// Dissipated power.
    Power,
}

impl Column {
    /// Header of the nominal-value column.
    #[must_use]
    pub fn value_header(self) -> &'static str {
        match self {
            Self::AngularFrequency => "w (Hz)",
            Self::MeasuredCurrent => "Im (A)",
            Self::TheoreticalCurrent => "It (A)",
            Self::Power => "P (W)",
        }
    }

    /// Header of the standard-deviation column.
    #[must_use]
    pub fn error_header(self) -> &'static str {
        match self {
            Self::AngularFrequency => "w error",
            Self::MeasuredCurrent => "Im error",
            Self::TheoreticalCurrent => "It error",
            Self::Power => "P error",
        }
    }

    /// Picks this quantity out of a point.
    #[must_use]
    pub fn of(self, point: &DataPoint) -> &Uncertain {
        match self {
            Self::AngularFrequency => &point.angular_frequency,
            Self::MeasuredCurrent => &point.measured_current,
            Self::TheoreticalCurrent => &point.theoretical_current,
            Self::Power => &point.power,
        }
    }
}

#[derive(Debug, Clone)]
struct ColumnData {
    column: Column,
    values: Vec<Scalar>,
    errors: Vec<Scalar>,
}

/// Nominal values and standard deviations per column, one row per point,
/// rows sorted by ascending angular frequency.
#[derive(Debug, Clone)]
pub struct ResultTable {
    index: Vec<usize>,
    columns: Vec<ColumnData>,
}

fn nan_last(a: Scalar, b: Scalar) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

impl ResultTable {
    /// Tabulates `columns` for `points`; the angular frequency column is always first.
    #[must_use]
    pub fn tabularise(points: &[DataPoint], columns: &[Column]) -> Self {
        let mut index: Vec<usize> = (0..points.len()).collect();
        index.sort_by(|&a, &b| {
            nan_last(
                points[a].angular_frequency.nominal(),
                points[b].angular_frequency.nominal(),
            )
        });

        let mut selected = vec![Column::AngularFrequency];
        selected.extend(
            columns
                .iter()
                .copied()
                .filter(|c| *c != Column::AngularFrequency),
        );

        let columns = selected
            .into_iter()
            .map(|column| {
                let (values, errors): (Vec<Scalar>, Vec<Scalar>) = index
                    .iter()
                    .map(|&i| {
                        let q = column.of(&points[i]);
                        (q.nominal(), q.std_dev())
                    })
                    .unzip();
                ColumnData {
                    column,
                    values,
                    errors,
                }
            })
            .collect();

        Self { index, columns }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Position of each row in the input, i.e. bench order.
    #[must_use]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Tabulated quantities, angular frequency first.
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().map(|c| c.column)
    }

    fn find(&self, column: Column) -> Option<&ColumnData> {
        self.columns.iter().find(|c| c.column == column)
    }

    /// Nominal values of `column`, if tabulated.
    #[must_use]
    pub fn values(&self, column: Column) -> Option<&[Scalar]> {
        self.find(column).map(|c| c.values.as_slice())
    }

    /// Standard deviations of `column`, if tabulated.
    #[must_use]
    pub fn errors(&self, column: Column) -> Option<&[Scalar]> {
        self.find(column).map(|c| c.errors.as_slice())
    }

    /// Value headers followed by error headers.
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .map(|c| c.column.value_header())
            .chain(self.columns.iter().map(|c| c.column.error_header()))
            .collect()
    }

    /// Row-major cells in header order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Scalar>> + '_ {
        (0..self.len()).map(move |row| {
            self.columns
                .iter()
                .map(|c| c.values[row])
                .chain(self.columns.iter().map(|c| c.errors[row]))
                .collect()
        })
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = self.headers();
        let cells: Vec<Vec<String>> = self
            .rows()
            .map(|row| row.iter().map(|v| format!("{v:.6e}")).collect())
            .collect();

        let index_width = self
            .index
            .iter()
            .map(|i| i.to_string().len())
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(col, h)| {
                cells
                    .iter()
                    .map(|row| row[col].len())
                    .chain(std::iter::once(h.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:index_width$}", "")?;
        for (h, w) in headers.iter().zip(&widths) {
            write!(f, "  {h:>w$}")?;
        }
        for (i, row) in self.index.iter().zip(&cells) {
            writeln!(f)?;
            write!(f, "{i:<index_width$}")?;
            for (cell, w) in row.iter().zip(&widths) {
                write!(f, "  {cell:>w$}")?;
            }
        }
        Ok(())
    }
}
