//! CSV export of result tables.

use std::io::{self, Write};

use crate::table::ResultTable;

/// Writes `table` as CSV: the table headers, then one line per row in sorted order.
pub fn write_table_csv<W: Write>(mut w: W, table: &ResultTable) -> io::Result<()> {
    writeln!(w, "{}", table.headers().join(","))?;
    for row in table.rows() {
        let line: Vec<String> = row.iter().map(|v| format!("{v:.16e}")).collect();
        writeln!(w, "{}", line.join(","))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitConstants;
    use crate::dataset::Dataset;
    use crate::point::process_raw;
    use crate::table::Column;

    #[test]
    fn csv_has_header_and_rows() {
        let points = process_raw(&Dataset::r1000(), 1_000.0, &CircuitConstants::default());
        let table = ResultTable::tabularise(&points, &[Column::Power]);

        let mut buf = Vec::new();
        write_table_csv(&mut buf, &table).expect("write to vec");
        let text = String::from_utf8(buf).expect("utf8");
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("w (Hz),P (W),w error,P error"));
        let first: Vec<f64> = lines
            .next()
            .expect("first row")
            .split(',')
            .map(|cell| cell.parse().expect("number"))
            .collect();
        assert_eq!(first.len(), 4);
        assert_eq!(first[0], table.values(Column::AngularFrequency).expect("present")[0]);
        assert_eq!(lines.count(), 16);
    }
}
