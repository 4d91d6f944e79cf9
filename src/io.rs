//! Reading segments and writing intersection points as text.
//!
//! The input has the number of segments on the first line, followed by
//! one segment per line as four whitespace separated numbers
//! `x1 y1 x2 y2`. Blank lines are skipped. The output has the number of
//! points on the first line, followed by one `x y` line per point with
//! three decimals.
use std::{convert::TryFrom, fmt::Write as _, io::Write};

use geo::{Coordinate, Line};

use crate::{events::SweepPoint, segments::Segment, Error};

/// Parse the segment rows of `input` as lines.
///
/// Zero-length lines are returned as is; see [`parse_segments`].
pub fn parse_lines(input: &str) -> Result<Vec<Line<f64>>, Error> {
    let mut rows = input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_no, header) = match rows.next() {
        Some(row) => row,
        None => return Err(Error::format(1, "missing segment count")),
    };
    let count: usize = header
        .parse()
        .map_err(|_| Error::format(header_no, format!("invalid segment count {:?}", header)))?;

    let lines = rows
        .map(|(line_no, row)| parse_row(line_no, row))
        .collect::<Result<Vec<_>, _>>()?;
    if lines.len() != count {
        return Err(Error::format(
            header_no,
            format!("expected {} segments, found {}", count, lines.len()),
        ));
    }
    Ok(lines)
}

fn parse_row(line_no: usize, row: &str) -> Result<Line<f64>, Error> {
    let values = row
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| Error::format(line_no, format!("invalid number {:?}", token)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match *values.as_slice() {
        [x1, y1, x2, y2] => Ok(Line::new(
            Coordinate { x: x1, y: y1 },
            Coordinate { x: x2, y: y2 },
        )),
        _ => Err(Error::format(
            line_no,
            format!("expected 4 coordinates, found {}", values.len()),
        )),
    }
}

/// Parse `input` into segments, failing on the first invalid one.
pub fn parse_segments(input: &str) -> Result<Vec<Segment>, Error> {
    parse_lines(input)?
        .into_iter()
        .map(Segment::try_from)
        .collect()
}

/// Write `points` in the output format.
pub fn write_points<W: Write>(mut out: W, points: &[SweepPoint]) -> std::io::Result<()> {
    writeln!(out, "{}", points.len())?;
    for pt in points {
        writeln!(out, "{:.3} {:.3}", pt.x(), pt.y())?;
    }
    Ok(())
}

/// Format `points` in the output format.
pub fn format_points(points: &[SweepPoint]) -> String {
    let mut buf = format!("{}\n", points.len());
    for pt in points {
        let _ = writeln!(buf, "{:.3} {:.3}", pt.x(), pt.y());
    }
    buf
}
