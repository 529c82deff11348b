use std::io::prelude::*;

use bstr::io::BufReadExt;
use bstr::{BString, ByteSlice};
use log::debug;

use crate::error::{Error, Result};

/// Reads an edge list: one edge per line as two whitespace-separated
/// node names. Blank lines and lines starting with `#` are skipped. A
/// line with any other number of fields fails with
/// [`Error::MalformedEdge`], reporting its 1-based line number.
pub fn read_edges<R: BufRead>(reader: R) -> Result<Vec<(BString, BString)>> {
    let mut edges = Vec::new();

    for (ix, line) in reader.byte_lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(b"#") {
            continue;
        }

        let fields: Vec<&[u8]> = line.fields().collect();
        match fields.as_slice() {
            [from, to] => {
                edges.push((BString::from(*from), BString::from(*to)))
            }
            _ => {
                return Err(Error::MalformedEdge {
                    index: ix + 1,
                    len: fields.len(),
                })
            }
        }
    }
    debug!("read {} edges", edges.len());
    Ok(edges)
}

/// Reads a grid of single-character labels, one row per non-blank line.
/// Whitespace between cells is ignored. Row lengths are checked when the
/// [`Grid`](crate::Grid) is built.
pub fn read_grid<R: BufRead>(reader: R) -> Result<Vec<Vec<char>>> {
    let mut rows = Vec::new();

    for line in reader.byte_lines() {
        let line = line?;
        let row: Vec<char> =
            line.chars().filter(|c| !c.is_whitespace()).collect();
        if !row.is_empty() {
            rows.push(row);
        }
    }
    debug!("read {} grid rows", rows.len());
    Ok(rows)
}
