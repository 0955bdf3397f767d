//! Readers for the tabular output of the search backends.
//!
//! Nucleotide and translated searches write BLAST-style tab separated rows
//! whose column order is set by the invocation (`-outfmt "6 ..."`);
//! structural search writes a whitespace aligned table (`--tblout --fmt 2`).

use std::io::{
    BufRead,
    Read,
};
use std::str::FromStr;

use crate::data_structs::enums::{
    Backend,
    Frame,
};
use crate::data_structs::hit::RawHit;
use crate::error::{
    AnnotError,
    AnnotResult,
};

pub const BLASTN_COLUMNS: &str =
    "qstart qend sseqid sframe pident slen qseq length sstart send qlen evalue";
pub const DIAMOND_COLUMNS: &str =
    "qstart qend sseqid pident slen qseq length sstart send qlen evalue";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Qstart,
    Qend,
    Sseqid,
    Sframe,
    Pident,
    Slen,
    Qseq,
    Length,
    Qlen,
    Evalue,
    /// Reported but not used.
    Other,
}

impl FromStr for Column {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "qstart" => Column::Qstart,
            "qend" => Column::Qend,
            "sseqid" => Column::Sseqid,
            "sframe" => Column::Sframe,
            "pident" => Column::Pident,
            "slen" => Column::Slen,
            "qseq" => Column::Qseq,
            "length" => Column::Length,
            "qlen" => Column::Qlen,
            "evalue" => Column::Evalue,
            _ => Column::Other,
        })
    }
}

/// Column order of a tabular output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularLayout {
    backend: Backend,
    columns: Vec<Column>,
}

impl TabularLayout {
    const REQUIRED: [(Column, &'static str); 5] = [
        (Column::Qstart, "qstart"),
        (Column::Qend, "qend"),
        (Column::Sseqid, "sseqid"),
        (Column::Slen, "slen"),
        (Column::Evalue, "evalue"),
    ];

    /// Parses a space separated column list, as passed to the backend.
    pub fn from_flags(
        backend: Backend,
        flags: &str,
    ) -> AnnotResult<Self> {
        let columns = flags
            .split_whitespace()
            .map(|s| Column::from_str(s).unwrap_or(Column::Other))
            .collect::<Vec<_>>();
        for (required, name) in Self::REQUIRED {
            if !columns.contains(&required) {
                return Err(AnnotError::MissingColumn {
                    backend,
                    column: name,
                });
            }
        }
        Ok(Self { backend, columns })
    }

    /// Column order this crate expects when none is configured.
    pub fn default_for(backend: Backend) -> Option<Self> {
        let flags = match backend {
            Backend::Blastn => BLASTN_COLUMNS,
            Backend::Diamond => DIAMOND_COLUMNS,
            Backend::Infernal => return None,
        };
        Self::from_flags(backend, flags).ok()
    }

    pub fn columns(&self) -> &[Column] { &self.columns }

    fn parse_row<'a, I>(
        &self,
        line: usize,
        fields: I,
    ) -> AnnotResult<RawHit>
    where
        I: IntoIterator<Item = &'a str>, {
        let fields = fields.into_iter().collect::<Vec<_>>();
        if fields.len() != self.columns.len() {
            return Err(AnnotError::ColumnCount {
                backend: self.backend,
                line,
                expected: self.columns.len(),
                found: fields.len(),
            });
        }

        let mut hit = RawHit::new(0, 0, String::new(), 0, 0.0);
        for (column, value) in self.columns.iter().zip(fields) {
            let backend = self.backend;
            match column {
                Column::Qstart => hit.qstart = parse_field(backend, line, "qstart", value)?,
                Column::Qend => hit.qend = parse_field(backend, line, "qend", value)?,
                Column::Sseqid => hit.sseqid = value.to_string(),
                Column::Sframe => {
                    hit.sframe = Some(value.parse().map_err(|_| {
                        malformed(backend, line, "sframe", value)
                    })?)
                },
                Column::Pident => hit.pident = Some(parse_float(backend, line, "pident", value)?),
                Column::Slen => hit.slen = parse_field(backend, line, "slen", value)?,
                Column::Qseq => hit.qseq = Some(value.to_string()),
                Column::Length => hit.length = Some(parse_field(backend, line, "length", value)?),
                Column::Qlen => hit.qlen = Some(parse_field(backend, line, "qlen", value)?),
                Column::Evalue => hit.evalue = parse_float(backend, line, "evalue", value)?,
                Column::Other => {},
            }
        }
        Ok(hit)
    }
}

fn malformed(
    backend: Backend,
    line: usize,
    field: &'static str,
    value: &str,
) -> AnnotError {
    AnnotError::MalformedField {
        backend,
        line,
        field,
        value: value.to_string(),
    }
}

fn parse_field<T: FromStr>(
    backend: Backend,
    line: usize,
    field: &'static str,
    value: &str,
) -> AnnotResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| malformed(backend, line, field, value))
}

/// `f64::from_str` accepts `nan` and `inf`; neither is a usable score input.
fn parse_float(
    backend: Backend,
    line: usize,
    field: &'static str,
    value: &str,
) -> AnnotResult<f64> {
    let parsed: f64 = parse_field(backend, line, field, value)?;
    if parsed.is_finite() {
        Ok(parsed)
    }
    else {
        Err(malformed(backend, line, field, value))
    }
}

/// Reads tab separated BLAST-style rows. Lines starting with `#` are
/// skipped.
pub fn read_tabular<R: Read>(
    reader: R,
    layout: &TabularLayout,
) -> AnnotResult<Vec<RawHit>> {
    let mut csv_reader = csv::ReaderBuilder::default()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut res = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);
        res.push(layout.parse_row(line, record.iter())?);
    }
    Ok(res)
}

const TBLOUT_MIN_FIELDS: usize = 18;

/// Reads a structural search table (`--tblout --fmt 2`).
///
/// Columns used: target name (1), model from/to (7, 8), sequence from/to
/// (9, 10), strand (11) and E-value (17). The subject length is the
/// covered model span.
pub fn read_tblout<R: BufRead>(reader: R) -> AnnotResult<Vec<RawHit>> {
    let backend = Backend::Infernal;
    let mut res = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields = trimmed.split_whitespace().collect::<Vec<_>>();
        if fields.len() < TBLOUT_MIN_FIELDS {
            return Err(AnnotError::ColumnCount {
                backend,
                line: line_no,
                expected: TBLOUT_MIN_FIELDS,
                found: fields.len(),
            });
        }

        let mdl_from: i64 = parse_field(backend, line_no, "mdl from", fields[7])?;
        let mdl_to: i64 = parse_field(backend, line_no, "mdl to", fields[8])?;
        let qstart = parse_field(backend, line_no, "seq from", fields[9])?;
        let qend = parse_field(backend, line_no, "seq to", fields[10])?;
        let sframe = Frame::from_str(fields[11])
            .map_err(|_| malformed(backend, line_no, "strand", fields[11]))?;
        let evalue = parse_float(backend, line_no, "E-value", fields[17])?;
        let slen = ((mdl_to - mdl_from).unsigned_abs() + 1) as u32;

        res.push(
            RawHit::new(qstart, qend, fields[1], slen, evalue).with_sframe(Some(sframe)),
        );
    }
    Ok(res)
}

/// Reads backend output with the given column list, or the default layout
/// for the backend.
pub fn read_hits<R: BufRead>(
    reader: R,
    backend: Backend,
    columns: Option<&str>,
) -> AnnotResult<Vec<RawHit>> {
    match (backend, columns) {
        (Backend::Infernal, _) => read_tblout(reader),
        (_, Some(flags)) => read_tabular(reader, &TabularLayout::from_flags(backend, flags)?),
        (_, None) => {
            let layout = TabularLayout::default_for(backend).ok_or(AnnotError::MissingColumn {
                backend,
                column: "qstart",
            })?;
            read_tabular(reader, &layout)
        },
    }
}
