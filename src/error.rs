use thiserror::Error;

use crate::data_structs::enums::Backend;
use crate::data_structs::typedef::PosType;

/// Errors raised while turning backend rows into resolved features.
///
/// An empty hit list is never an error; callers receive an empty
/// [`ResolvedFeatureSet`](crate::annotate::ResolvedFeatureSet) instead.
#[derive(Debug, Error)]
pub enum AnnotError {
    #[error("{backend} line {line}: could not parse {field} from {value:?}")]
    MalformedField {
        backend: Backend,
        line:    usize,
        field:   &'static str,
        value:   String,
    },
    #[error("{backend} line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        backend:  Backend,
        line:     usize,
        expected: usize,
        found:    usize,
    },
    #[error("{backend} column layout is missing required column {column:?}")]
    MissingColumn {
        backend: Backend,
        column:  &'static str,
    },
    #[error("{backend} hit {sseqid} is missing {field}")]
    MissingField {
        backend: Backend,
        sseqid:  String,
        field:   &'static str,
    },
    #[error("{backend} hit {sseqid}: coordinate {value} is not a 1-based position")]
    InvalidCoordinate {
        backend: Backend,
        sseqid:  String,
        value:   i64,
    },
    #[error("{backend} hit {sseqid}: {field} {value} is out of range")]
    InvalidValue {
        backend: Backend,
        sseqid:  String,
        field:   &'static str,
        value:   f64,
    },
    #[error("hit {sseqid} has a subject length of zero")]
    ZeroSubjectLength { sseqid: String },
    #[error("query sequence length is zero")]
    ZeroLength,
    #[error("coordinate {value} lies outside a sequence of length {len}")]
    CoordinateOutOfRange { value: i64, len: PosType },
    #[error("unknown search backend {0:?}")]
    UnknownBackend(String),
    #[error("unknown reading frame {0:?}")]
    UnknownFrame(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type AnnotResult<T> = Result<T, AnnotError>;
