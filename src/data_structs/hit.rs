use std::sync::Arc;

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::enums::{
    Backend,
    Frame,
};
use crate::data_structs::interval::CircularInterval;
use crate::data_structs::typedef::{
    KindStr,
    PosType,
    ScoreType,
};
use crate::{
    getter_fn,
    with_field_fn,
};

/// One alignment row as reported by a search backend.
///
/// Query coordinates are the backend's 1-based positions and are not
/// ordered; reverse-strand hits report `qstart > qend`. Optional fields are
/// those that not every backend reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    pub qstart: i64,
    pub qend:   i64,
    pub sseqid: String,
    pub pident: Option<f64>,
    pub slen:   u32,
    pub length: Option<u32>,
    pub sframe: Option<Frame>,
    pub evalue: f64,
    pub qlen:   Option<u32>,
    pub qseq:   Option<String>,
}

impl RawHit {
    pub fn new<S: Into<String>>(
        qstart: i64,
        qend: i64,
        sseqid: S,
        slen: u32,
        evalue: f64,
    ) -> Self {
        Self {
            qstart,
            qend,
            sseqid: sseqid.into(),
            pident: None,
            slen,
            length: None,
            sframe: None,
            evalue,
            qlen: None,
            qseq: None,
        }
    }

    with_field_fn!(pident, Option<f64>);

    with_field_fn!(length, Option<u32>);

    with_field_fn!(sframe, Option<Frame>);

    with_field_fn!(qlen, Option<u32>);

    with_field_fn!(qseq, Option<String>);
}

/// Backend row in the canonical schema: 0-based ordered coordinates,
/// nucleotide-unit lengths and a definite frame.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedHit {
    pub database: Arc<str>,
    pub backend:  Backend,
    pub priority: u8,
    pub sseqid:   String,
    pub qstart:   i64,
    pub qend:     i64,
    pub pident:   f64,
    pub slen:     u32,
    pub length:   u32,
    pub sframe:   Frame,
    pub evalue:   f64,
    /// Length of the searched query, doubled for circular sequences.
    pub qlen:     u32,
    pub qseq:     Option<String>,
}

/// A normalized hit with its quality measures and trimmed window.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredHit {
    pub(crate) hit:          NormalizedHit,
    pub(crate) kind:         Option<KindStr>,
    pub(crate) qlen:         PosType,
    pub(crate) percmatch:    ScoreType,
    pub(crate) abspercmatch: ScoreType,
    pub(crate) pi_permatch:  ScoreType,
    pub(crate) score:        ScoreType,
    pub(crate) fragment:     bool,
    pub(crate) wiggle:       i64,
    pub(crate) wstart:       i64,
    pub(crate) wend:         i64,
}

impl ScoredHit {
    getter_fn!(hit, NormalizedHit);

    getter_fn!(kind, Option<KindStr>);

    /// True (un-doubled) sequence length.
    pub fn qlen(&self) -> PosType { self.qlen }

    pub fn percmatch(&self) -> ScoreType { self.percmatch }

    pub fn abspercmatch(&self) -> ScoreType { self.abspercmatch }

    pub fn pi_permatch(&self) -> ScoreType { self.pi_permatch }

    pub fn score(&self) -> ScoreType { self.score }

    pub fn fragment(&self) -> bool { self.fragment }

    pub fn wiggle(&self) -> i64 { self.wiggle }

    pub fn wstart(&self) -> i64 { self.wstart }

    pub fn wend(&self) -> i64 { self.wend }

    pub fn sseqid(&self) -> &str { &self.hit.sseqid }

    pub fn length(&self) -> u32 { self.hit.length }
}

/// Scored hit placed on the circular coordinate space.
///
/// `qstart`/`qend` are reduced into `[0, qlen)`; `span` is the untrimmed
/// interval and `window` the trimmed one used as an occupancy claim.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedHit {
    pub(crate) scored: ScoredHit,
    pub(crate) qstart: PosType,
    pub(crate) qend:   PosType,
    pub(crate) span:   CircularInterval,
    pub(crate) window: CircularInterval,
}

impl PlacedHit {
    getter_fn!(scored, ScoredHit);

    getter_fn!(span, CircularInterval);

    getter_fn!(window, CircularInterval);

    pub fn qstart(&self) -> PosType { self.qstart }

    pub fn qend(&self) -> PosType { self.qend }

    pub fn kind(&self) -> Option<&KindStr> {
        self.scored.kind.as_ref()
    }

    pub fn sseqid(&self) -> &str {
        self.scored.sseqid()
    }

    pub fn database(&self) -> &str {
        &self.scored.hit.database
    }

    pub fn sframe(&self) -> Frame {
        self.scored.hit.sframe
    }

    pub fn pident(&self) -> f64 {
        self.scored.hit.pident
    }

    pub fn percmatch(&self) -> ScoreType {
        self.scored.percmatch
    }

    pub fn score(&self) -> ScoreType {
        self.scored.score
    }

    pub fn fragment(&self) -> bool {
        self.scored.fragment
    }

    pub fn qlen(&self) -> PosType {
        self.scored.qlen
    }
}
