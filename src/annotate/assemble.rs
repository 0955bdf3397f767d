use bio::alphabets::dna::revcomp;
use serde::Serialize;

use crate::annotate::resolve::ResolvedFeatureSet;
use crate::data_structs::enums::Frame;
use crate::data_structs::hit::PlacedHit;
use crate::data_structs::QuerySequence;
use crate::data_structs::typedef::{
    PosType,
    ScoreType,
};

/// One reported feature.
///
/// `start` is 0-based and `end` exclusive; for origin-crossing features
/// `end <= start` and `wraps` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub database:     String,
    pub sseqid:       String,
    pub kind:         Option<String>,
    pub start:        PosType,
    pub end:          PosType,
    pub frame:        Frame,
    pub pident:       f64,
    pub percmatch:    ScoreType,
    pub abspercmatch: ScoreType,
    pub pi_permatch:  ScoreType,
    pub score:        ScoreType,
    pub length:       u32,
    pub fragment:     bool,
    pub evalue:       f64,
    pub wraps:        bool,
    pub qseq:         String,
}

pub struct Assembler<'a> {
    query:           &'a QuerySequence,
    min_pi_permatch: f64,
}

impl<'a> Assembler<'a> {
    pub fn new(
        query: &'a QuerySequence,
        min_pi_permatch: f64,
    ) -> Self {
        Self {
            query,
            min_pi_permatch,
        }
    }

    /// Drops near-empty matches (usually artifacts of composite reference
    /// features) and formats the rest in resolver order.
    pub fn assemble(
        &self,
        resolved: &ResolvedFeatureSet,
    ) -> Vec<Annotation> {
        resolved
            .iter()
            .filter(|hit| hit.scored.pi_permatch > self.min_pi_permatch)
            .map(|hit| self.annotation(hit))
            .collect()
    }

    fn annotation(
        &self,
        hit: &PlacedHit,
    ) -> Annotation {
        let scored = &hit.scored;
        let raw = scored.hit();
        let qseq = match &raw.qseq {
            Some(qseq) => qseq.as_bytes().to_vec(),
            None => self.query.subsequence(&hit.span),
        };
        let qseq = if raw.sframe.is_reverse() {
            revcomp(qseq.as_slice())
        }
        else {
            qseq
        };

        Annotation {
            database: raw.database.to_string(),
            sseqid: raw.sseqid.clone(),
            kind: scored.kind.as_ref().map(|k| k.to_string()),
            start: hit.qstart,
            end: hit.qend + 1,
            frame: raw.sframe,
            pident: raw.pident,
            percmatch: scored.percmatch,
            abspercmatch: scored.abspercmatch,
            pi_permatch: scored.pi_permatch,
            score: scored.score,
            length: raw.length,
            fragment: scored.fragment,
            evalue: raw.evalue,
            wraps: hit.span.wraps(),
            qseq: String::from_utf8_lossy(&qseq).into_owned(),
        }
    }
}
