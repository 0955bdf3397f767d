use std::sync::Arc;

use log::debug;

use crate::data_structs::enums::{
    Backend,
    Frame,
};
use crate::data_structs::hit::{
    NormalizedHit,
    RawHit,
};
use crate::error::{
    AnnotError,
    AnnotResult,
};

/// Converts rows of one backend and database into the canonical hit schema.
#[derive(Debug, Clone)]
pub struct Normalizer {
    backend:      Backend,
    database:     Arc<str>,
    searched_len: u32,
    max_evalue:   f64,
}

impl Normalizer {
    /// `searched_len` is the length of the sequence handed to the backend
    /// (doubled for circular queries); it fills rows that carry no `qlen`.
    pub fn new(
        backend: Backend,
        database: &str,
        searched_len: u32,
        max_evalue: f64,
    ) -> Self {
        Self {
            backend,
            database: Arc::from(database),
            searched_len,
            max_evalue,
        }
    }

    pub fn normalize(
        &self,
        rows: &[RawHit],
    ) -> AnnotResult<Vec<NormalizedHit>> {
        let n_rows = rows.len();
        let mut res = Vec::with_capacity(n_rows);
        for row in rows.iter() {
            if let Some(hit) = self.normalize_row(row)? {
                res.push(hit);
            }
        }
        debug!(
            "{} ({}): kept {} of {} rows below e-value {}",
            self.database,
            self.backend,
            res.len(),
            n_rows,
            self.max_evalue
        );
        Ok(res)
    }

    /// Returns `None` for rows filtered out by the e-value threshold.
    pub fn normalize_row(
        &self,
        row: &RawHit,
    ) -> AnnotResult<Option<NormalizedHit>> {
        for value in [row.qstart, row.qend] {
            if value < 1 {
                return Err(AnnotError::InvalidCoordinate {
                    backend: self.backend,
                    sseqid: row.sseqid.clone(),
                    value,
                });
            }
        }
        if !row.evalue.is_finite() || row.evalue < 0.0 {
            return Err(self.invalid(&row.sseqid, "evalue", row.evalue));
        }
        if let Some(pident) = row.pident {
            if !(0.0..=100.0).contains(&pident) {
                return Err(self.invalid(&row.sseqid, "pident", pident));
            }
        }
        if row.evalue >= self.max_evalue {
            return Ok(None);
        }

        let qstart = row.qstart - 1;
        let qend = row.qend - 1;
        let span_len = ((qend - qstart).unsigned_abs() + 1) as u32;

        let (sseqid, pident, slen, length, sframe) = match self.backend {
            Backend::Blastn => {
                let pident = row.pident.ok_or_else(|| self.missing(&row.sseqid, "pident"))?;
                (
                    row.sseqid.clone(),
                    pident,
                    row.slen,
                    row.length.unwrap_or(span_len),
                    row.sframe.unwrap_or(Frame::Forward),
                )
            },
            Backend::Diamond => {
                let pident = row.pident.ok_or_else(|| self.missing(&row.sseqid, "pident"))?;
                (
                    subject_accession(&row.sseqid),
                    pident,
                    row.slen * 3,
                    span_len,
                    Frame::from_orientation(qstart, qend),
                )
            },
            Backend::Infernal => (
                row.sseqid.clone(),
                row.pident.unwrap_or(100.0),
                row.slen,
                span_len,
                row.sframe
                    .unwrap_or_else(|| Frame::from_orientation(qstart, qend)),
            ),
        };

        // translated alignments report the query as amino acids
        let qseq = if self.backend.is_protein() { None } else { row.qseq.clone() };

        Ok(Some(NormalizedHit {
            database: self.database.clone(),
            backend: self.backend,
            priority: self.backend.priority(),
            sseqid,
            qstart: qstart.min(qend),
            qend: qstart.max(qend),
            pident,
            slen,
            length,
            sframe,
            evalue: row.evalue,
            qlen: row.qlen.unwrap_or(self.searched_len),
            qseq,
        }))
    }

    fn missing(
        &self,
        sseqid: &str,
        field: &'static str,
    ) -> AnnotError {
        AnnotError::MissingField {
            backend: self.backend,
            sseqid: sseqid.to_string(),
            field,
        }
    }

    fn invalid(
        &self,
        sseqid: &str,
        field: &'static str,
        value: f64,
    ) -> AnnotError {
        AnnotError::InvalidValue {
            backend: self.backend,
            sseqid: sseqid.to_string(),
            field,
            value,
        }
    }
}

/// Protein databases name subjects `source|accession|description`; only
/// the accession identifies the feature.
fn subject_accession(sseqid: &str) -> String {
    sseqid
        .split('|')
        .nth(1)
        .filter(|s| !s.is_empty())
        .unwrap_or(sseqid)
        .to_string()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn normalizer(backend: Backend) -> Normalizer {
        Normalizer::new(backend, "test_db", 200, 1.0)
    }

    #[test]
    fn test_blastn_orders_coordinates() {
        let row = RawHit::new(51, 11, "promoter_a", 41, 1e-10)
            .with_pident(Some(98.0))
            .with_length(Some(41))
            .with_sframe(Some(Frame::Reverse));
        let hit = normalizer(Backend::Blastn)
            .normalize_row(&row)
            .unwrap()
            .unwrap();
        assert_eq!((hit.qstart, hit.qend), (10, 50));
        assert_eq!(hit.sframe, Frame::Reverse);
        assert_eq!(hit.priority, 0);
        assert_eq!(hit.qlen, 200);
        assert_eq!(&*hit.database, "test_db");
    }

    #[test]
    fn test_diamond_scales_and_infers_frame() {
        let row = RawHit::new(90, 1, "sp|P62593|BLAT_ECOLX Beta-lactamase", 30, 1e-20)
            .with_pident(Some(100.0))
            .with_length(Some(30))
            .with_qseq(Some("MSIQHFRVALIPFFAAFCLPVFA".to_string()));
        let hit = normalizer(Backend::Diamond)
            .normalize_row(&row)
            .unwrap()
            .unwrap();
        assert_eq!(hit.sseqid, "P62593");
        assert_eq!(hit.slen, 90);
        assert_eq!(hit.length, 90);
        assert_eq!(hit.sframe, Frame::Reverse);
        assert_eq!((hit.qstart, hit.qend), (0, 89));
        assert_eq!(hit.priority, 1);
        assert!(hit.qseq.is_none());
    }

    #[test]
    fn test_diamond_plain_subject_id_kept() {
        let row = RawHit::new(1, 30, "BLAT_ECOLX", 10, 1e-5).with_pident(Some(90.0));
        let hit = normalizer(Backend::Diamond)
            .normalize_row(&row)
            .unwrap()
            .unwrap();
        assert_eq!(hit.sseqid, "BLAT_ECOLX");
        assert_eq!(hit.sframe, Frame::Forward);
    }

    #[test]
    fn test_infernal_defaults_identity() {
        let row = RawHit::new(120, 61, "RNAI", 108, 1e-12).with_sframe(Some(Frame::Reverse));
        let hit = normalizer(Backend::Infernal)
            .normalize_row(&row)
            .unwrap()
            .unwrap();
        assert_eq!(hit.pident, 100.0);
        assert_eq!(hit.length, 60);
        assert_eq!(hit.sframe, Frame::Reverse);
        assert_eq!(hit.priority, 2);
    }

    #[rstest]
    #[case(1.5)]
    #[case(1.0)]
    fn test_evalue_filter(#[case] evalue: f64) {
        let row = RawHit::new(1, 30, "ori", 30, evalue).with_pident(Some(100.0));
        let hits = normalizer(Backend::Blastn).normalize(&[row]).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let hits = normalizer(Backend::Infernal).normalize(&[]).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_rejects_zero_based_coordinate() {
        let row = RawHit::new(0, 30, "ori", 30, 1e-3).with_pident(Some(100.0));
        let err = normalizer(Backend::Blastn).normalize(&[row]).unwrap_err();
        assert!(matches!(err, AnnotError::InvalidCoordinate { value: 0, .. }));
    }

    #[test]
    fn test_blastn_requires_identity() {
        let row = RawHit::new(1, 30, "ori", 30, 1e-3);
        let err = normalizer(Backend::Blastn).normalize(&[row]).unwrap_err();
        assert!(matches!(err, AnnotError::MissingField { field: "pident", .. }));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(-1.0)]
    #[case(150.0)]
    fn test_rejects_identity_out_of_range(#[case] pident: f64) {
        let row = RawHit::new(11, 51, "promoter_a", 41, 1e-10).with_pident(Some(pident));
        let err = normalizer(Backend::Blastn).normalize_row(&row).unwrap_err();
        assert!(matches!(err, AnnotError::InvalidValue { field: "pident", .. }));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(-1e-5)]
    fn test_rejects_invalid_evalue(#[case] evalue: f64) {
        // a NaN e-value would otherwise slip past the threshold comparison
        let row = RawHit::new(11, 51, "promoter_a", 41, evalue).with_pident(Some(100.0));
        let err = normalizer(Backend::Blastn).normalize(&[row]).unwrap_err();
        assert!(matches!(err, AnnotError::InvalidValue { field: "evalue", .. }));
    }
}
