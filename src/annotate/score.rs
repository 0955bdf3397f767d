use crate::annotate::config::AnnotateConfig;
use crate::data_structs::hit::{
    NormalizedHit,
    ScoredHit,
};
use crate::data_structs::typedef::KindStr;
use crate::error::{
    AnnotError,
    AnnotResult,
};

/// Computes the comparable quality score of a normalized hit.
///
/// The score is identity-weighted and normalized by how much of the
/// reference feature the alignment covers, so hits from nucleotide,
/// translated and structural searches can be ranked together. Matches
/// longer than the reference are folded back toward 100%
/// (`abspercmatch`), e.g. 102.1% counts as 97.9%.
pub fn score(
    hit: NormalizedHit,
    kind: Option<KindStr>,
    config: &AnnotateConfig,
) -> AnnotResult<ScoredHit> {
    let qlen = if config.linear { hit.qlen } else { hit.qlen / 2 };
    if qlen == 0 {
        return Err(AnnotError::ZeroLength);
    }
    if hit.slen == 0 {
        return Err(AnnotError::ZeroSubjectLength { sseqid: hit.sseqid });
    }

    let length = hit.length as f64;
    let percmatch = length / hit.slen as f64 * 100.0;
    let abspercmatch = 100.0 - (100.0 - percmatch).abs();
    let pi_permatch = hit.pident * abspercmatch / 100.0;
    let fragment = percmatch < config.fragment_threshold;

    let mut score = (pi_permatch / 100.0) * length;
    if pi_permatch == 100.0 {
        score *= config.identity_bonus;
    }
    if hit.backend.is_nucleotide() {
        score *= config.nucleotide_bonus;
    }

    let wiggle = (length * config.wiggle_fraction).floor() as i64;
    let wstart = hit.qstart + wiggle;
    let wend = hit.qend - wiggle;

    Ok(ScoredHit {
        hit,
        kind,
        qlen,
        percmatch,
        abspercmatch,
        pi_permatch,
        score,
        fragment,
        wiggle,
        wstart,
        wend,
    })
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rstest::rstest;

    use super::*;
    use crate::annotate::fixtures::normalized;
    use crate::data_structs::enums::Backend;

    #[test]
    fn test_score_quantities() {
        let hit = normalized(Backend::Infernal, 10, 50, 41, 90.0, 200);
        let scored = score(hit, None, &AnnotateConfig::default()).unwrap();
        assert_approx_eq!(scored.percmatch(), 100.0);
        assert_approx_eq!(scored.pi_permatch(), 90.0);
        assert_approx_eq!(scored.score(), 0.9 * 41.0);
        assert!(!scored.fragment());
        assert_eq!(scored.qlen(), 100);
        assert_eq!(scored.wiggle(), 6);
        assert_eq!((scored.wstart(), scored.wend()), (16, 44));
    }

    #[test]
    fn test_overlength_match_folds_back() {
        // 42 bases aligned against a 40 base reference: 105% -> 95%
        let mut hit = normalized(Backend::Infernal, 0, 41, 40, 100.0, 200);
        hit.length = 42;
        let scored = score(hit, None, &AnnotateConfig::default()).unwrap();
        assert_approx_eq!(scored.percmatch(), 105.0);
        assert_approx_eq!(scored.abspercmatch(), 95.0);
        assert_approx_eq!(scored.pi_permatch(), 95.0);
        assert!(!scored.fragment());
    }

    #[test]
    fn test_fragment_flag() {
        let hit = normalized(Backend::Infernal, 0, 49, 100, 100.0, 400);
        let scored = score(hit, None, &AnnotateConfig::default()).unwrap();
        assert_approx_eq!(scored.percmatch(), 50.0);
        assert!(scored.fragment());
    }

    #[rstest]
    #[case(Backend::Blastn, 30.0 * 1.5 * 1.1)]
    #[case(Backend::Diamond, 30.0 * 1.5)]
    #[case(Backend::Infernal, 30.0 * 1.5)]
    fn test_bonus_composition(
        #[case] backend: Backend,
        #[case] expected: f64,
    ) {
        let config = AnnotateConfig::default().with_identity_bonus(1.5);
        let hit = normalized(backend, 0, 29, 30, 100.0, 200);
        let scored = score(hit, None, &config).unwrap();
        assert_approx_eq!(scored.pi_permatch(), 100.0);
        assert_approx_eq!(scored.score(), expected);
    }

    #[test]
    fn test_nucleotide_bonus_without_identity_bonus() {
        let config = AnnotateConfig::default().with_identity_bonus(1.5);
        let hit = normalized(Backend::Blastn, 0, 29, 30, 90.0, 200);
        let scored = score(hit, None, &config).unwrap();
        assert_approx_eq!(scored.score(), 0.9 * 30.0 * 1.1);
    }

    #[test]
    fn test_linear_keeps_qlen() {
        let config = AnnotateConfig::default().with_linear(true);
        let hit = normalized(Backend::Blastn, 0, 29, 30, 100.0, 200);
        assert_eq!(score(hit, None, &config).unwrap().qlen(), 200);
    }

    #[test]
    fn test_zero_qlen_is_fatal() {
        let hit = normalized(Backend::Blastn, 0, 29, 30, 100.0, 1);
        let err = score(hit, None, &AnnotateConfig::default()).unwrap_err();
        assert!(matches!(err, AnnotError::ZeroLength));
    }

    #[test]
    fn test_zero_subject_length() {
        let hit = normalized(Backend::Blastn, 0, 29, 0, 100.0, 200);
        assert!(score(hit, None, &AnnotateConfig::default()).is_err());
    }
}
