use std::path::PathBuf;

use bio::alphabets::dna::revcomp;
use itertools::Itertools;
use plasann::prelude::*;
use rstest::{
    fixture,
    rstest,
};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[fixture]
fn catalog() -> Catalog {
    Catalog::from_path(data_path("catalog.json")).expect("test catalog")
}

#[fixture]
fn query() -> QuerySequence {
    read_query_path(data_path("pDemo.fasta")).expect("test query")
}

#[rstest]
fn detailed_run(
    catalog: Catalog,
    query: QuerySequence,
) -> anyhow::Result<()> {
    let config = catalog.config();
    assert!(config.detailed);
    let databases = catalog.load_databases(&config)?;
    assert_eq!(
        databases.iter().map(|d| d.name.as_str()).collect_vec(),
        vec!["snapgene", "swissprot", "Rfam"]
    );

    let annotations = Annotator::new(query.clone(), config).annotate(&databases)?;
    assert_eq!(
        annotations.iter().map(|a| a.sseqid.as_str()).collect_vec(),
        vec!["P62593", "ori", "AmpR_promoter", "RNAI", "lac_operator"]
    );

    let by_id = |id: &str| {
        annotations
            .iter()
            .find(|a| a.sseqid == id)
            .expect("feature reported")
    };

    let ori = by_id("ori");
    assert!(ori.wraps);
    assert_eq!((ori.start, ori.end), (950, 150));
    assert_eq!(ori.kind.as_deref(), Some("rep_origin"));
    let expected = [&query.seq()[950..], &query.seq()[..150]].concat();
    assert_eq!(ori.qseq.as_bytes(), expected.as_slice());

    let promoter = by_id("AmpR_promoter");
    assert_eq!((promoter.start, promoter.end), (100, 205));
    assert_eq!(promoter.kind.as_deref(), Some("promoter"));
    assert!(!promoter.fragment);

    let operator = by_id("lac_operator");
    assert_eq!(operator.frame, Frame::Reverse);
    assert_eq!(operator.qseq.as_bytes(), revcomp(&query.seq()[300..317]).as_slice());

    let rnai = by_id("RNAI");
    assert_eq!(rnai.kind.as_deref(), Some("ncRNA"));
    assert_eq!((rnai.start, rnai.end), (452, 560));
    assert_eq!(rnai.qseq.as_bytes(), revcomp(&query.seq()[452..560]).as_slice());

    let cds = by_id("P62593");
    assert_eq!(cds.database, "swissprot");
    assert_eq!(cds.kind.as_deref(), Some("CDS"));
    assert_eq!(cds.length, 300);
    assert_eq!(cds.qseq.as_bytes(), &query.seq()[400..700]);
    Ok(())
}

#[rstest]
fn shared_kind_run(
    catalog: Catalog,
    query: QuerySequence,
) -> anyhow::Result<()> {
    // every hit is a misc_feature, so all of them compete for space
    let config = catalog.config().with_detailed(false);
    let databases = catalog.load_databases(&config)?;
    let annotations = Annotator::new(query, config).annotate(&databases)?;
    assert_eq!(
        annotations.iter().map(|a| a.sseqid.as_str()).collect_vec(),
        vec!["P62593", "ori", "lac_operator"]
    );
    assert!(annotations
        .iter()
        .all(|a| a.kind.as_deref() == Some("misc_feature")));
    Ok(())
}

#[rstest]
#[case(1.0, 5)]
#[case(1e-30, 3)]
fn evalue_threshold(
    catalog: Catalog,
    query: QuerySequence,
    #[case] max_evalue: f64,
    #[case] expected: usize,
) -> anyhow::Result<()> {
    let config = catalog.config().with_max_evalue(max_evalue);
    let databases = catalog.load_databases(&config)?;
    let annotations = Annotator::new(query, config).annotate(&databases)?;
    assert_eq!(annotations.len(), expected);
    assert!(annotations.iter().all(|a| a.evalue < max_evalue));
    Ok(())
}

#[rstest]
fn resolution_is_deterministic(
    catalog: Catalog,
    query: QuerySequence,
) -> anyhow::Result<()> {
    let config = catalog.config();
    let databases = catalog.load_databases(&config)?;
    let annotator = Annotator::new(query, config);
    let first = annotator.resolve(&databases)?;
    let second = annotator.resolve(&databases)?;
    assert_eq!(first, second);

    let again = OccupancyResolver::new(CircularSpace::try_new(annotator.query().len())?)
        .resolve(first.clone().into_inner());
    assert_eq!(first, again);
    Ok(())
}

#[rstest]
fn features_serialize_as_tsv(
    catalog: Catalog,
    query: QuerySequence,
) -> anyhow::Result<()> {
    let config = catalog.config();
    let databases = catalog.load_databases(&config)?;
    let annotations = Annotator::new(query, config).annotate(&databases)?;

    let mut writer = csv::WriterBuilder::default()
        .delimiter(b'\t')
        .from_writer(Vec::new());
    for annotation in annotations.iter() {
        writer.serialize(annotation)?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let table = String::from_utf8(buffer)?;
    let mut lines = table.lines();
    let header = lines.next().unwrap_or_default();
    assert!(header.starts_with("database\tsseqid\tkind\tstart\tend\tframe"));
    assert_eq!(lines.count(), annotations.len());
    Ok(())
}
