use std::fs::File;
use std::io::{
    BufReader,
    Read,
};
use std::path::Path;

use anyhow::{
    bail,
    Context,
};
use bio::io::fasta;

use crate::data_structs::QuerySequence;

/// Reads the query from a FASTA stream holding exactly one record.
pub fn read_query<R: Read>(reader: R) -> anyhow::Result<QuerySequence> {
    let mut records = fasta::Reader::new(reader).records();
    let record = match records.next() {
        Some(record) => record?,
        None => bail!("FASTA input holds no records"),
    };
    if records.next().is_some() {
        bail!("FASTA input holds more than one record; annotate one sequence at a time")
    }
    record.check().map_err(|e| anyhow::anyhow!("{}: {}", record.id(), e))?;
    QuerySequence::try_new(record.id(), record.seq())
        .with_context(|| format!("Invalid query {}", record.id()))
}

pub fn read_query_path<P: AsRef<Path>>(path: P) -> anyhow::Result<QuerySequence> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Could not open query {}", path.display()))?;
    read_query(BufReader::new(file))
}
