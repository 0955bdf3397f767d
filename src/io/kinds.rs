use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use hashbrown::HashMap;
use serde::Deserialize;

use crate::data_structs::typedef::KindStr;

/// Assigns a feature category to a subject id.
pub trait KindLookup: Send + Sync {
    /// `None` when the subject has no known kind; such hits never take part
    /// in same-kind overlap resolution.
    fn kind(
        &self,
        sseqid: &str,
    ) -> Option<KindStr>;
}

/// Same kind for every subject of a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantKind(KindStr);

impl ConstantKind {
    pub fn new<S: Into<KindStr>>(kind: S) -> Self {
        Self(kind.into())
    }
}

impl KindLookup for ConstantKind {
    fn kind(
        &self,
        _sseqid: &str,
    ) -> Option<KindStr> {
        Some(self.0.clone())
    }
}

#[derive(Debug, Deserialize)]
struct KindRecord {
    sseqid: String,
    #[serde(rename = "Type")]
    kind:   String,
}

/// Subject id to kind table, read from a CSV with `sseqid` and `Type`
/// columns. Other columns are ignored.
#[derive(Debug, Clone, Default)]
pub struct KindTable {
    inner: HashMap<String, KindStr>,
}

impl<S, K> FromIterator<(S, K)> for KindTable
where
    S: Into<String>,
    K: Into<KindStr>,
{
    fn from_iter<T: IntoIterator<Item = (S, K)>>(iter: T) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(s, k)| (s.into(), k.into()))
                .collect(),
        }
    }
}

impl KindTable {
    pub fn from_csv<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::default()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut inner = HashMap::new();
        for record in csv_reader.deserialize::<KindRecord>() {
            let record = record?;
            inner.insert(record.sseqid, KindStr::from(record.kind.as_str()));
        }
        Ok(Self { inner })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Could not open kind table {}", path.display()))?;
        Self::from_csv(file)
            .with_context(|| format!("Could not read kind table {}", path.display()))
    }

    pub fn len(&self) -> usize { self.inner.len() }

    pub fn is_empty(&self) -> bool { self.inner.is_empty() }
}

impl KindLookup for KindTable {
    fn kind(
        &self,
        sseqid: &str,
    ) -> Option<KindStr> {
        self.inner.get(sseqid).cloned()
    }
}
