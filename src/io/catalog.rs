//! Database catalog.
//!
//! A JSON document listing, in reporting order, every database that was
//! searched: which backend produced its hits, where the hit table lives and
//! how feature kinds are assigned. An optional `scoring` object overrides
//! [`AnnotateConfig`] defaults.
//!
//! ```json
//! {
//!   "scoring": { "max_evalue": 0.5 },
//!   "databases": {
//!     "snapgene": {
//!       "method": "blastn",
//!       "hits": "snapgene.tsv",
//!       "details": { "file": "snapgene.csv" }
//!     },
//!     "Rfam": {
//!       "method": "infernal",
//!       "hits": "rfam.tblout",
//!       "details": { "default_type": "ncRNA" }
//!     }
//!   }
//! }
//! ```
//!
//! Relative paths are resolved against the catalog's directory.

use std::fs::File;
use std::io::BufReader;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use anyhow::Context;
use indexmap::IndexMap;
use log::{
    debug,
    warn,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::annotate::config::AnnotateConfig;
use crate::annotate::DatabaseHits;
use crate::data_structs::enums::Backend;
use crate::data_structs::typedef::KindStr;
use crate::io::kinds::{
    ConstantKind,
    KindLookup,
    KindTable,
};
use crate::io::tabular::read_hits;

/// How a database's hits get their feature kind in detailed runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Details {
    /// One kind for every subject.
    pub default_type: Option<KindStr>,
    /// CSV table with `sseqid` and `Type` columns.
    pub file:         Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseEntry {
    pub method:  Backend,
    pub hits:    PathBuf,
    /// Space separated tabular column list, when the backend was not run
    /// with the default one.
    #[serde(default)]
    pub columns: Option<String>,
    #[serde(default)]
    pub details: Details,
}

impl DatabaseEntry {
    /// Kind assignment for this database. Non-detailed runs label every
    /// hit with `config.default_kind`.
    pub fn kind_lookup(
        &self,
        config: &AnnotateConfig,
    ) -> anyhow::Result<Arc<dyn KindLookup>> {
        if !config.detailed {
            return Ok(Arc::new(ConstantKind::new(config.default_kind.clone())));
        }
        Ok(match (&self.details.default_type, &self.details.file) {
            (Some(kind), _) => Arc::new(ConstantKind::new(kind.clone())),
            (None, Some(file)) => Arc::new(KindTable::from_path(file)?),
            (None, None) => Arc::new(ConstantKind::new(config.default_kind.clone())),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub scoring:   Option<AnnotateConfig>,
    pub databases: IndexMap<String, DatabaseEntry>,
}

impl Catalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Could not open catalog {}", path.display()))?;
        let mut catalog: Catalog = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse catalog {}", path.display()))?;

        if let Some(base) = path.parent() {
            catalog.resolve_paths(base);
        }
        Ok(catalog)
    }

    fn resolve_paths(
        &mut self,
        base: &Path,
    ) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        for entry in self.databases.values_mut() {
            join(&mut entry.hits);
            if let Some(file) = entry.details.file.as_mut() {
                join(file);
            }
        }
    }

    /// Scoring settings of the catalog, or the defaults.
    pub fn config(&self) -> AnnotateConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn len(&self) -> usize { self.databases.len() }

    pub fn is_empty(&self) -> bool { self.databases.is_empty() }

    /// Reads the hit table of one database. A missing table means the
    /// backend found nothing and yields no rows.
    pub fn load_database(
        &self,
        name: &str,
        entry: &DatabaseEntry,
        config: &AnnotateConfig,
    ) -> anyhow::Result<DatabaseHits> {
        let kinds = entry.kind_lookup(config)?;
        if !entry.hits.exists() {
            warn!(
                "{}: hit table {} not found, skipping",
                name,
                entry.hits.display()
            );
            return Ok(DatabaseHits::new(name, entry.method, kinds, Vec::new()));
        }

        let file = File::open(&entry.hits)
            .with_context(|| format!("Could not open {}", entry.hits.display()))?;
        let rows = read_hits(BufReader::new(file), entry.method, entry.columns.as_deref())
            .with_context(|| format!("Could not read hits of {}", name))?;
        debug!("{}: read {} rows", name, rows.len());
        Ok(DatabaseHits::new(name, entry.method, kinds, rows))
    }

    /// Loads every database, in catalog order.
    pub fn load_databases(
        &self,
        config: &AnnotateConfig,
    ) -> anyhow::Result<Vec<DatabaseHits>> {
        self.databases
            .iter()
            .map(|(name, entry)| self.load_database(name, entry, config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::tempdir;

    use super::*;

    const CATALOG: &str = r#"{
        "scoring": { "detailed": true, "max_evalue": 0.5 },
        "databases": {
            "snapgene": {
                "method": "blastn",
                "hits": "snapgene.tsv",
                "details": { "file": "kinds.csv" }
            },
            "Rfam": {
                "method": "infernal",
                "hits": "missing.tblout",
                "details": { "default_type": "ncRNA" }
            }
        }
    }"#;

    #[test]
    fn test_catalog_loads_in_order() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("catalog.json"), CATALOG).unwrap();
        std::fs::write(dir.path().join("kinds.csv"), "sseqid,Type\nAmpR_promoter,promoter\n").unwrap();
        let mut hits = File::create(dir.path().join("snapgene.tsv")).unwrap();
        writeln!(hits, "11\t51\tAmpR_promoter\t1\t100\t41\tACGT\t41\t1\t41\t400\t1e-10").unwrap();

        let catalog = Catalog::from_path(dir.path().join("catalog.json")).unwrap();
        let config = catalog.config();
        assert!(config.detailed);
        assert_eq!(config.max_evalue, 0.5);
        assert_eq!(config.wiggle_fraction, 0.15);
        assert_eq!(catalog.databases.keys().collect::<Vec<_>>(), vec!["snapgene", "Rfam"]);

        let databases = catalog.load_databases(&config).unwrap();
        assert_eq!(databases.len(), 2);
        assert_eq!(databases[0].rows.len(), 1);
        assert_eq!(
            databases[0].kinds.kind("AmpR_promoter").unwrap().as_str(),
            "promoter"
        );
        assert!(databases[1].rows.is_empty());
        assert_eq!(databases[1].kinds.kind("RNAI").unwrap().as_str(), "ncRNA");
    }

    #[test]
    fn test_non_detailed_uses_default_kind() {
        let entry: DatabaseEntry = serde_json::from_str(
            r#"{ "method": "diamond", "hits": "x.tsv", "details": { "default_type": "CDS" } }"#,
        )
        .unwrap();
        let kinds = entry.kind_lookup(&AnnotateConfig::default()).unwrap();
        assert_eq!(kinds.kind("bla").unwrap().as_str(), "misc_feature");
        let kinds = entry
            .kind_lookup(&AnnotateConfig::default().with_detailed(true))
            .unwrap();
        assert_eq!(kinds.kind("bla").unwrap().as_str(), "CDS");
    }

    #[test]
    fn test_unknown_method_rejected() {
        let res: Result<DatabaseEntry, _> =
            serde_json::from_str(r#"{ "method": "hmmer", "hits": "x.tsv" }"#);
        assert!(res.is_err());
    }
}
