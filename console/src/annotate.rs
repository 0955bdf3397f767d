use std::path::PathBuf;

use anyhow::{
    anyhow,
    Context,
};
use clap::Args;
use console::style;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use itertools::Itertools;
use log::info;
use plasann::io::{
    read_query_path,
    Catalog,
};
use plasann::Annotator;

use crate::utils::{
    init_pbar,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct AnnotateArgs {
    #[arg(
        short = 'q',
        long,
        required = true,
        help = "FASTA file with the single query sequence."
    )]
    query:   PathBuf,
    #[arg(
        short = 'c',
        long,
        required = true,
        help = "JSON catalog of searched databases and their hit tables."
    )]
    catalog: PathBuf,
    #[arg(
        short = 'o',
        long,
        required = true,
        help = "Path of the generated TSV feature table."
    )]
    output:  PathBuf,
    #[arg(
        short,
        long,
        default_value_t = false,
        help = "Overwrite the output file without asking."
    )]
    force:   bool,

    #[arg(
        long,
        default_value_t = false,
        help_heading = "SCORING ARGS",
        help = "Query is linear. By default it is treated as circular and hits \
                are expected from a search against the doubled sequence."
    )]
    linear:     bool,
    #[arg(
        long,
        default_value_t = false,
        help_heading = "SCORING ARGS",
        help = "Assign feature kinds from each database's details instead of a \
                single default kind."
    )]
    detailed:   bool,
    #[arg(
        short = 'e',
        long,
        help_heading = "SCORING ARGS",
        help = "Discard hits with an e-value at or above this. Overrides the catalog."
    )]
    max_evalue: Option<f64>,
}

impl AnnotateArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        for path in [&self.query, &self.catalog] {
            if !path.is_file() {
                return Err(anyhow!(
                    "Path {} does not exist or is not a file.",
                    style(path.display()).red()
                ));
            }
        }
        if self.output.is_dir() {
            return Err(anyhow!(
                "Output path {} is a directory.",
                style(self.output.display()).red()
            ));
        }
        if self.output.exists() && !self.force {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "Output file {} exists. Overwrite?",
                    self.output.display()
                ))
                .default(false)
                .interact()
                .unwrap_or(false);
            if !confirmed {
                println!("{}", style("Process aborted by the user.").red());
                return Err(anyhow!("User aborted the process."));
            }
        }

        let catalog = Catalog::from_path(&self.catalog)?;
        let mut config = catalog.config();
        config.linear |= self.linear;
        config.detailed |= self.detailed;
        if let Some(max_evalue) = self.max_evalue {
            config.max_evalue = max_evalue;
        }

        let query = read_query_path(&self.query)?;
        info!("Query {} ({} bp)", query.name(), query.len());

        let progress_bar = if utils.progress {
            init_pbar(catalog.len())?
        }
        else {
            ProgressBar::hidden()
        };
        let mut databases = Vec::with_capacity(catalog.len());
        for (name, entry) in catalog.databases.iter() {
            progress_bar.set_message(format!("{}", style(name).blue()));
            databases.push(catalog.load_database(name, entry, &config)?);
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        let annotations = Annotator::new(query, config)
            .annotate(&databases)
            .with_context(|| format!("Annotation of {} failed", self.query.display()))?;

        let mut csv_writer = csv::WriterBuilder::default()
            .delimiter(b'\t')
            .has_headers(true)
            .from_path(&self.output)
            .with_context(|| format!("Could not create {}", self.output.display()))?;
        for annotation in annotations.iter() {
            csv_writer.serialize(annotation)?;
        }
        csv_writer.flush()?;

        if annotations.is_empty() {
            println!("[{}] No features found", style("!").yellow());
        }
        else {
            let counts = annotations
                .iter()
                .map(|a| a.database.as_str())
                .counts();
            println!(
                "[{}] {} features written to {}",
                style("V").green(),
                style(annotations.len()).green(),
                self.output.display()
            );
            for (database, count) in counts.into_iter().sorted() {
                println!("\t{}: {}", database, count);
            }
        }
        Ok(())
    }
}
