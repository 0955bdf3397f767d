use clap::Args;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::LevelFilter;
use plasann::utils::NUM_THREADS_ENV;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        long,
        default_value_t = false,
        help_heading = "UTILS",
        help = "Display progress bar."
    )]
    pub progress: bool,
    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help_heading = "UTILS",
        help = "Increase logging verbosity (-v info, -vv debug, -vvv trace)."
    )]
    pub verbose:  u8,
    #[arg(
        short = 'T',
        long,
        help_heading = "UTILS",
        help = "Number of threads to use. Defaults to all available cores."
    )]
    pub threads:  Option<usize>,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        if let Some(threads) = self.threads {
            if threads == 0 {
                anyhow::bail!("Number of threads must be positive");
            }
            // The library pool reads this on first use.
            std::env::set_var(NUM_THREADS_ENV, threads.to_string());
        }

        let mut builder = pretty_env_logger::formatted_builder();
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        else {
            builder.filter_level(level_filter(self.verbose));
        }
        builder.try_init()?;
        Ok(())
    }
}

pub(crate) fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init_pbar(total: usize) -> anyhow::Result<ProgressBar> {
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}, ETA: {eta}] [{bar:40.cyan/blue}] {pos:>5.green}/{len:5} {msg}")?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Reading hits...");
    Ok(progress_bar)
}
