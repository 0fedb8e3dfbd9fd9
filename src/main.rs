use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use regex::bytes::Regex;
use strcmp95_rs::{pair::PairScorer, Scorer, ScorerOptions};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(structopt::StructOpt)]
/// Score pairs of strings with the Jaro-Winkler (strcmp95) similarity
struct Options {
    /// Number of parallel threads to run
    #[structopt(long, short)]
    jobs: Option<usize>,

    /// Number of lines read at a time by each thread when running in parallel
    /// mode. Has zero effect when --jobs=1.
    #[structopt(long, short = "c", default_value = "10000")]
    chunk_size: usize,

    /// Weight given to a common prefix of up to 4 bytes. Must be between 0.0
    /// and 0.25.
    #[structopt(long, short = "p", default_value = "0.1")]
    prefix_weight: f64,

    /// Inputs longer than this many bytes are scored with a positional ratio
    /// instead of the full algorithm.
    #[structopt(long)]
    max_len: Option<usize>,

    /// Regex separating the two strings on each line. Only the first match
    /// splits the line.
    #[structopt(long, short = "s", default_value = "\t")]
    separator: String,

    /// Pairs scoring below this are left out of the output. Must be between
    /// 0.0 and 1.0.
    #[structopt(long, default_value = "0.0")]
    min_score: f64,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[structopt(long, short, parse(from_occurrences))]
    verbose: u8,

    /// Path to the file to read
    #[structopt(default_value = "/dev/stdin")]
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let opts = Options::from_args();

    let level = match opts.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(io::stderr)
        .init();

    let mut scorer_options = ScorerOptions::default().with_prefix_weight(opts.prefix_weight);
    if let Some(max_len) = opts.max_len {
        scorer_options = scorer_options.with_max_len(max_len);
    }
    let scorer = Scorer::new(scorer_options)?;

    let separator = Regex::new(&opts.separator)
        .with_context(|| format!("invalid separator {:?}", opts.separator))?;
    let pair_scorer = PairScorer::new(scorer, separator).with_min_score(opts.min_score)?;

    let file = File::open(&opts.file)
        .with_context(|| format!("failed to open {}", opts.file.display()))?;
    let progress = progress_bar(file.metadata()?.len());
    let file = BufReader::new(file);

    let jobs = opts.jobs.unwrap_or_else(num_cpus::get_physical);
    info!(jobs, file = %opts.file.display(), "scoring pairs");

    let pairs = if jobs == 1 {
        strcmp95_rs::main_single_core(pair_scorer, file, progress.clone())?
    } else {
        strcmp95_rs::parallel::run(pair_scorer, opts.chunk_size, file, jobs, progress.clone())?
    };

    progress.finish_and_clear();

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    for pair in pairs {
        pair.write_to(&mut writer)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(())
}

/// Pipes and character devices report a length of 0; there is nothing to
/// show progress against for those.
fn progress_bar(len: u64) -> ProgressBar {
    if len == 0 {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40} {bytes}/{total_bytes} ({eta})")
            .progress_chars("=> "),
    );
    progress
}
