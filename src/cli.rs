//! CLI definitions and entry point

#[cfg(unix)]
use std::fs::File;
use std::io;
#[cfg(unix)]
use std::os::fd::AsFd;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgAction, Parser};

use repolog::adapters::{GhqLister, GitLogProvider, ghq};
use repolog::config::RepologConfig;
use repolog::core::services::{Pipeline, PipelineOptions, source};
use repolog::output::{LogPrinter, PrintOutcome};

/// repolog - Dump commit logs across repositories
#[derive(Parser, Debug)]
#[command(
    name = "repolog",
    version,
    disable_version_flag = true,
    about = "Dump commit logs across repositories managed by ghq",
    long_about = "Dump commit logs across repositories managed by ghq.\n\n\
                  Repository paths are read from standard input when it is piped,\n\
                  otherwise every repository listed by `ghq list` is read."
)]
pub struct Cli {
    /// Exclude repositories matching a given pattern
    #[arg(short = 'e', long = "exclude-repo", value_name = "PATTERN", action = ArgAction::Append)]
    pub exclude_repo: Vec<String>,

    /// Print commit logs of only repositories matching a given pattern. Note that -e patterns
    /// take priority over -i patterns
    #[arg(short = 'i', long = "include-repo", value_name = "PATTERN", action = ArgAction::Append)]
    pub include_repo: Vec<String>,

    /// Exclude commit logs matching a given pattern
    #[arg(short = 'E', long = "exclude-log", value_name = "PATTERN", action = ArgAction::Append)]
    pub exclude_log: Vec<String>,

    /// Print only commit logs matching a given pattern. Note that -E patterns take priority
    /// over -I patterns
    #[arg(short = 'I', long = "include-log", value_name = "PATTERN", action = ArgAction::Append)]
    pub include_log: Vec<String>,

    /// Print commit logs in a given format. See "PRETTY FORMATS" in git-log(1); %rn and %rp
    /// expand to the repository name and short path [default: "[%rn] <%an> %B"]
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Limit the number of repositories read in parallel [default: 50]
    #[arg(short = 'p', long, value_name = "N", allow_negative_numbers = true)]
    pub parallelism: Option<i64>,

    /// Format each commit message to one line
    #[arg(short = '1', long)]
    pub oneline: bool,

    /// Read defaults from this config file instead of ~/.config/repolog/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Print the version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

impl Cli {
    /// Merge command-line values over the config file
    fn pipeline_options(&self, config: &RepologConfig) -> PipelineOptions {
        let mut options = config.pipeline_options();
        options.exclude_repo.extend(self.exclude_repo.iter().cloned());
        options.include_repo.extend(self.include_repo.iter().cloned());
        options.exclude_log.extend(self.exclude_log.iter().cloned());
        options.include_log.extend(self.include_log.iter().cloned());
        if let Some(format) = &self.format {
            options.format.clone_from(format);
        }
        if let Some(parallelism) = self.parallelism {
            options.parallelism = parallelism;
        }
        options.oneline |= self.oneline;
        options
    }
}

/// Whether repository paths come from `input` rather than from ghq
///
/// Pipes and regular files are read. A terminal or a character device such
/// as `/dev/null` leaves the listing to ghq.
#[cfg(unix)]
fn reads_repositories_from(input: &impl AsFd) -> io::Result<bool> {
    use std::os::unix::fs::FileTypeExt;

    let input = File::from(input.as_fd().try_clone_to_owned()?);
    Ok(!input.metadata()?.file_type().is_char_device())
}

#[cfg(not(unix))]
fn reads_repositories_from(input: &impl io::IsTerminal) -> io::Result<bool> {
    Ok(!input.is_terminal())
}

/// Run the CLI
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = match &cli.config {
        Some(path) => RepologConfig::load_from(path)?,
        None => RepologConfig::load()?,
    };
    let options = cli.pipeline_options(&config);
    let pipeline = Pipeline::new(&options)?;

    let piped = reads_repositories_from(&io::stdin()).context("failed to inspect standard input")?;
    let repositories = if piped {
        log::debug!("reading repository paths from standard input");
        source::from_lines(tokio::io::stdin())
    } else {
        ghq::ensure_installed().await.context("ghq is required when no repositories are piped in")?;
        source::from_listing(&GhqLister).await?
    };

    let lines = pipeline.lines(repositories, Arc::new(GitLogProvider));
    let mut printer = LogPrinter::new(io::stdout().lock());
    match printer.print_all(lines).await? {
        PrintOutcome::Completed { printed } => log::debug!("printed {printed} commit(s)"),
        PrintOutcome::Closed { printed } => {
            log::debug!("output closed after {printed} commit(s)");
        },
    }
    Ok(())
}
