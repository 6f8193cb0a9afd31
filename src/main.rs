use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, debug};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

mod action;
mod error;
mod fetch;
mod mermaid;
mod pipeline;
mod sink;

use fetch::github::DEFAULT_API_URL;
use mermaid::LinkConfig;
use mermaid::link::{DEFAULT_BASE_URL, DEFAULT_BRANCH};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "action-mermaid")]
#[command(about = "Render a GitHub Action's inputs and outputs as a Mermaid flowchart", long_about = None)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, global = true, env = "ACTION_MERMAID_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch action.yml from GitHub and set the `mermaid` step output.
    Github {
        /// owner/repo of the action to render.
        #[arg(long, env = "INPUT_NWO")]
        nwo: String,

        /// Token for the contents API. Empty means anonymous.
        #[arg(long, env = "INPUT_TOKEN", hide_env_values = true, default_value = "")]
        token: String,

        #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,

        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,

        /// Step output file; without it the diagram is printed.
        #[arg(long, env = "GITHUB_OUTPUT")]
        github_output: Option<PathBuf>,

        #[command(flatten)]
        links: LinkArgs,
    },

    /// Render the action definition in a local checkout.
    Local {
        /// Directory containing action.yml or action.yaml.
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// owner/repo used for the click-through links.
        #[arg(long)]
        nwo: String,

        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        links: LinkArgs,
    },
}

#[derive(Args)]
struct LinkArgs {
    /// Host that permalinks point at.
    #[arg(long, env = "GITHUB_SERVER_URL", default_value = DEFAULT_BASE_URL)]
    server_url: String,

    /// Branch that permalinks point at.
    #[arg(long, default_value = DEFAULT_BRANCH)]
    branch: String,
}

impl From<LinkArgs> for LinkConfig {
    fn from(args: LinkArgs) -> Self {
        LinkConfig::new(args.server_url, args.branch)
    }
}

fn init_logging(level: &str) {
    // Step debug logging in Actions turns on our debug output as well.
    let level = if std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1") {
        LevelFilter::Debug
    } else {
        LevelFilter::from_str(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level: {}. Using 'warn' instead.", level);
            LevelFilter::Warn
        })
    };

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let ok = match cli.cmd {
        Commands::Github {
            nwo,
            token,
            api_url,
            timeout_secs,
            github_output,
            links,
        } => {
            let fetcher = fetch::GithubFetcher::new(fetch::GithubConfig {
                api_url,
                token: Some(token).filter(|t| !t.trim().is_empty()),
                timeout: Duration::from_secs(timeout_secs),
            })?;
            let links = LinkConfig::from(links);
            debug!("links point at {}/{}", links.base_url, links.branch);

            let mut sink = sink::ActionsSink::new(github_output, std::io::stdout());
            pipeline::run_to_sink(pipeline::Pipeline::new(&fetcher, &links), &nwo, &mut sink)?
        }
        Commands::Local {
            dir,
            nwo,
            out,
            links,
        } => {
            let fetcher = fetch::DirFetcher::new(dir);
            let links = LinkConfig::from(links);
            let pipeline = pipeline::Pipeline::new(&fetcher, &links);

            match out {
                // Buffer so a failed run never leaves a file behind.
                Some(path) => {
                    let mut sink = sink::WriterSink::new(Vec::new());
                    let ok = pipeline::run_to_sink(pipeline, &nwo, &mut sink)?;
                    if ok {
                        std::fs::write(&path, sink.into_inner())
                            .with_context(|| format!("write {}", path.display()))?;
                        println!("Wrote {}", path.display());
                    }
                    ok
                }
                None => {
                    let mut sink = sink::WriterSink::new(std::io::stdout());
                    pipeline::run_to_sink(pipeline, &nwo, &mut sink)?
                }
            }
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
