use std::path::PathBuf;
use std::process;

use clap::Parser;
use color_print::cformat;

use branchprep::config::{BuildConfig, CiEnv, Overrides};
use branchprep::git::{GitError, Repository};
use branchprep::resolve::{self, BuildMode, Outcome};
use branchprep::styling::{eprintln, error_message, println, progress_message, success_message};
use branchprep::workspace;

#[derive(Parser)]
#[command(name = "bp")]
#[command(about = "Clone a repository and check out or merge branches for a CI build")]
#[command(version)]
struct Cli {
    /// Repository URL to clone
    url: String,

    /// Branch being built (push branch, or PR target). Falls back to
    /// $TRAVIS_BRANCH
    #[arg(short = 't', long, value_name = "branch")]
    target_branch: Option<String>,

    /// PR origin branch to merge. Falls back to $TRAVIS_PULL_REQUEST_BRANCH
    #[arg(short = 'o', long, value_name = "branch")]
    origin_branch: Option<String>,

    /// Branch to fall back to when the target does not exist
    #[arg(short = 'd', long, value_name = "branch")]
    default_branch: Option<String>,

    /// Treat this as a push build
    #[arg(long, conflicts_with = "pr")]
    push: bool,

    /// Treat this as a pull-request build
    #[arg(long)]
    pr: bool,

    /// Directory to clone into (default: derived from the URL)
    #[arg(long, value_name = "path")]
    dir: Option<PathBuf>,

    /// Show git commands and their output (repeat for more detail)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn mode_override(&self) -> Option<BuildMode> {
        if self.push {
            Some(BuildMode::Push)
        } else if self.pr {
            Some(BuildMode::PullRequest)
        } else {
            None
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "branchprep=debug",
        _ => "debug",
    };
    env_logger::Builder::new()
        .parse_filters(filter)
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<GitError>() {
            Some(git_err) => eprintln!("{git_err}"),
            None => eprintln!("{}", error_message(format!("{err:#}"))),
        }
        process::exit(1);
    }
}

const COMMITTER_NAME: &str = "Your Name";
const COMMITTER_EMAIL: &str = "you@example.com";

fn run(cli: Cli) -> anyhow::Result<()> {
    let env = CiEnv::from_env();
    let mode_override = cli.mode_override();
    let config = BuildConfig::resolve(
        Overrides {
            target: cli.target_branch,
            origin: cli.origin_branch,
            default: cli.default_branch,
            mode: mode_override,
        },
        &env,
    );

    // Nothing to resolve; fail before touching the network
    if config.target.is_none() && config.origin.is_none() {
        return Err(GitError::NoBranchGiven.into());
    }

    println!(
        "{}",
        progress_message(cformat!(
            "Preparing <bold>{}</> ({} build)",
            cli.url,
            config.mode
        ))
    );
    match config.mode {
        BuildMode::Push => {
            println!(
                "{}",
                progress_message(cformat!(
                    "  target <bold>{}</>, default <bold>{}</>",
                    config.target.as_deref().unwrap_or("-"),
                    config.default
                ))
            );
        }
        BuildMode::PullRequest => {
            println!(
                "{}",
                progress_message(cformat!(
                    "  origin <bold>{}</>, target <bold>{}</>, default <bold>{}</>",
                    config.origin.as_deref().unwrap_or("-"),
                    config.target.as_deref().unwrap_or("-"),
                    config.default
                ))
            );
        }
    }

    let destination = cli
        .dir
        .unwrap_or_else(|| workspace::destination_from_url(&cli.url));
    workspace::scrub_destination(&destination)?;

    let repo = Repository::clone_from(&cli.url, &destination)?;
    println!(
        "{}",
        success_message(cformat!("Cloned into <bold>{}</>", destination.display()))
    );
    repo.set_committer_identity(COMMITTER_NAME, COMMITTER_EMAIL)?;

    let result = resolve::resolve(
        &repo,
        config.mode,
        config.target.as_deref(),
        config.origin.as_deref(),
        &config.default,
    );

    // The .git directory goes away on success and failure alike, but a
    // resolution error takes precedence over a cleanup error.
    let cleanup = workspace::remove_git_dir(&destination);
    let outcome = result?;
    cleanup?;

    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::CheckedOut { branch } => {
            println!(
                "{}",
                success_message(cformat!("Working tree ready on <bold>{branch}</>"))
            );
        }
        Outcome::Merged { origin, into } => {
            println!(
                "{}",
                success_message(cformat!(
                    "Working tree ready on <bold>{into}</> with <bold>{origin}</> merged"
                ))
            );
        }
        Outcome::NoMerge { active } => {
            println!(
                "{}",
                success_message(cformat!(
                    "Working tree ready on <bold>{active}</> (no merge)"
                ))
            );
        }
    }
}
