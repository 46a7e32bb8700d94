use std::io::IsTerminal;

use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};

use telltale_churn::ledger::sequence_commits;
use telltale_churn::report::AnalysisReport;
use telltale_gitlog::source::CommitSource;
use telltale_gitlog::workspace::CloneWorkspace;

#[derive(Parser)]
#[command(
    name = "telltale",
    version,
    about = "Flag commits whose size is an outlier in a repository's history",
    long_about = "Telltale clones a repository, replays its history oldest first, and\n\
                   reconstructs how many lines each commit touched relative to the code\n\
                   that existed before it. Commits far outside the repository's own churn\n\
                   distribution are flagged as likely AI contributions.\n\n\
                   Examples:\n  \
                     telltale https://github.com/user/repo    Analyze a remote repository\n  \
                     telltale /path/to/checkout               Analyze a local clone"
)]
struct Cli {
    /// Repository to analyze: any URL or path `git clone` accepts
    repo: String,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let spinner = clone_spinner(&cli.repo);
    let cloned = CloneWorkspace::clone(&cli.repo);
    if let Some(pb) = spinner {
        match &cloned {
            Ok(_) => pb.finish_and_clear(),
            Err(_) => pb.finish_with_message("Clone failed"),
        }
    }
    let workspace = cloned
        .into_diagnostic()
        .wrap_err(format!("Failed to clone {}", cli.repo))?;

    let git = workspace.git();
    let commits = git
        .list_commits()
        .into_diagnostic()
        .wrap_err("Failed to walk commit history")?;
    eprintln!("Found {} commits.", commits.len());

    let records = sequence_commits(&git, commits)
        .into_diagnostic()
        .wrap_err("Failed to reconstruct commit sizes")?;

    print!("{}", AnalysisReport::new(records));
    Ok(())
}

// Progress goes to stderr so the report stays pipeable.
fn clone_spinner(repo: &str) -> Option<indicatif::ProgressBar> {
    let message = format!("Cloning {repo} into temporary directory...");
    if std::io::stderr().is_terminal() {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})").unwrap(),
        );
        pb.set_message(message);
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        Some(pb)
    } else {
        eprintln!("{message}");
        None
    }
}
