use anyhow::Result;
use clap::Parser;

use regraft::strategy::Strategy;
use regraft::update::{self, UpdateTask};

mod telemetry;

/// Re-import upstream code into this fork
///
/// regraft refreshes every file in its update matrix from an upstream
/// checkout, splicing current upstream definitions into the local copy
/// while keeping fork-only edits in place. Run it from the repository
/// root with the upstream sources cloned alongside:
///
///   git clone --depth 1 https://github.com/nexB/scancode-toolkit
///   regraft
///
/// Each file is printed to stdout as it is rewritten. The first file that
/// cannot be synced stops the run with an error on stderr; files already
/// rewritten keep their new contents. Set RUST_LOG=debug for a trace of
/// what each step did.
#[derive(Parser)]
#[command(name = "regraft")]
#[command(version, about)]
struct Cli {}

/// The files this fork vendors, in sync order. Local paths are relative to
/// the repository root, upstream paths to the checkout next to it.
fn update_matrix() -> Vec<UpdateTask> {
    vec![
        UpdateTask::new(
            "gemlock_parser/analysis.py",
            "scancode-toolkit/src/textcode/analysis.py",
            Strategy::MergeByName,
        ),
        UpdateTask::new(
            "gemlock_parser/strings.py",
            "scancode-toolkit/src/textcode/strings.py",
            Strategy::MergeByName,
        ),
        UpdateTask::new(
            "gemlock_parser/tokenize.py",
            "scancode-toolkit/src/licensedcode/tokenize.py",
            Strategy::MergeByName,
        ),
        UpdateTask::new(
            "gemlock_parser/gemfile_lock.py",
            "scancode-toolkit/src/packagedcode/gemfile_lock.py",
            Strategy::ReplaceAfterImports,
        ),
        UpdateTask::new(
            "tests/test_gemfile_lock.py",
            "scancode-toolkit/tests/packagedcode/test_gemfile_lock.py",
            Strategy::ReplaceAfterImports,
        ),
        UpdateTask::new(
            "tests/scancode_config.py",
            "scancode-toolkit/src/scancode_config.py",
            Strategy::MergeByName,
        ),
    ]
}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    telemetry::init();

    let matrix = update_matrix();
    tracing::info!(tasks = matrix.len(), "starting upstream sync");
    update::run_matrix(&matrix)?;
    Ok(())
}
