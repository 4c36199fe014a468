mod args;
mod output;

pub use args::{Cli, Commands};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use synctrace_engine::{FormatCheck, LogSource, analyze_sources, check_format};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check { path } => check(&path),
        Commands::Parse { paths, json } => parse(&paths, json),
    }
}

fn check(path: &Path) -> Result<()> {
    let source = LogSource::from_file(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    match check_format(&source.text, &source.label) {
        FormatCheck::Recognized => {
            println!("{}: recognized agent diagnostic log", source.label);
            Ok(())
        }
        check => bail!("{}", check.message().unwrap_or("invalid input")),
    }
}

fn parse(paths: &[PathBuf], json: bool) -> Result<()> {
    let files = collect_files(paths)?;
    if files.is_empty() {
        bail!("no log files found under the given paths");
    }

    let sources = files
        .iter()
        .map(|p| {
            LogSource::from_file(p).with_context(|| format!("failed to read {}", p.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let analysis = analyze_sources(sources)?;

    if json {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &analysis)?;
        println!();
    } else {
        output::render_summary(&analysis);
    }

    Ok(())
}

/// Expand the given paths to concrete log files. Directories are scanned
/// recursively for `*.log`, sorted for stable output.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "log"))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    Ok(files)
}
