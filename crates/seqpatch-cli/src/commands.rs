use std::fs;

use anyhow::Context;
use colored::Colorize;
use tracing::debug;

use seqpatch_core::{diff_with, DefaultEquivalence, DiffOptions, IgnoreWhitespace, Patch};

use crate::cli::*;
use crate::config::CliConfig;
use crate::input::read_text;
use crate::render::{render_summary, render_text};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let color = config.color && !cli.no_color;
    match cli.command {
        Command::Diff(args) => {
            let output = cmd_diff(&args, &config, &cli.format, color)?;
            print!("{output}");
            Ok(())
        }
        Command::Apply(args) => cmd_apply(&args),
    }
}

fn diff_options(args: &DiffArgs, config: &CliConfig) -> DiffOptions {
    let mut options = config.diff.clone();
    if let Some(ms) = args.timeout_ms {
        options.timeout_ms = Some(ms);
    }
    options
}

fn compute_patch(args: &DiffArgs, config: &CliConfig) -> anyhow::Result<Patch<String>> {
    let original = read_text(&args.original)?.lines;
    let revised = read_text(&args.revised)?.lines;
    let options = diff_options(args, config);
    debug!(
        original = original.len(),
        revised = revised.len(),
        ignore_whitespace = args.ignore_whitespace || config.ignore_whitespace,
        "comparing files"
    );

    let patch = if args.ignore_whitespace || config.ignore_whitespace {
        diff_with(&original, &revised, &IgnoreWhitespace, &options)
    } else {
        diff_with(&original, &revised, &DefaultEquivalence, &options)
    }
    .with_context(|| {
        format!(
            "comparing {} with {}",
            args.original.display(),
            args.revised.display()
        )
    })?;
    Ok(patch)
}

fn cmd_diff(
    args: &DiffArgs,
    config: &CliConfig,
    format: &OutputFormat,
    color: bool,
) -> anyhow::Result<String> {
    let patch = compute_patch(args, config)?;
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&patch)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => {
            let mut out = render_text(&patch, color);
            if !patch.is_empty() {
                let summary = render_summary(&patch);
                let summary = if color { summary.bold().to_string() } else { summary };
                out.push_str(&summary);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

fn cmd_apply(args: &ApplyArgs) -> anyhow::Result<()> {
    let input = read_text(&args.input)?;
    let patch_text = fs::read_to_string(&args.patch)
        .with_context(|| format!("reading patch {}", args.patch.display()))?;
    let patch: Patch<String> = serde_json::from_str(&patch_text)
        .with_context(|| format!("parsing patch {}", args.patch.display()))?;

    let result = if args.reverse {
        patch.restore(&input.lines)
    } else {
        patch.apply_to(&input.lines)
    }
    .with_context(|| format!("applying patch to {}", args.input.display()))?;

    let content = input.render(&result);
    match &args.output {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{content}"),
    }
    Ok(())
}
