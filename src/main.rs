use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use difftree::{
    DiffPageAdapter, DiffSection, PollOutcome, ReadinessPoll, RecordListAdapter, SidebarConfig,
    UnifiedDiffAdapter, build_sidebar, render_fragment, render_page, render_text,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Sidebar element only
    Html,
    /// Standalone page with the sidebar and the diff sections
    Page,
    /// Indented tree for the terminal
    Text,
    /// Rendered entry tree as JSON
    Json,
}

/// Render a collapsible file tree sidebar for a merge request diff
#[derive(Debug, Parser)]
#[command(name = "difftree", version)]
struct Cli {
    /// Diff to read; `-` or nothing reads stdin
    input: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Write here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input is a JSON list of file records instead of a diff
    #[arg(long)]
    records: bool,

    /// Poll until the input file exists and holds diff sections
    #[arg(long)]
    wait: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SidebarConfig::load(path)?,
        None => SidebarConfig::default(),
    };

    if cli.wait {
        wait_for_input(&cli, &config)?;
    }

    let text = read_input(cli.input.as_deref())?;

    let (adapter, sections): (Box<dyn DiffPageAdapter>, Vec<DiffSection>) = if cli.records {
        (Box::new(RecordListAdapter::from_json(&text)?), Vec::new())
    } else {
        let diff = UnifiedDiffAdapter::parse_with_threshold(&text, config.collapse_threshold)?;
        let sections = diff.sections().to_vec();
        (Box::new(diff), sections)
    };

    let view = build_sidebar(adapter.as_ref(), &config)?;

    let rendered = match cli.format {
        Format::Html => render_fragment(&view),
        Format::Page => {
            let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            render_page(&view, &sections, &config, &generated_at)
        }
        Format::Text => render_text(&view),
        Format::Json => serde_json::to_string_pretty(&view).context("Failed to encode sidebar")?,
    };

    write_output(cli.output.as_deref(), &rendered)
}

fn wait_for_input(cli: &Cli, config: &SidebarConfig) -> Result<()> {
    let path = match cli.input.as_deref() {
        Some(path) if path != Path::new("-") => path.to_path_buf(),
        _ => bail!("--wait needs an input file, not stdin"),
    };

    let records = cli.records;
    let watched = path.clone();
    let outcome = ReadinessPoll::new(config.poll_interval(), move || {
        fs::read_to_string(&watched)
            .map(|text| {
                if records {
                    !text.trim().is_empty()
                } else {
                    UnifiedDiffAdapter::is_ready(&text)
                }
            })
            .unwrap_or(false)
    })
    .max_attempts(config.max_poll_attempts)
    .wait();

    match outcome {
        PollOutcome::Ready { .. } => Ok(()),
        PollOutcome::Exhausted { attempts } | PollOutcome::Cancelled { attempts } => bail!(
            "{} was not ready after {} attempts",
            path.display(),
            attempts
        ),
    }
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input: {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            log::info!("Wrote sidebar to {}", path.display());
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("Failed to write stdout")?;
            if !rendered.ends_with('\n') {
                stdout.write_all(b"\n").context("Failed to write stdout")?;
            }
            Ok(())
        }
    }
}
