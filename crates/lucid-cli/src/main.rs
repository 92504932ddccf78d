//! lucid CLI - renders generated text as HTML, plain text, or a node tree.

mod config;
mod error;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use lucid_core::{Diagnostic, Format, RenderOptions, RenderResult, render_with_options};
use lucid_renderer::{HtmlPresenter, Page, Presenter, TextPresenter, Theme};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::{Config, DEFAULT_CONFIG, SanitizeChoice, ThemeChoice};
use error::CliError;

/// Render markdown, HTML, JSON, or plain text into a document.
#[derive(Parser, Debug)]
#[command(name = "lucid", version, about)]
struct Cli {
    /// Input file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Input format: markdown, html, json, or plain. Unknown names render as markdown.
    #[arg(short, long)]
    format: Option<String>,

    /// Output representation.
    #[arg(short, long, value_enum, default_value_t = Emit::Html)]
    emit: Emit,

    /// Color theme for highlighting and standalone pages.
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Sanitize HTML input with the allow-list sanitizer.
    #[arg(long)]
    strict: bool,

    /// Syntax-highlight fenced code blocks.
    #[arg(long)]
    highlight: bool,

    /// Wrap HTML output in a complete page with inline CSS.
    #[arg(long)]
    standalone: bool,

    /// Config file. Defaults to ./lucid.toml when present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print diagnostics to stderr.
    #[arg(long)]
    diagnostics: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    Html,
    Text,
    Tree,
}

/// Settings after merging config values with command-line flags.
#[derive(Debug, PartialEq)]
struct Settings {
    format: Format,
    emit: Emit,
    theme: Theme,
    options: RenderOptions,
    highlight: bool,
    standalone: bool,
}

impl Settings {
    fn resolve(cli: &Cli, config: Config) -> Self {
        let format = cli.format.as_deref().or(config.format.as_deref());
        let sanitize = if cli.strict {
            SanitizeChoice::Strict
        } else {
            config.sanitize
        };
        Self {
            format: Format::from_optional(format),
            emit: cli.emit,
            theme: cli.theme.unwrap_or(config.theme).into(),
            options: RenderOptions {
                sanitize: sanitize.into(),
            },
            highlight: cli.highlight || config.highlight,
            standalone: cli.standalone || config.standalone,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables DEBUG, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => Config::load_strict(path)?,
        None => Config::load(Path::new(DEFAULT_CONFIG)),
    };
    let settings = Settings::resolve(cli, config);
    debug!(?settings, "resolved settings");

    let source = read_input(cli.input.as_deref())?;
    let result = render_with_options(&source, settings.format, &settings.options);

    if cli.diagnostics {
        for diagnostic in &result.diagnostics {
            eprintln!("{}", format_diagnostic(diagnostic));
        }
    }

    let output = present(&result, &settings)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn present(result: &RenderResult, settings: &Settings) -> Result<String, CliError> {
    let output = match settings.emit {
        Emit::Tree => serde_json::to_string_pretty(result)?,
        Emit::Text => TextPresenter.present(&result.nodes),
        Emit::Html => {
            let mut presenter = HtmlPresenter::new();
            if settings.highlight {
                presenter = presenter.with_highlighting(settings.theme);
            }
            let fragment = presenter.present(&result.nodes);
            if settings.standalone {
                Page::new(settings.theme).embed_html(&fragment, true)
            } else {
                fragment
            }
        }
    };
    Ok(output)
}

fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let line = diagnostic
        .line
        .map(|line| line.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}:{} {} {}",
        line,
        diagnostic.severity.label(),
        diagnostic.code,
        diagnostic.message
    )
}
