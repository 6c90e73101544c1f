//! CLI binary for pdf2text-ocr.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractConfig`, drives one `ExtractionSession` across the given inputs,
//! and prints or saves the artifact.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2text_ocr::{
    read_document, write_artifact, ExtractConfig, ExtractError, ExtractionSession, DEFAULT_MODEL,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r####"EXAMPLES:
  # Basic extraction (stdout)
  pdf2text document.pdf

  # Save the artifact under the conventional name
  pdf2text document.pdf -o extracted_text.txt

  # Several documents through one session — repeats hit the cache
  pdf2text chapter1.pdf chapter2.pdf chapter1.pdf

  # Structured JSON output with page stats
  pdf2text --json document.pdf > output.json

  # Longer timeout for a large scanned document
  pdf2text --api-timeout 300 scans.pdf

THE REMOTE ROUND TRIP:
  1. The PDF is staged to a temp file and uploaded with purpose "ocr".
  2. A signed URL (valid a few minutes) is minted for the uploaded file.
  3. The OCR endpoint processes the signed URL and returns per-page
     markdown, which is assembled under "### Page N" headers.
  The staged temp file is always deleted, even when a remote step fails.
  A document whose pages carry no text prints "❌ No text extracted." —
  that is a successful outcome, not an error.

ENVIRONMENT VARIABLES:
  MISTRAL_API_KEY      API key (required)
  MISTRAL_BASE_URL     Override the service base URL (gateways, testing)
  PDF2TEXT_MODEL       Override the OCR model id
  PDF2TEXT_OUTPUT      Default value for --output

SETUP:
  1. Set API key:   export MISTRAL_API_KEY=...
  2. Extract:       pdf2text document.pdf -o extracted_text.txt
"####;

/// Extract text from PDF documents using the Mistral OCR cloud service.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2text",
    version,
    about = "Extract text from PDF documents using the Mistral OCR cloud service",
    long_about = "Upload a PDF to the Mistral OCR service and print (or save) the extracted text, \
assembled per page under '### Page N' headers. Within one invocation, repeated inputs with the \
same file name are served from the session cache without touching the service again.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path(s), driven through one session in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Write the artifact to this file instead of stdout (single input only).
    #[arg(short, long, env = "PDF2TEXT_OUTPUT")]
    output: Option<PathBuf>,

    /// OCR model identifier.
    #[arg(long, env = "PDF2TEXT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Signed-URL validity in minutes.
    #[arg(long, env = "PDF2TEXT_EXPIRY_MINUTES", default_value_t = 5)]
    expiry_minutes: u32,

    /// Per-remote-call timeout in seconds.
    #[arg(long, env = "PDF2TEXT_API_TIMEOUT", default_value_t = 120)]
    api_timeout: u64,

    /// OCR service base URL.
    #[arg(long, env = "MISTRAL_BASE_URL", default_value = "https://api.mistral.ai")]
    base_url: String,

    /// Output structured JSON (ExtractionOutput) instead of plain text.
    #[arg(long, env = "PDF2TEXT_JSON")]
    json: bool,

    /// Disable the waiting spinner.
    #[arg(long, env = "PDF2TEXT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2TEXT_VERBOSE")]
    verbose: bool,

    /// Suppress everything except errors and the artifact itself.
    #[arg(short, long, env = "PDF2TEXT_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs while the spinner is active; the
    // spinner is all the feedback that matters during the remote wait.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.output.is_some() && cli.inputs.len() > 1 {
        anyhow::bail!("--output accepts exactly one input file");
    }

    let config = build_config(&cli)?;

    // ── Credential check ─────────────────────────────────────────────────
    // Fail here, before anything is read, staged, or sent.
    if config.backend.is_none() && config.resolved_api_key().is_none() {
        return Err(ExtractError::MissingApiKey.into());
    }

    // ── Drive the session ────────────────────────────────────────────────
    let mut session = ExtractionSession::new();
    let multi = cli.inputs.len() > 1;

    for input in &cli.inputs {
        let (bytes, name) = read_document(input)
            .with_context(|| format!("Cannot read '{}'", input.display()))?;
        let was_cached = session.cached_name() == Some(name.as_str());

        // Blocking wait with a spinner; no cancellation once the request
        // is out — the only outcomes are a response or a remote timeout.
        let spinner = (show_progress && !was_cached).then(|| waiting_spinner(&name));
        let result = session.get_or_compute(&bytes, &name, &config).await;
        if let Some(ref s) = spinner {
            s.finish_and_clear();
        }
        let output = result.with_context(|| format!("Extraction failed for '{name}'"))?;

        // ── Emit ─────────────────────────────────────────────────────────
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?
            );
        } else if let Some(ref path) = cli.output {
            write_artifact(&output.artifact, path).await?;
            if !cli.quiet {
                eprintln!(
                    "{} {}  →  {}",
                    green("✔"),
                    bold(&name),
                    bold(&path.display().to_string())
                );
            }
        } else {
            if multi {
                eprintln!("{} {}", cyan("◆"), bold(&name));
            }
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let text = output.artifact.display_text();
            handle
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
            // Ensure a trailing newline on stdout.
            if !text.ends_with('\n') {
                handle.write_all(b"\n").ok();
            }
        }

        // ── Summary ──────────────────────────────────────────────────────
        if !cli.quiet && !cli.json {
            if was_cached {
                eprintln!("   {}", dim("cached — no remote call"));
            } else {
                eprintln!(
                    "   {}  {}",
                    dim(&format!(
                        "{}/{} pages carried text",
                        output.stats.pages_with_text, output.stats.total_pages
                    )),
                    dim(&format!("{}ms", output.stats.total_duration_ms)),
                );
            }
        }
    }

    Ok(())
}

/// Map CLI args to `ExtractConfig`.
fn build_config(cli: &Cli) -> Result<ExtractConfig> {
    ExtractConfig::builder()
        .model(cli.model.as_str())
        .base_url(cli.base_url.as_str())
        .url_expiry_minutes(cli.expiry_minutes)
        .api_timeout_secs(cli.api_timeout)
        .build()
        .context("Invalid configuration")
}

/// Spinner shown while a remote extraction is outstanding.
fn waiting_spinner(name: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Processing");
    bar.set_message(format!("{name} — waiting for the OCR service…"));
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
