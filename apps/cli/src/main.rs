mod config;
mod errors;
mod extract;
mod llm;
mod models;
mod optimize;
mod render;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::errors::AppError;
use crate::llm::LlmClient;
use crate::models::resume::ResumeRecord;
use crate::models::schema::resume_schema;
use crate::render::style::RenderParameters;

const SCHEMA_DUMP_PATH: &str = "resume_schema.json";
const DEFAULT_PARSED_PATH: &str = "parsed_resume.json";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info", env!("CARGO_PKG_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        usage();
        bail!("no command given");
    };

    match command.as_str() {
        "extract" => cmd_extract(rest),
        "parse" => cmd_parse(rest).await,
        "render" => cmd_render(rest),
        "fit" => cmd_fit(rest),
        other => {
            usage();
            bail!("unknown command '{other}'");
        }
    }
}

fn usage() {
    eprintln!(
        "cvpress v{}\n\
         Usage:\n  \
         cvpress extract <resume.pdf|.docx|.txt> [out.txt]\n  \
         cvpress parse   <resume.pdf|.docx|.txt> [{DEFAULT_PARSED_PATH}]\n  \
         cvpress render  <parsed.json> <out.pdf|out.docx>\n  \
         cvpress fit     <parsed.json> <out.pdf>",
        env!("CARGO_PKG_VERSION")
    );
}

/// `extract`: raw text extraction only.
fn cmd_extract(args: &[String]) -> Result<()> {
    let [input, out @ ..] = args else {
        usage();
        bail!("extract needs an input file");
    };
    let text = extract::extract_text(Path::new(input))?;
    match out.first() {
        Some(out) => {
            fs::write(out, &text).with_context(|| format!("writing {out}"))?;
            info!("Wrote raw text to {out}");
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// `parse`: extract text, run structured extraction, persist schema dump
/// and the intermediate parsed record.
async fn cmd_parse(args: &[String]) -> Result<()> {
    let [input, rest @ ..] = args else {
        usage();
        bail!("parse needs an input file");
    };
    let out = rest
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_PARSED_PATH);

    // Credential is required up front; fail before any I/O.
    let config = Config::from_env()?;
    let client = LlmClient::new(config.openai_api_key);

    let raw_text = extract::extract_text(Path::new(input))?;
    info!("Running structured extraction (model: {})", llm::MODEL);
    let record = client.extract_structured(&raw_text).await?;

    fs::write(
        SCHEMA_DUMP_PATH,
        serde_json::to_string_pretty(&resume_schema())?,
    )?;
    fs::write(out, serde_json::to_string_pretty(&record)?)?;
    info!("Parsed resume for '{}' → {out}", record.contact_info.name);
    Ok(())
}

/// `render`: one render pass at baseline parameters; the backend is chosen
/// by the output suffix.
fn cmd_render(args: &[String]) -> Result<()> {
    let [input, out] = args else {
        usage();
        bail!("render needs <parsed.json> and an output path");
    };
    let record = load_record(Path::new(input))?;
    let params = RenderParameters::default();

    let bytes = if out.ends_with(".pdf") {
        render::pdf::render(&record, &params)?
    } else if out.ends_with(".docx") {
        render::docx::render(&record, &params)?
    } else {
        return Err(AppError::UnsupportedFormat(out.clone()).into());
    };
    fs::write(out, &bytes)?;
    info!("Rendered {out} ({} bytes)", bytes.len());
    Ok(())
}

/// `fit`: the page-fit optimizer. Layout overflow is a degraded success,
/// not a failure — the most-compressed document is already on disk.
fn cmd_fit(args: &[String]) -> Result<()> {
    let [input, out] = args else {
        usage();
        bail!("fit needs <parsed.json> and an output PDF path");
    };
    let record = load_record(Path::new(input))?;

    match optimize::fit_to_one_page(&record, Path::new(out)) {
        Ok(report) => {
            info!(
                "Fitted {out} on one page at level {} ({} attempts)",
                report.level, report.attempts
            );
            Ok(())
        }
        Err(AppError::LayoutOverflow { pages }) => {
            warn!("Could not fit {out} on one page; best effort spans {pages} pages");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn load_record(path: &Path) -> Result<ResumeRecord, AppError> {
    if !path.exists() {
        return Err(AppError::FileNotFound(PathBuf::from(path)));
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| AppError::SchemaViolation(e.to_string()))
}
