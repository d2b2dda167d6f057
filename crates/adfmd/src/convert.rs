//! Markdown ⇄ ADF commands

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use adfmd_core::atlassian::adf::{adf_value_to_markdown, Converted};
use adfmd_core::atlassian::jira::{build_payload, render_comment, render_description, PayloadKind};
use colored::Colorize;
use serde::Serialize;

use crate::prelude::{eprintln, println, *};

/// Request body to wrap the generated ADF in
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Payload {
    /// Bare ADF document
    Bare,
    /// Issue create/update body: {"fields": {"description": ...}}
    Description,
    /// Comment body: {"body": ...}
    Comment,
}

/// What the JSON input holds
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Source {
    /// An ADF document (or a plain string)
    Document,
    /// A Jira issue response; renders `fields.description`
    Issue,
    /// A Jira comment object; renders its `body`
    Comment,
}

#[derive(Debug, clap::Args, Clone)]
pub struct ToAdfOptions {
    /// Markdown file to read ("-" or omitted reads stdin)
    #[clap(env = "ADFMD_INPUT")]
    pub input: Option<PathBuf>,

    /// Wrap the document in a Jira request body
    #[arg(long, value_enum, default_value = "bare")]
    pub payload: Payload,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Print output and warnings together as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct ToMarkdownOptions {
    /// ADF JSON file to read ("-" or omitted reads stdin)
    #[clap(env = "ADFMD_INPUT")]
    pub input: Option<PathBuf>,

    /// Shape of the JSON input
    #[arg(long, value_enum, default_value = "document")]
    pub from: Source,

    /// Print output and warnings together as JSON
    #[arg(long)]
    pub json: bool,
}

/// Read the whole input from a file, or from stdin when no path (or "-") is given
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            log::debug!("Reading input from {}", path.display());
            std::fs::read_to_string(path)
                .map_err(|e| eyre!("Failed to read {}: {}", path.display(), e))
        }
        _ => {
            if std::io::stdin().is_terminal() {
                log::info!("Reading from terminal; end input with Ctrl-D");
            }
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| eyre!("Failed to read stdin: {}", e))?;
            Ok(buffer)
        }
    }
}

/// Print warnings to stderr, then fail if strict mode asks for it
fn report_warnings(warnings: &[String], global: &crate::Global) -> Result<()> {
    log::debug!("Conversion produced {} warning(s)", warnings.len());

    for warning in warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    if global.strict && !warnings.is_empty() {
        return Err(Error::StrictWarnings(warnings.len()).into());
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{rendered}");
    Ok(())
}

/// Handle the to-adf command
pub fn to_adf(options: ToAdfOptions, global: &crate::Global) -> Result<()> {
    let markdown = read_input(options.input.as_deref())?;
    if global.verbose {
        eprintln!("Converting {} bytes of Markdown", markdown.len());
    }

    let converted = markdown_to_payload(&markdown, options.payload);

    if options.json {
        print_json(&converted, options.compact)?;
    } else {
        print_json(&converted.output, options.compact)?;
    }

    report_warnings(&converted.warnings, global)
}

/// Convert markdown and wrap it in the requested request body
pub fn markdown_to_payload(markdown: &str, payload: Payload) -> Converted<serde_json::Value> {
    match payload {
        Payload::Bare => adfmd_core::atlassian::adf::markdown_to_adf_value(markdown),
        Payload::Description => build_payload(markdown, PayloadKind::Description),
        Payload::Comment => build_payload(markdown, PayloadKind::Comment),
    }
}

/// Handle the to-markdown command
pub fn to_markdown(options: ToMarkdownOptions, global: &crate::Global) -> Result<()> {
    let input = read_input(options.input.as_deref())?;
    let value: serde_json::Value =
        serde_json::from_str(&input).map_err(|e| eyre!("Input is not valid JSON: {}", e))?;
    if global.verbose {
        eprintln!("Converting {:?} input to Markdown", options.from);
    }

    let converted = json_to_markdown(value, options.from)?;

    if options.json {
        print_json(&converted, false)?;
    } else if !converted.output.is_empty() {
        println!("{}", converted.output);
    }

    report_warnings(&converted.warnings, global)
}

/// Render JSON input of the given shape as markdown
pub fn json_to_markdown(value: serde_json::Value, from: Source) -> Result<Converted<String>> {
    let converted = match from {
        Source::Document => adf_value_to_markdown(&value),
        Source::Issue => {
            let description = value
                .get("fields")
                .and_then(|fields| fields.get("description"))
                .cloned();
            render_description(description).unwrap_or_else(|| Converted {
                output: String::new(),
                warnings: Vec::new(),
            })
        }
        Source::Comment => {
            let comment = serde_json::from_value(value)
                .map_err(|e| Error::InvalidComment(e.to_string()))?;
            render_comment(&comment)
        }
    };
    Ok(converted)
}
