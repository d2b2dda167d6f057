use crate::prelude::*;
use clap::Parser;

mod convert;
mod error;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Convert between GitHub-flavored Markdown and Atlassian Document Format (ADF)"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "ADFMD_VERBOSE", global = true, default_value = "false")]
    verbose: bool,

    /// Fail when a conversion skips unsupported elements.
    #[clap(long, env = "ADFMD_STRICT", global = true, default_value = "false")]
    strict: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Convert Markdown to ADF JSON
    #[clap(name = "to-adf")]
    ToAdf(crate::convert::ToAdfOptions),

    /// Convert ADF JSON to Markdown
    #[clap(name = "to-markdown")]
    ToMarkdown(crate::convert::ToMarkdownOptions),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::ToAdf(options) => crate::convert::to_adf(options, &app.global),
        SubCommands::ToMarkdown(options) => crate::convert::to_markdown(options, &app.global),
    }
}
