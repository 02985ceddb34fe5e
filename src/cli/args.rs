use std::fmt::Write;
use std::path::PathBuf;

use clap::{
    ArgAction, ColorChoice, Command, CommandFactory, FromArgMatches, Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use rpick::app_dirs::AppDir;
use rpick::CommitField;


/// Version banner including the config and data directories.
fn long_version() -> &'static str {
    let config_dir = AppDir::Config.describe();
    let data_dir = AppDir::Data.describe();

    let mut details = format!("rpick {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {config_dir}");
    let _ = writeln!(details, "data directory: {data_dir}");

    Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
    let mut matches = cli_command().get_matches();
    CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

fn cli_command() -> Command {
    CliArgs::command()
}

/// Split `KEY=VALUE` into its parts.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing parameter name in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[derive(Parser, Debug)]
#[command(
    name = "rpick",
    version,
    long_version = long_version(),
    about = "Pick a record from a paginated JSON search endpoint",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "RPICK_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'e',
        long,
        value_name = "URL",
        help = "Search endpoint queried with offset, limit and q"
    )]
    pub(crate) endpoint: Option<String>,
    #[arg(long = "page-size", value_name = "N", help = "Results requested per page (default: 10)")]
    pub(crate) page_size: Option<usize>,
    #[arg(
        long = "result-field",
        value_name = "FIELD",
        help = "Response field holding the result array (default: companies)"
    )]
    pub(crate) result_field: Option<String>,
    #[arg(
        short = 'p',
        long = "param",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        action = ArgAction::Append,
        help = "Extra query parameter sent with every search"
    )]
    pub(crate) params: Vec<(String, String)>,
    #[arg(long, value_enum, help = "Field committed into the hidden value (default: id)")]
    pub(crate) commit: Option<CommitArg>,
    #[arg(long = "free-text", help = "Accept typed text without choosing from the list")]
    pub(crate) free_text: bool,
    #[arg(long, value_name = "TAG", help = "Message language: en or pt-BR (default: en)")]
    pub(crate) locale: Option<String>,
    #[arg(long = "debounce-ms", value_name = "MS", help = "Quiet period before searching (default: 300)")]
    pub(crate) debounce_ms: Option<u64>,
    #[arg(
        long = "timeout-ms",
        value_name = "MS",
        help = "Abort requests after this long, 0 disables (default: 6000)"
    )]
    pub(crate) timeout_ms: Option<u64>,
    #[arg(
        long = "dependent-endpoint",
        value_name = "URL",
        help = "Endpoint listing options for the chosen value (default: none)"
    )]
    pub(crate) dependent_endpoint: Option<String>,
    #[arg(short = 't', long, value_name = "TITLE", help = "Title of the search field")]
    pub(crate) title: Option<String>,
    #[arg(short = 'q', long, value_name = "QUERY", help = "Initial search text (default: empty)")]
    pub(crate) initial_query: Option<String>,
    #[arg(long, value_name = "THEME", help = "Select a theme by name (default: slate)")]
    pub(crate) theme: Option<String>,
    #[arg(long = "list-themes", help = "List available themes and exit")]
    pub(crate) list_themes: bool,
    #[arg(long = "print-config", help = "Print the effective configuration before starting")]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long,
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Format used to print the outcome"
    )]
    pub(crate) output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum CommitArg {
    Id,
    Name,
}

impl From<CommitArg> for CommitField {
    fn from(value: CommitArg) -> Self {
        match value {
            CommitArg::Id => Self::Id,
            CommitArg::Name => Self::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}
