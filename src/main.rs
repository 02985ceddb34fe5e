mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use workflow::PickerWorkflow;

fn main() -> Result<()> {
    let cli = parse_cli();

    if cli.list_themes {
        for name in rpick_tui::theme::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    if let Err(err) = rpick::logging::initialize() {
        eprintln!("rpick: logging disabled: {err:#}");
    }

    run_picker(cli.output, resolved)
}

fn run_picker(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
    let outcome = PickerWorkflow::from_config(settings).run()?;

    match format {
        OutputFormat::Plain => print_plain(&outcome),
        OutputFormat::Json => print_json(&outcome)?,
    }

    Ok(())
}
