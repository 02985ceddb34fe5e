use anyhow::Result;
use rpick::PickerOutcome;
use serde_json::json;

/// Print the outcome as plain text: the submitted value, or a cancel notice.
pub(crate) fn print_plain(outcome: &PickerOutcome) {
    if !outcome.accepted {
        println!("Cancelled (query: '{}')", outcome.query);
        return;
    }

    match &outcome.selection {
        Some(item) => println!("{}\t{}", outcome.value, item.name),
        None => println!("{}", outcome.value),
    }
    if let Some(option) = &outcome.dependent {
        println!("{}\t{}", option.id, option.label);
    }
}

pub(crate) fn format_outcome_json(outcome: &PickerOutcome) -> Result<String> {
    let payload = json!({
        "accepted": outcome.accepted,
        "query": outcome.query,
        "value": outcome.value,
        "selection": outcome.selection,
        "dependent": outcome.dependent,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

pub(crate) fn print_json(outcome: &PickerOutcome) -> Result<()> {
    println!("{}", format_outcome_json(outcome)?);
    Ok(())
}
