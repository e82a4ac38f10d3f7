use serde::Serialize;
use sidenote_core::Status;

use crate::error::CliError;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct StatusRow {
    pub status: Status,
    pub clickable: bool,
    pub cancellable: bool,
    pub animate: bool,
    pub warn: bool,
    pub preserve: bool,
    pub sign_in: bool,
    pub text_key: &'static str,
    pub tooltip_key: Option<&'static str>,
}

pub fn status_rows() -> Vec<StatusRow> {
    Status::ALL
        .iter()
        .map(|&status| {
            let descriptor = status.descriptor();
            StatusRow {
                status,
                clickable: descriptor.clickable,
                cancellable: descriptor.cancellable,
                animate: descriptor.animate,
                warn: descriptor.warn,
                preserve: descriptor.preserve,
                sign_in: descriptor.sign_in,
                text_key: descriptor.text_key.key(),
                tooltip_key: descriptor.tooltip_key.map(|key| key.key()),
            }
        })
        .collect()
}

pub fn run_states(json: bool) -> Result<(), CliError> {
    let rows = status_rows();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in rows {
        println!("{}", format_status_row(&row));
    }

    Ok(())
}

pub fn format_status_row(row: &StatusRow) -> String {
    let flags = [
        (row.clickable, "clickable"),
        (row.cancellable, "cancellable"),
        (row.animate, "animate"),
        (row.warn, "warn"),
        (row.preserve, "preserve"),
        (row.sign_in, "sign-in"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect::<Vec<_>>();

    let flags = if flags.is_empty() {
        "-".to_string()
    } else {
        flags.join(",")
    };

    format!(
        "{:<22} {:<40} {}",
        row.status.as_str(),
        flags,
        row.text_key
    )
}
