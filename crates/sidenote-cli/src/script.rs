//! Replay script parsing.
//!
//! Scripts are JSON lines. A record with a `ui` key is user input; anything
//! else is a host message delivered to the footer as-is. Blank lines and
//! lines starting with `#` are skipped.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use sidenote_core::{FooterInput, Key, MenuAction};

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Input(FooterInput),
    /// Let the clock run, firing any pending timers.
    Wait(Duration),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "ui", rename_all = "kebab-case", deny_unknown_fields)]
enum UiStep {
    SyncClick,
    MenuToggle,
    OutsideClick,
    Key { key: String },
    Select { item: MenuAction },
    Activate,
    Wait { ms: u64 },
}

pub fn parse_script(raw: &str) -> Result<Vec<ScriptStep>, CliError> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(index, line)| parse_line(index + 1, line.trim()))
        .collect()
}

fn parse_line(line: usize, raw: &str) -> Result<ScriptStep, CliError> {
    let record = serde_json::from_str::<Value>(raw).map_err(|error| CliError::Script {
        line,
        message: error.to_string(),
    })?;

    if !record.is_object() {
        return Err(CliError::Script {
            line,
            message: "expected a JSON object".to_string(),
        });
    }

    if record.get("ui").is_none() {
        return Ok(ScriptStep::Input(FooterInput::Message(record)));
    }

    let step = serde_json::from_value::<UiStep>(record).map_err(|error| CliError::Script {
        line,
        message: error.to_string(),
    })?;

    Ok(match step {
        UiStep::SyncClick => ScriptStep::Input(FooterInput::SyncClicked),
        UiStep::MenuToggle => ScriptStep::Input(FooterInput::MenuToggled),
        UiStep::OutsideClick => ScriptStep::Input(FooterInput::OutsideClick),
        UiStep::Key { key } => {
            let key = match key.parse::<Key>() {
                Ok(key) => key,
                Err(never) => match never {},
            };
            ScriptStep::Input(FooterInput::Key(key))
        }
        UiStep::Select { item } => ScriptStep::Input(FooterInput::Select(item)),
        UiStep::Activate => ScriptStep::Input(FooterInput::ActivateFocused),
        UiStep::Wait { ms } => ScriptStep::Wait(Duration::from_millis(ms)),
    })
}
