use std::io::Read;
use std::path::{Path, PathBuf};

use sidenote_core::bridge::BrowserInfo;
use sidenote_core::view::FooterBody;
use sidenote_core::{Catalog, Footer, FooterConfig, FooterInput, FooterRuntime, FooterView};
use tokio::sync::mpsc;

use crate::bridge::{EffectLog, ReplayBridge};
use crate::error::CliError;
use crate::script::{parse_script, ScriptStep};

const INPUT_BUFFER: usize = 16;

#[derive(Debug, Default)]
pub struct ReplayOptions {
    pub json: bool,
    pub storage: Option<PathBuf>,
    pub download_dir: Option<PathBuf>,
    pub extension_version: Option<String>,
    pub browser_version: Option<String>,
    pub locale: Option<PathBuf>,
}

pub async fn run_replay(
    script_path: &Path,
    config: FooterConfig,
    options: ReplayOptions,
) -> Result<(), CliError> {
    let steps = parse_script(&read_script(script_path)?)?;
    let catalog = load_catalog(options.locale.as_deref())?;
    let info = browser_info(options.extension_version, options.browser_version);
    let bridge = ReplayBridge::new(options.storage, options.download_dir, info);

    let lines = replay_steps(bridge, config, catalog, steps, options.json).await?;
    for line in lines {
        println!("{line}");
    }

    Ok(())
}

/// Run the script against a mounted footer and collect the printed lines.
pub async fn replay_steps(
    bridge: ReplayBridge,
    config: FooterConfig,
    catalog: Catalog,
    steps: Vec<ScriptStep>,
    json: bool,
) -> Result<Vec<String>, CliError> {
    let effects = bridge.effects();
    let runtime = FooterRuntime::new(Footer::mount(bridge, config, catalog));
    let (tx, rx) = mpsc::channel::<FooterInput>(INPUT_BUFFER);

    let mut lines = Vec::new();
    let mut render_error = None;

    let host = async move {
        for step in steps {
            match step {
                ScriptStep::Input(input) => {
                    tx.send(input).await.map_err(|_| CliError::ChannelClosed)?;
                }
                ScriptStep::Wait(duration) => tokio::time::sleep(duration).await,
            }
        }
        Ok::<(), CliError>(())
    };
    let footer = runtime.run(rx, |view| {
        drain_effects(&effects, &mut lines);
        match render_line(view, json) {
            Ok(line) => lines.push(line),
            Err(error) => {
                if render_error.is_none() {
                    render_error = Some(error);
                }
            }
        }
    });

    let (_bridge, host_result) = tokio::join!(footer, host);
    host_result?;
    if let Some(error) = render_error {
        return Err(error);
    }

    Ok(lines)
}

fn drain_effects(effects: &EffectLog, lines: &mut Vec<String>) {
    lines.extend(effects.take().iter().map(crate::bridge::HostEffect::describe));
}

fn render_line(view: Option<&FooterView>, json: bool) -> Result<String, CliError> {
    if json {
        return Ok(serde_json::to_string(&view)?);
    }

    Ok(view.map_or_else(|| "(not loaded)".to_string(), format_view))
}

pub fn format_view(view: &FooterView) -> String {
    let mut line = format!("[{}]", view.status);

    let classes = view.class_names();
    if !classes.is_empty() {
        line.push_str(&format!(" .{}", classes.replace(' ', ".")));
    }

    match &view.body {
        FooterBody::Banner { text, tooltip, .. } => {
            line.push_str(&format!(" {text}"));
            if !tooltip.is_empty() {
                line.push_str(&format!(" ({tooltip})"));
            }
        }
        FooterBody::Panel {
            sync_enabled,
            account,
            text,
        } => {
            line.push_str(&format!(" {account} | {text}"));
            if !sync_enabled {
                line.push_str(" [sync disabled]");
            }
        }
    }

    if let Some(menu) = view.menu.as_ref().filter(|menu| menu.open) {
        let items = menu
            .items
            .iter()
            .map(|item| {
                if item.focused {
                    format!("*{}", item.label)
                } else {
                    item.label.clone()
                }
            })
            .collect::<Vec<_>>();
        line.push_str(&format!(" menu: {}", items.join(" / ")));
    }

    line
}

/// Versions for the survey URL; `None` when neither flag was given.
pub fn browser_info(
    extension_version: Option<String>,
    browser_version: Option<String>,
) -> Option<BrowserInfo> {
    if extension_version.is_none() && browser_version.is_none() {
        return None;
    }

    Some(BrowserInfo {
        extension_version: extension_version.unwrap_or_default(),
        browser_version: browser_version.unwrap_or_default(),
    })
}

fn read_script(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        return Ok(raw);
    }

    Ok(std::fs::read_to_string(path)?)
}

fn load_catalog(locale: Option<&Path>) -> Result<Catalog, CliError> {
    let english = Catalog::english();
    let Some(path) = locale else {
        return Ok(english);
    };

    Ok(english.merged_with(Catalog::load_from_path(path)?))
}
