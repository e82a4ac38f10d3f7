use std::path::Path;

use sidenote_core::export::render_html_export;
use sidenote_core::FooterConfig;

use crate::error::CliError;

pub fn run_export(
    content_path: &Path,
    output_path: Option<&Path>,
    config: &FooterConfig,
) -> Result<(), CliError> {
    let content = std::fs::read_to_string(content_path)?;
    let rendered = render_html_export(&content);

    if let Some(path) = output_path {
        let path = if path.is_dir() {
            path.join(&config.export_file_name)
        } else {
            path.to_path_buf()
        };
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}
