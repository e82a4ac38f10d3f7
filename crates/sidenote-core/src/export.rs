//! HTML export of the sidebar notes document.

use crate::bridge::Download;

pub const EXPORT_MIME_TYPE: &str = "text/html";

/// Wrap the notes content in a standalone HTML document.
#[must_use]
pub fn render_html_export(content: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Notes</title></head><body>{content}</body></html>"
    )
}

/// Build the download handed to the host for an export.
#[must_use]
pub fn html_export_download(content: &str, file_name: &str) -> Download {
    Download {
        file_name: file_name.to_string(),
        mime_type: EXPORT_MIME_TYPE.to_string(),
        body: render_html_export(content),
    }
}
