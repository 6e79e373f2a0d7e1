//! PNG output.

use std::path::Path;

use crate::{canvas::Canvas, error::{AppshotError, AppshotResult}};

/// Unpremultiply and write a canvas as PNG, creating parent directories as
/// needed.
pub fn write_png(canvas: &Canvas, path: &Path) -> AppshotResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppshotError::encoding(format!("create '{}': {e}", parent.display()))
        })?;
    }
    canvas
        .unpremultiplied()
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| AppshotError::encoding(format!("write '{}': {e}", path.display())))?;
    tracing::info!(
        path = %path.display(),
        width = canvas.width(),
        height = canvas.height(),
        "wrote png"
    );
    Ok(())
}
