use std::fs;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::browser::Browser;
use crate::config::CrawlConfig;

/// Returns the outer HTML of the svg embedded in the modal's figure, or
/// null when the item has no figure.
pub const FIGURE_SVG_SCRIPT: &str = r#"
const fig = document.querySelector("figure.image");
const svg = fig ? fig.querySelector("svg") : null;
return svg ? svg.outerHTML : null;
"#;

/// Replaces the figure with an `<img>` pointing at `arguments[0]`.
pub const REPLACE_FIGURE_SCRIPT: &str = r#"
const fig = document.querySelector("figure.image");
if (fig) {
    const img = document.createElement("img");
    img.src = arguments[0];
    img.alt = "Stimulus Image";
    fig.replaceWith(img);
}
"#;

/// Serializes an embedded figure to a sidecar file and swaps the figure for
/// an image reference in the live DOM.
///
/// Must run before any other modal field is read: the question and prompt
/// HTML are extracted from the mutated page, which is how the image
/// reference ends up inside the stored markup. No-op for items without a
/// figure. Returns whether a sidecar file was written.
///
/// Write failures propagate and abort the run; swallowing one here would
/// leave a record pointing at a file that does not exist.
pub async fn extract_figure(
    browser: &dyn Browser,
    id: &str,
    config: &CrawlConfig,
) -> Result<bool> {
    let svg = browser.execute(FIGURE_SVG_SCRIPT, Vec::new()).await?;
    let Value::String(svg) = svg else {
        return Ok(false);
    };

    let path = config.asset_path(id);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating assets directory {}", parent.display()))?;
    }
    fs::write(&path, &svg)
        .with_context(|| format!("writing sidecar asset {}", path.display()))?;

    let reference = config.asset_reference(id);
    browser
        .execute(REPLACE_FIGURE_SCRIPT, vec![Value::String(reference)])
        .await
        .context("replacing figure in live DOM")?;

    ::log::debug!("Wrote sidecar asset {}", path.display());
    Ok(true)
}
