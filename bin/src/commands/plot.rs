//! Plot command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tickbars_lib::plot_csv;

/// Renders `data` as an HTML chart next to it.
pub(crate) fn plot(data: &Path) -> Result<()> {
    let out = plot_csv(data).with_context(|| format!("Failed to plot {}", data.display()))?;
    println!("Chart written to: {}", out.display());
    Ok(())
}
