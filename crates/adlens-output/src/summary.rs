//! Plain-text model summaries.

use crate::error::Result;
use adlens_metrics::AggregateRow;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Write the linear-variant summary: the per-platform KPI table followed
/// by the model's held-out R².
pub fn write_linear_summary(
    path: impl AsRef<Path>,
    platform_rows: &[AggregateRow],
    r_squared: f64,
) -> Result<()> {
    let mut out = String::new();
    out.push_str("Aggregated metrics by platform:\n");
    let _ = writeln!(
        out,
        "{:<14} {:>10} {:>10} {:>10} {:>10}",
        "platform", "CTR", "CPC", "CPM", "ROMI"
    );
    for row in platform_rows {
        let _ = writeln!(
            out,
            "{:<14} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            row.platform, row.ctr, row.cpc, row.cpm, row.romi
        );
    }
    let _ = writeln!(out, "\nLinear Regression R-squared: {r_squared:.4}");
    fs::write(path, out)?;
    Ok(())
}

/// Write the forest-variant summary: held-out R² and the ranked feature
/// importances, most important first.
pub fn write_forest_summary(
    path: impl AsRef<Path>,
    r_squared: f64,
    importances: &[(String, f64)],
) -> Result<()> {
    let mut out = String::new();
    out.push_str("Advanced Analysis Summary\n");
    let _ = writeln!(out, "Random Forest R-squared: {r_squared:.4}");
    out.push_str("\nFeature Importances:\n");
    for (name, importance) in importances {
        let _ = writeln!(out, "- {name}: {importance:.4}");
    }
    fs::write(path, out)?;
    Ok(())
}
