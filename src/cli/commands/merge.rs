//! Rating table merge command.

use console::style;

use crate::config::MergeSettings;
use crate::table::{read_merge_input, write_table, TableMerger};

/// Merge the two configured source tables into the output table.
pub async fn cmd_merge(settings: &MergeSettings) -> anyhow::Result<()> {
    let a = read_merge_input(&settings.source_a)?;
    let b = read_merge_input(&settings.source_b)?;

    let merged = TableMerger::new(settings.columns()).merge(&a, &b);
    write_table(&merged, &settings.output)?;

    println!(
        "{} Merged {} + {} rows into {} records at {}",
        style("✓").green(),
        a.len(),
        b.len(),
        merged.len(),
        settings.output.display()
    );
    Ok(())
}
