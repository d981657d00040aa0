//! Platform lookup command.

use std::path::Path;

use anyhow::bail;

use crate::config::MergeSettings;
use crate::table::{find_by_identity, read_table};

/// Print the record named `name` as JSON. A miss is an error.
pub async fn cmd_lookup(settings: &MergeSettings, file: &Path, name: &str) -> anyhow::Result<()> {
    let table = read_table(file)?;

    let Some(record) = find_by_identity(&table, &settings.identity_field, name) else {
        bail!("Platform '{}' not found in {}", name, file.display());
    };
    println!("{}", serde_json::to_string_pretty(record)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> MergeSettings {
        MergeSettings {
            identity_field: "Name".to_string(),
            ..MergeSettings::default()
        }
    }

    #[tokio::test]
    async fn found_platform_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged.csv");
        std::fs::write(&path, "Name,G2 Rating\nVertex AI,4.3\n").unwrap();

        assert!(cmd_lookup(&settings(), &path, "vertex ai").await.is_ok());
    }

    #[tokio::test]
    async fn missing_platform_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged.csv");
        std::fs::write(&path, "Name,G2 Rating\nVertex AI,4.3\n").unwrap();

        let err = cmd_lookup(&settings(), &path, "SageMaker").await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
