//! Lookup of a single record by identity.

use super::{Record, Table};

/// Find the first record whose identity field equals `name`, ignoring case.
pub fn find_by_identity<'t>(table: &'t Table, identity: &str, name: &str) -> Option<&'t Record> {
    let wanted = name.trim().to_lowercase();
    table
        .records()
        .iter()
        .find(|record| {
            record
                .get(identity)
                .is_some_and(|value| value.trim().to_lowercase() == wanted)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        let rows: Vec<Record> = vec![
            [("Name", "Vertex AI")].into_iter().collect(),
            [("Name", "IBM watsonx.ai")].into_iter().collect(),
        ];
        let table: Table = rows.into_iter().collect();

        let found = find_by_identity(&table, "Name", "ibm WATSONX.AI").unwrap();
        assert_eq!(found.get("Name"), Some("IBM watsonx.ai"));
    }

    #[test]
    fn no_match_returns_none() {
        let rows: Vec<Record> = vec![[("Name", "Vertex AI")].into_iter().collect()];
        let table: Table = rows.into_iter().collect();

        assert!(find_by_identity(&table, "Name", "Vertex").is_none());
        assert!(find_by_identity(&table, "Missing", "Vertex AI").is_none());
    }
}
