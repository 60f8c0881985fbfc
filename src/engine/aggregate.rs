//! Per-document species aggregation.
//!
//! Groups every valid record in a document by scientific name (case-folded)
//! into [`SpeciesAggregate`] values. The keyed map used for grouping is local
//! to one call and discarded with it; output order is alphabetical, so runs
//! are deterministic.

use crate::record::{SpeciesAggregate, SpeciesRecord, TableData};
use std::collections::BTreeMap;

/// Fold all valid records across `tables` into per-species aggregates.
pub(crate) fn aggregate_species(tables: &[TableData]) -> Vec<SpeciesAggregate> {
    let mut by_name: BTreeMap<String, SpeciesAggregate> = BTreeMap::new();

    for table in tables {
        for record in &table.processed_records {
            fold(&mut by_name, record);
        }
    }

    by_name.into_values().collect()
}

fn fold(by_name: &mut BTreeMap<String, SpeciesAggregate>, record: &SpeciesRecord) {
    let Some(name) = &record.scientific_name else { return };
    let key = name.to_lowercase();
    match by_name.get_mut(&key) {
        Some(aggregate) => aggregate.observe(record),
        None => {
            if let Some(aggregate) = SpeciesAggregate::from_record(record) {
                by_name.insert(key, aggregate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table_with(records: Vec<SpeciesRecord>) -> TableData {
        TableData {
            page_number: 1,
            table_index: 0,
            table_name: "species".to_string(),
            headers: Vec::new(),
            rows: Vec::new(),
            record_count: records.len(),
            processed_records: records,
            validation: None,
        }
    }

    fn record(name: &str, common: Option<&str>, location: Option<&str>) -> SpeciesRecord {
        SpeciesRecord {
            scientific_name: Some(name.to_string()),
            common_name: common.map(str::to_string),
            location: location.map(str::to_string),
            ..SpeciesRecord::default()
        }
    }

    #[test]
    fn groups_across_tables_case_insensitively() {
        let flora = table_with(vec![
            record("Eucalyptus regnans", Some("Mountain Ash"), Some("Smith Creek")),
            record("Acacia dealbata", None, None),
        ]);
        let more = table_with(vec![record("EUCALYPTUS REGNANS", None, Some("Mole Creek"))]);

        let aggregates = aggregate_species(&[flora, more]);
        assert_eq!(aggregates.len(), 2);

        // BTreeMap keying makes the order alphabetical.
        assert_eq!(aggregates[0].scientific_name, "Acacia dealbata");
        let eucalypt = &aggregates[1];
        assert_eq!(eucalypt.record_count, 2);
        assert_eq!(eucalypt.common_name.as_deref(), Some("Mountain Ash"));
        assert_eq!(eucalypt.locations.len(), 2);
    }

    #[test]
    fn empty_document_aggregates_to_nothing() {
        assert!(aggregate_species(&[]).is_empty());
    }
}
