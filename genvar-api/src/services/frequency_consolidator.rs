//! Population frequency consolidation
//!
//! Turns the raw `populations[]` array into one minor-allele frequency per population
//! and the set of populations holding the highest MAF.
//!
//! **Minor allele convention:** within a population the records are ranked by frequency
//! (descending, stable) and the record at rank 1 is the minor allele. For tri-allelic and
//! higher sites this is not necessarily the rarest allele; the convention is kept as is.

use std::collections::HashMap;

use crate::models::ensembl::PopulationRecord;
use crate::models::variant::{HighestMafTieSet, PopulationFrequency, NOT_AVAILABLE};
use crate::services::geo_lookup;

/// Population name of the 1000 Genomes phase 3 global aggregate
pub const THOUSAND_GENOMES_GLOBAL: &str = "1000GENOMES:phase_3:ALL";

/// Output of [`consolidate`]
#[derive(Debug, Clone, PartialEq)]
pub struct Consolidation {
    /// One entry per qualifying population, in first-seen order
    pub frequencies: Vec<PopulationFrequency>,
    pub highest_maf: HighestMafTieSet,
    /// `"{allele}: {maf:.2}"` for the 1000 Genomes global population, else `"N/A"`
    pub maf_1000g: String,
}

/// Insertion-ordered grouping of allele records by population name
#[derive(Debug, Default)]
pub struct PopulationGroups<'a> {
    index: HashMap<&'a str, usize>,
    groups: Vec<(&'a str, Vec<&'a PopulationRecord>)>,
}

impl<'a> PopulationGroups<'a> {
    /// Group in a single pass; group order is the order names first appear
    pub fn from_records(records: &'a [PopulationRecord]) -> Self {
        let mut grouped = Self::default();
        for record in records {
            grouped.insert(record);
        }
        grouped
    }

    fn insert(&mut self, record: &'a PopulationRecord) {
        let name = record.population.as_str();
        match self.index.get(name) {
            Some(&slot) => self.groups[slot].1.push(record),
            None => {
                self.index.insert(name, self.groups.len());
                self.groups.push((name, vec![record]));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a PopulationRecord])> + '_ {
        self.groups
            .iter()
            .map(|(name, records)| (*name, records.as_slice()))
    }
}

/// Rank-1 record of a population, or `None` when fewer than two alleles are reported
pub fn minor_allele<'a>(records: &[&'a PopulationRecord]) -> Option<&'a PopulationRecord> {
    if records.len() < 2 {
        return None;
    }
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));
    Some(ranked[1])
}

/// Round to 4 decimals from the exact binary value (ties to even), as `{:.4}` does
fn round4(value: f64) -> f64 {
    format!("{:.4}", value).parse().unwrap_or(value)
}

/// Derive per-population MAFs and the highest-MAF tie set
pub fn consolidate(populations: &[PopulationRecord]) -> Consolidation {
    let groups = PopulationGroups::from_records(populations);

    let mut frequencies = Vec::with_capacity(groups.len());
    let mut highest_maf = HighestMafTieSet::new();
    let mut running_max = -1.0_f64;
    let mut maf_1000g = NOT_AVAILABLE.to_string();

    for (name, records) in groups.iter() {
        let Some(minor) = minor_allele(records) else {
            continue;
        };
        let maf = minor.frequency;

        if name == THOUSAND_GENOMES_GLOBAL {
            maf_1000g = format!("{}: {:.2}", minor.allele, maf);
        }

        let geo = geo_lookup::lookup(name);

        if maf > running_max {
            running_max = maf;
            highest_maf.replace(&minor.allele, maf, name, &geo);
        } else if maf == running_max && running_max >= 0.0 {
            highest_maf.append(name, &geo);
        }

        frequencies.push(PopulationFrequency {
            population: name.to_string(),
            allele: minor.allele.clone(),
            frequency: round4(maf),
            lat: geo.lat,
            lon: geo.lon,
            label: geo.label,
            is_region: geo.is_region,
        });
    }

    Consolidation {
        frequencies,
        highest_maf,
        maf_1000g,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(population: &str, allele: &str, frequency: f64) -> PopulationRecord {
        PopulationRecord {
            population: population.to_string(),
            allele: allele.to_string(),
            frequency,
        }
    }

    #[test]
    fn test_single_population_scenario() {
        let input = vec![record("POP_A", "A", 0.9), record("POP_A", "G", 0.1)];
        let result = consolidate(&input);

        assert_eq!(result.frequencies.len(), 1);
        let freq = &result.frequencies[0];
        assert_eq!(freq.population, "POP_A");
        assert_eq!(freq.allele, "G");
        assert_eq!(freq.frequency, 0.1);
        assert_eq!(result.maf_1000g, "N/A");
        assert_eq!(result.highest_maf.display(), "G: 0.10 (POP_A)");
    }

    #[test]
    fn test_single_allele_population_does_not_qualify() {
        let input = vec![
            record("MONO", "A", 1.0),
            record("POP_A", "A", 0.7),
            record("POP_A", "C", 0.3),
        ];
        let result = consolidate(&input);

        assert_eq!(result.frequencies.len(), 1);
        assert_eq!(result.frequencies[0].population, "POP_A");
    }

    #[test]
    fn test_no_qualifying_population() {
        let result = consolidate(&[record("MONO", "A", 1.0)]);
        assert!(result.frequencies.is_empty());
        assert!(result.highest_maf.is_empty());
        assert_eq!(result.highest_maf.display(), "N/A");
        assert_eq!(result.maf_1000g, "N/A");
    }

    #[test]
    fn test_maf_is_second_highest_not_highest() {
        // Records deliberately unsorted
        let input = vec![
            record("TRI", "C", 0.05),
            record("TRI", "A", 0.60),
            record("TRI", "G", 0.35),
        ];
        let result = consolidate(&input);

        assert_eq!(result.frequencies[0].allele, "G");
        assert_eq!(result.frequencies[0].frequency, 0.35);
    }

    #[test]
    fn test_equal_frequencies_keep_input_order() {
        let input = vec![record("HALF", "A", 0.5), record("HALF", "T", 0.5)];
        let result = consolidate(&input);
        assert_eq!(result.frequencies[0].allele, "T");
    }

    #[test]
    fn test_tie_appends_in_encounter_order() {
        let input = vec![
            record("1000GENOMES:phase_3:YRI", "A", 0.75),
            record("1000GENOMES:phase_3:YRI", "G", 0.25),
            record("LOW", "A", 0.9),
            record("LOW", "G", 0.1),
            record("1000GENOMES:phase_3:CEU", "A", 0.75),
            record("1000GENOMES:phase_3:CEU", "G", 0.25),
        ];
        let result = consolidate(&input);
        let ties = &result.highest_maf;

        assert_eq!(ties.populations(), ["YRI", "CEU"]);
        assert_eq!(ties.labels()[0], "Yoruba in Ibadan, Nigeria");
        assert_eq!(ties.frequency(), Some(0.25));
        assert_eq!(result.highest_maf.display(), "G: 0.25 (YRI, CEU)");
    }

    #[test]
    fn test_higher_maf_replaces_tie_set() {
        let input = vec![
            record("P1", "A", 0.8),
            record("P1", "G", 0.2),
            record("P2", "A", 0.8),
            record("P2", "G", 0.2),
            record("P3", "A", 0.6),
            record("P3", "T", 0.4),
        ];
        let result = consolidate(&input);

        assert_eq!(result.highest_maf.populations(), ["P3"]);
        assert_eq!(result.highest_maf.allele(), Some("T"));
    }

    #[test]
    fn test_zero_maf_initializes_tie_set() {
        let input = vec![record("FIXED", "A", 1.0), record("FIXED", "G", 0.0)];
        let result = consolidate(&input);

        assert_eq!(result.highest_maf.populations(), ["FIXED"]);
        assert_eq!(result.highest_maf.display(), "G: 0.00 (FIXED)");
    }

    #[test]
    fn test_thousand_genomes_global_field() {
        let input = vec![
            record(THOUSAND_GENOMES_GLOBAL, "A", 0.7096),
            record(THOUSAND_GENOMES_GLOBAL, "G", 0.2904),
        ];
        let result = consolidate(&input);

        assert_eq!(result.maf_1000g, "G: 0.29");
        assert_eq!(result.frequencies[0].label, "Global (All Populations)");
        assert_eq!(result.highest_maf.populations(), ["ALL"]);
    }

    #[test]
    fn test_frequency_rounded_to_four_decimals() {
        let input = vec![record("P", "A", 0.876543), record("P", "G", 0.123457)];
        let result = consolidate(&input);
        assert_eq!(result.frequencies[0].frequency, 0.1235);
        // The tie set keeps the unrounded value
        assert_eq!(result.highest_maf.frequency(), Some(0.123457));
    }

    #[test]
    fn test_rounding_uses_exact_decimal_value() {
        // 0.00035 is stored as 0.000349999..., so it rounds down
        let input = vec![record("P", "A", 1.0), record("P", "G", 0.00035)];
        let result = consolidate(&input);
        assert_eq!(result.frequencies[0].frequency, 0.0003);

        assert_eq!(round4(0.00015), 0.0001);
        assert_eq!(round4(0.12345), 0.1235);
        assert_eq!(round4(0.28565), 0.2857);
        assert_eq!(round4(0.1), 0.1);
        assert_eq!(round4(0.0), 0.0);
    }

    #[test]
    fn test_tie_set_invariant() {
        let input = vec![
            record("A1", "A", 0.6),
            record("A1", "G", 0.4),
            record("A2", "A", 0.9),
            record("A2", "G", 0.1),
            record("A3", "C", 0.6),
            record("A3", "T", 0.4),
            record("A4", "C", 0.7),
            record("A4", "T", 0.3),
        ];
        let result = consolidate(&input);
        let ties = &result.highest_maf;
        let top = ties.frequency().unwrap();

        assert_eq!(ties.populations(), ["A1", "A3"]);
        for freq in &result.frequencies {
            if ties.populations().contains(&freq.population) {
                assert_eq!(freq.frequency, top);
            } else {
                assert!(freq.frequency < top);
            }
        }
    }

    #[test]
    fn test_consolidation_is_idempotent() {
        let input = vec![
            record("gnomADg:afr", "A", 0.55),
            record("gnomADg:afr", "G", 0.45),
            record("1000GENOMES:phase_3:JPT", "A", 0.55),
            record("1000GENOMES:phase_3:JPT", "G", 0.45),
        ];
        assert_eq!(consolidate(&input), consolidate(&input));
    }

    #[test]
    fn test_groups_preserve_first_seen_order() {
        let input = vec![
            record("B", "A", 0.5),
            record("A", "A", 0.5),
            record("B", "C", 0.5),
            record("C", "A", 1.0),
        ];
        let groups = PopulationGroups::from_records(&input);
        let names: Vec<&str> = groups.iter().map(|(name, _)| name).collect();

        assert_eq!(names, ["B", "A", "C"]);
        assert_eq!(groups.iter().next().unwrap().1.len(), 2);
    }
}
