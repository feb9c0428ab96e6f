//! Population coordinate lookup
//!
//! Maps population and cohort identifiers reported by Ensembl to map coordinates.
//! Lookup order:
//! 1. Exact key match
//! 2. First table key `K` (in table order) such that the name contains `:K` or `_K`
//! 3. Synthesized region at (0, 0) labelled with the original name
//!
//! Step 2 depends on table order for names that contain several known codes; that order is
//! an implementation detail, not part of the lookup contract.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::variant::GeoPoint;

/// Static table entry
#[derive(Debug, Clone, Copy)]
pub struct PopulationSite {
    pub code: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub label: &'static str,
    pub is_region: bool,
}

impl PopulationSite {
    fn to_point(self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lon: self.lon,
            label: self.label.to_string(),
            is_region: self.is_region,
        }
    }
}

const fn site(code: &'static str, lat: f64, lon: f64, label: &'static str, is_region: bool) -> PopulationSite {
    PopulationSite {
        code,
        lat,
        lon,
        label,
        is_region,
    }
}

/// Known populations, in suffix-match priority order
pub static POPULATION_SITES: &[PopulationSite] = &[
    // 1000 Genomes super-populations
    site("AFR", 2.0, 16.0, "African Populations (Region)", true),
    site("AMR", 15.0, -80.0, "Admixed American Populations (Region)", true),
    site("EAS", 34.0, 108.0, "East Asian Populations (Region)", true),
    site("EUR", 48.0, 14.0, "European Populations (Region)", true),
    site("SAS", 22.0, 78.0, "South Asian Populations (Region)", true),
    site("ALL", 20.0, 0.0, "Global (All Populations)", true),
    // 1000 Genomes AFR
    site("YRI", 7.37, 3.94, "Yoruba in Ibadan, Nigeria", false),
    site("LWK", 0.59, 34.78, "Luhya in Webuye, Kenya", false),
    site("GWD", 13.44, -16.48, "Gambian in Western Division – Mandinka", false),
    site("MSL", 8.46, -11.77, "Mende in Sierra Leone", false),
    site("ESN", 6.33, 5.62, "Esan in Nigeria", false),
    site("ASW", 33.44, -94.04, "African Ancestry in Southwest USA", false),
    site("ACB", 13.19, -59.54, "African Caribbean in Barbados", false),
    // 1000 Genomes AMR
    site("MXL", 34.05, -118.24, "Mexican Ancestry in Los Angeles, California, USA", false),
    site("PUR", 18.22, -66.59, "Puerto Rican in Puerto Rico", false),
    site("CLM", 6.24, -75.58, "Colombian in Medellin, Colombia", false),
    site("PEL", -12.04, -77.04, "Peruvian in Lima, Peru", false),
    // 1000 Genomes EAS
    site("CHB", 39.90, 116.40, "Han Chinese in Beijing, China", false),
    site("JPT", 35.67, 139.65, "Japanese in Tokyo, Japan", false),
    site("CHS", 23.12, 113.26, "Han Chinese South", false),
    site("CDX", 22.00, 100.79, "Chinese Dai in Xishuangbanna", false),
    site("KHV", 10.82, 106.63, "Kinh in Ho Chi Minh City, Vietnam", false),
    // 1000 Genomes EUR
    site("CEU", 39.32, -111.09, "Utah residents with Northern/Western European ancestry", false),
    site("TSI", 43.76, 11.25, "Toscani in Italia", false),
    site("FIN", 60.16, 24.93, "Finnish in Finland", false),
    site("GBR", 52.35, -1.17, "British from England and Scotland", false),
    site("IBS", 40.46, -3.74, "Iberian Populations in Spain", false),
    // 1000 Genomes SAS
    site("GIH", 29.76, -95.36, "Gujarati Indians in Houston, Texas, USA", false),
    site("PJL", 31.52, 74.35, "Punjabi in Lahore, Pakistan", false),
    site("BEB", 23.81, 90.41, "Bengali in Bangladesh", false),
    site("STU", 51.50, -0.12, "Sri Lankan Tamil in the UK", false),
    site("ITU", 52.48, -1.89, "Indian Telugu in the UK", false),
    // gnomAD ancestry groups (always regions)
    site("afr", 2.0, 16.0, "gnomAD: African/African American", true),
    site("ami", 40.0, -76.0, "gnomAD: Amish", true),
    site("amr", 10.0, -80.0, "gnomAD: Admixed American", true),
    site("asj", 31.7, 35.2, "gnomAD: Ashkenazi Jewish", true),
    site("eas", 34.0, 108.0, "gnomAD: East Asian", true),
    site("fin", 61.9, 25.7, "gnomAD: Finnish", true),
    site("mid", 23.8, 45.0, "gnomAD: Middle Eastern", true),
    site("nfe", 48.0, 14.0, "gnomAD: Non-Finnish European", true),
    site("sas", 22.0, 78.0, "gnomAD: South Asia", true),
    // NCBI ALFA macro-regions
    site("ALFA:SAMN10492695", 50.0, 10.0, "ALFA: Europe", true),
    site("ALFA:SAMN10492696", -1.0, 20.0, "ALFA: African others", true),
    site("ALFA:SAMN10492697", 35.0, 105.0, "ALFA: East Asian", true),
    site("ALFA:SAMN10492698", 34.0, -98.0, "ALFA: African American", true),
    site("ALFA:SAMN10492699", -15.0, -60.0, "ALFA: Latin American 1", true),
    site("ALFA:SAMN10492700", -10.0, -55.0, "ALFA: Latin American 2", true),
    site("ALFA:SAMN10492701", 15.0, 100.0, "ALFA: Other Asian", true),
    site("ALFA:SAMN10492702", 21.0, 78.0, "ALFA: South Asian", true),
    site("ALFA:SAMN10492703", 2.0, 22.0, "ALFA: African", true),
    site("ALFA:SAMN10492704", 30.0, 110.0, "ALFA: Asian", true),
    site("ALFA:SAMN11605645", 0.0, 0.0, "ALFA: Other", true),
    // Other cohorts
    site("GEM-J", 36.2, 138.2, "GEM-J: Japan", false),
    site("ALSPAC", 51.4, -2.6, "ALSPAC Cohort (UK)", false),
    site("TWINSUK", 51.5, -0.1, "TwinsUK", false),
    site("ESP6500:AA", 35.0, -100.0, "NHLBI ESP: African American", false),
    site("ESP6500:EA", 40.0, -5.0, "NHLBI ESP: Europe American", false),
    site("GWF", 13.4, -16.5, "GGVP: Gambian - Fula", false),
    site("GWJ", 13.5, -16.6, "GGVP: Gambian - Jola", false),
    site("GWW", 13.6, -16.7, "GGVP: Gambian - Wolof", false),
];

static SITES_BY_CODE: Lazy<HashMap<&'static str, PopulationSite>> = Lazy::new(|| {
    POPULATION_SITES
        .iter()
        .map(|site| (site.code, *site))
        .collect()
});

/// Resolve map metadata for a population name
pub fn lookup(population: &str) -> GeoPoint {
    if let Some(site) = SITES_BY_CODE.get(population) {
        return site.to_point();
    }

    let suffix_match = POPULATION_SITES.iter().find(|site| {
        population.contains(&format!(":{}", site.code))
            || population.contains(&format!("_{}", site.code))
    });
    if let Some(site) = suffix_match {
        return site.to_point();
    }

    GeoPoint {
        lat: 0.0,
        lon: 0.0,
        label: population.to_string(),
        is_region: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let point = lookup("YRI");
        assert_eq!(point.label, "Yoruba in Ibadan, Nigeria");
        assert_eq!(point.lat, 7.37);
        assert_eq!(point.lon, 3.94);
        assert!(!point.is_region);
    }

    #[test]
    fn test_exact_match_on_namespaced_key() {
        let point = lookup("ALFA:SAMN10492695");
        assert_eq!(point.label, "ALFA: Europe");
        assert!(point.is_region);
    }

    #[test]
    fn test_colon_suffix_match() {
        assert_eq!(lookup("1000GENOMES:phase_3:CHB").label, "Han Chinese in Beijing, China");
        assert_eq!(lookup("1000GENOMES:phase_3:ALL").label, "Global (All Populations)");
        assert_eq!(lookup("gnomADg:nfe").label, "gnomAD: Non-Finnish European");
    }

    #[test]
    fn test_underscore_suffix_match() {
        assert_eq!(lookup("gnomADe_asj").label, "gnomAD: Ashkenazi Jewish");
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(lookup("1000GENOMES:phase_3:FIN").label, "Finnish in Finland");
        assert_eq!(lookup("gnomADg:fin").label, "gnomAD: Finnish");
    }

    #[test]
    fn test_unknown_population_fallback() {
        let point = lookup("POP_A");
        assert_eq!(point.lat, 0.0);
        assert_eq!(point.lon, 0.0);
        assert_eq!(point.label, "POP_A");
        assert!(point.is_region);
    }

    #[test]
    fn test_table_codes_are_unique() {
        assert_eq!(SITES_BY_CODE.len(), POPULATION_SITES.len());
    }
}
