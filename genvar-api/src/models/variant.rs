//! Derived variant records served to the frontend

use serde::Serialize;

/// Placeholder for values the upstream payload does not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Strip `prefix:` namespaces from a population identifier
///
/// `1000GENOMES:phase_3:YRI` becomes `YRI`; names without a colon are returned unchanged.
pub fn clean_population_code(population: &str) -> &str {
    population.rsplit(':').next().unwrap_or(population)
}

/// Map coordinates and display metadata for a population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
    /// True for super-populations, ancestry groups and unknown populations
    pub is_region: bool,
}

/// Minor-allele frequency for one population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationFrequency {
    /// Population name exactly as reported upstream
    pub population: String,
    /// Second most frequent allele
    pub allele: String,
    /// Minor-allele frequency rounded to 4 decimals
    pub frequency: f64,
    pub lat: f64,
    pub lon: f64,
    pub label: String,
    pub is_region: bool,
}

/// Populations sharing the highest observed minor-allele frequency
///
/// Member data is stored as parallel arrays (one entry per population) because the
/// frontend plots them directly. The arrays only grow through [`HighestMafTieSet::replace`]
/// and [`HighestMafTieSet::append`], so their lengths always agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HighestMafTieSet {
    #[serde(rename = "highest_maf_populations")]
    populations: Vec<String>,
    #[serde(rename = "highest_maf_lat")]
    latitudes: Vec<f64>,
    #[serde(rename = "highest_maf_lon")]
    longitudes: Vec<f64>,
    #[serde(rename = "highest_maf_labels")]
    labels: Vec<String>,
    #[serde(rename = "highest_maf_is_region")]
    is_region: Vec<bool>,
    #[serde(rename = "highest_maf_allele")]
    allele: Option<String>,
    #[serde(rename = "highest_maf_value")]
    frequency: Option<f64>,
}

impl HighestMafTieSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard current members; `population` becomes the sole holder of a new maximum
    pub fn replace(&mut self, allele: &str, frequency: f64, population: &str, geo: &GeoPoint) {
        self.populations.clear();
        self.latitudes.clear();
        self.longitudes.clear();
        self.labels.clear();
        self.is_region.clear();
        self.allele = Some(allele.to_string());
        self.frequency = Some(frequency);
        self.push(population, geo);
    }

    /// Add a population that ties the current maximum
    ///
    /// The winning allele stays the one of the population that set the maximum.
    pub fn append(&mut self, population: &str, geo: &GeoPoint) {
        self.push(population, geo);
    }

    fn push(&mut self, population: &str, geo: &GeoPoint) {
        self.populations
            .push(clean_population_code(population).to_string());
        self.latitudes.push(geo.lat);
        self.longitudes.push(geo.lon);
        self.labels.push(geo.label.clone());
        self.is_region.push(geo.is_region);
    }

    pub fn is_empty(&self) -> bool {
        self.populations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.populations.len()
    }

    /// Clean population codes, in the order they joined
    pub fn populations(&self) -> &[String] {
        &self.populations
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_region(&self) -> &[bool] {
        &self.is_region
    }

    pub fn allele(&self) -> Option<&str> {
        self.allele.as_deref()
    }

    pub fn frequency(&self) -> Option<f64> {
        self.frequency
    }

    /// `"{allele}: {maf:.2} ({codes})"`, or `"N/A"` when empty
    pub fn display(&self) -> String {
        match (&self.allele, self.frequency) {
            (Some(allele), Some(frequency)) if !self.is_empty() => format!(
                "{}: {:.2} ({})",
                allele,
                frequency,
                self.populations.join(", ")
            ),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Consolidated variant annotation
///
/// Built once per successful lookup by the assembler and serialized as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantRecord {
    pub rsid: String,
    pub chromosome: String,
    pub position: i64,
    pub alleles: String,
    /// Highest MAF with its source populations, e.g. `"G: 0.42 (YRI)"`
    pub minor_allele_freq: String,
    /// 1000 Genomes phase 3 global MAF, e.g. `"G: 0.29"`
    pub maf_1000g: String,
    pub pop_frequencies: Vec<PopulationFrequency>,
    pub genes: Vec<String>,
    pub consequence: String,
    #[serde(flatten)]
    pub highest_maf: HighestMafTieSet,
}
