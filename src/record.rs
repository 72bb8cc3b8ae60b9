use crate::error::MetaError;
use crate::keys::{self, Row};
use crate::sample::SampleIdentity;

pub const SPECIES: &str = "Human";
pub const IMAGING_ASSAY_TYPE: &str = "t-CyCIF";
pub const FIXATIVE_TYPE: &str = "FFPE";

/// Fixed-shape metadata for one sample. Every field is always present;
/// a blank value is the empty string, never an absent key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRecord {
    pub biopsy_results: String,
    pub tested_for_genetic_risk: String,
    pub genetic_features: String,
    pub breast_cancer: String,
    pub age_diagnosed_with_breast_cancer: String,
    pub species: String,
    pub race: String,
    pub hispanic: String,
    pub ashkenazi_jewish: String,
    pub age_at_donation: String,
    pub age_at_first_period: String,
    pub relative_with_breast_ovarian_cancer: String,
    pub breast_biopsy: String,
    pub history_of_other_cancers: String,
    pub hysterectomy_or_ovary_removal: String,
    pub hormone_replacement_therapy: String,
    pub live_births: String,
    pub menstrual_status: String,
    pub years_smoking: String,
    pub currently_smoke: String,
    pub cigarettes_per_day: String,
    pub years_drinking: String,
    pub currently_drink: String,
    pub drinks_per_week: String,
    pub imaging_assay_type: String,
    pub fixative_type: String,
    pub attribution: String,
    /// Identifier lines in insertion order.
    pub identifiers: Vec<(String, String)>,
}

pub fn parse_row(
    row: &Row,
    identity: &SampleIdentity,
    citation: &str,
) -> Result<MetadataRecord, MetaError> {
    Ok(MetadataRecord {
        biopsy_results: keys::resolve(row, "Biopsy Results")?,
        tested_for_genetic_risk: keys::resolve(row, "Tested for Genetic Risk")?,
        genetic_features: derive_composite_flag(row, &[keys::BRCA1_MUTANT, keys::BRCA2_MUTANT])?,
        breast_cancer: keys::resolve(row, "Breast Cancer")?,
        age_diagnosed_with_breast_cancer: keys::resolve(row, "Age Diagnosed with Breast Cancer")?,
        species: SPECIES.to_string(),
        race: keys::resolve(row, "Race")?,
        hispanic: keys::resolve(row, "Hispanic")?,
        ashkenazi_jewish: keys::resolve(row, "Ashkenazi Jewish")?,
        age_at_donation: keys::resolve(row, "Age at Donation")?,
        age_at_first_period: keys::resolve(row, "Age at First Period")?,
        relative_with_breast_ovarian_cancer: keys::resolve(
            row,
            "Relative with Breast/Ovarian Cancer",
        )?,
        breast_biopsy: keys::resolve(row, "Breast Biopsy")?,
        history_of_other_cancers: keys::resolve(row, "History of Other Cancers")?,
        hysterectomy_or_ovary_removal: keys::resolve(row, "Hysterectomy or Ovary Removal")?,
        hormone_replacement_therapy: keys::resolve(row, "Hormone Replacement Therapy")?,
        live_births: keys::resolve(row, "Live Births")?,
        menstrual_status: keys::resolve(row, "Menstrual Status")?,
        years_smoking: keys::resolve(row, "Years Smoking")?,
        currently_smoke: keys::resolve(row, "Currently Smoke")?,
        cigarettes_per_day: keys::resolve(row, "Cigarettes Per Day")?,
        years_drinking: keys::resolve(row, "Years Drinking")?,
        currently_drink: keys::resolve(row, "Currently Drink")?,
        drinks_per_week: keys::resolve(row, "Drinks Per Week")?,
        imaging_assay_type: IMAGING_ASSAY_TYPE.to_string(),
        fixative_type: FIXATIVE_TYPE.to_string(),
        attribution: citation.to_string(),
        identifiers: vec![(keys::SAMPLE_NAME.to_string(), identity.name.clone())],
    })
}

/// Folds a list of boolean-indicator columns into one descriptive string:
/// "N/A" when every column is not-applicable, "None" when no column is
/// affirmative, otherwise the affirmative canonical key names joined by
/// ", " in input order.
pub fn derive_composite_flag(row: &Row, fields: &[&str]) -> Result<String, MetaError> {
    let mut all_not_applicable = true;
    let mut affirmative = Vec::new();
    for field in fields {
        if !keys::is_not_applicable(row, field)? {
            all_not_applicable = false;
        }
        if keys::is_affirmative(row, field)? {
            affirmative.push(*field);
        }
    }
    if all_not_applicable {
        return Ok("N/A".to_string());
    }
    if affirmative.is_empty() {
        return Ok("None".to_string());
    }
    Ok(affirmative.join(", "))
}
