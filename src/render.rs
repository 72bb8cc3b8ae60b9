use crate::record::MetadataRecord;

const UNKNOWN: &str = "Unknown";
pub const ATTRIBUTION_FIELD: &str = "Please cite the publication and underlying data as";

/// Serializes a record into the fixed markdown template consumed by the
/// exhibit viewer. Whitespace is part of the contract: trailing double
/// spaces are markdown line breaks, and blank lines separate sections.
pub fn render(record: &MetadataRecord) -> String {
    let identifiers = record
        .identifiers
        .iter()
        .map(|(key, value)| field(key, value))
        .collect::<Vec<_>>()
        .join("\n");

    // {br} is the markdown hard line break: two trailing spaces.
    format!(
        "# Metadata about this sample{br}

### Diagnosis {biopsy_results}
{tested_for_genetic_risk}
{genetic_features}
{breast_cancer}{age_diagnosed}

### Demographics{br}
{species}
{race}
{hispanic}
{ashkenazi_jewish}
{age_at_donation}
{age_at_first_period}
{relative_with_cancer}

### Clinical history
{breast_biopsy}
{history_of_other_cancers}
{hysterectomy}
{hormone_replacement}
{live_births}
{menstrual_status}
{years_smoking}
{currently_smoke}
{cigarettes_per_day}
{years_drinking}
{currently_drink}
{drinks_per_week}

{imaging_assay_type}
{fixative_type}

### Attribution {attribution}

### Sample Identifiers{br}
{identifiers}",
        br = "  ",
        biopsy_results = optional_line("Biopsy Results", &record.biopsy_results),
        tested_for_genetic_risk =
            field_or_unknown("Tested for Genetic Risk", &record.tested_for_genetic_risk),
        genetic_features = field_or_unknown("Genetic Features", &record.genetic_features),
        breast_cancer = field_or_unknown("Breast Cancer", &record.breast_cancer),
        age_diagnosed = optional_line(
            "Age Diagnosed with Breast Cancer",
            &record.age_diagnosed_with_breast_cancer,
        ),
        species = field_or_unknown("Species", &record.species),
        race = field_or_unknown("Race", &record.race),
        hispanic = field_or_unknown("Hispanic", &record.hispanic),
        ashkenazi_jewish = field_or_unknown("Ashkenazi Jewish", &record.ashkenazi_jewish),
        age_at_donation = field_or_unknown("Age at Donation", &record.age_at_donation),
        age_at_first_period =
            field_or_unknown("Age at First Period", &record.age_at_first_period),
        relative_with_cancer = field_or_unknown(
            "Relative with Breast/Ovarian Cancer",
            &record.relative_with_breast_ovarian_cancer,
        ),
        breast_biopsy = field_or_unknown("Breast Biopsy", &record.breast_biopsy),
        history_of_other_cancers =
            field_or_unknown("History of Other Cancers", &record.history_of_other_cancers),
        hysterectomy = field_or_unknown(
            "Hysterectomy or Ovary Removal",
            &record.hysterectomy_or_ovary_removal,
        ),
        hormone_replacement = field_or_unknown(
            "Hormone Replacement Therapy",
            &record.hormone_replacement_therapy,
        ),
        live_births = field_or_unknown("Live Births", &record.live_births),
        menstrual_status = field_or_unknown("Menstrual Status", &record.menstrual_status),
        years_smoking = field_or_unknown("Years Smoking", &record.years_smoking),
        currently_smoke = field_or_unknown("Currently Smoke", &record.currently_smoke),
        cigarettes_per_day = field_or_unknown("Cigarettes Per Day", &record.cigarettes_per_day),
        years_drinking = field_or_unknown("Years Drinking", &record.years_drinking),
        currently_drink = field_or_unknown("Currently Drink", &record.currently_drink),
        drinks_per_week = field_or_unknown("Drinks Per Week", &record.drinks_per_week),
        imaging_assay_type = field("Imaging Assay Type", &record.imaging_assay_type),
        fixative_type = field("Fixative Type", &record.fixative_type),
        attribution = optional_line(ATTRIBUTION_FIELD, &record.attribution),
        identifiers = identifiers,
    )
}

fn field(name: &str, value: &str) -> String {
    format!("**{name}**: {value}")
}

fn field_or_unknown(name: &str, value: &str) -> String {
    let value = if value.is_empty() { UNKNOWN } else { value };
    field(name, value)
}

/// Conditional annotation line: omitted entirely, leading newline included,
/// when the value is blank.
fn optional_line(name: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!("\n{}", field(name, value))
}

#[cfg(test)]
mod tests {
    use crate::record::MetadataRecord;

    use super::*;

    fn blank_record() -> MetadataRecord {
        MetadataRecord {
            biopsy_results: String::new(),
            tested_for_genetic_risk: String::new(),
            genetic_features: String::new(),
            breast_cancer: String::new(),
            age_diagnosed_with_breast_cancer: String::new(),
            species: "Human".to_string(),
            race: String::new(),
            hispanic: String::new(),
            ashkenazi_jewish: String::new(),
            age_at_donation: String::new(),
            age_at_first_period: String::new(),
            relative_with_breast_ovarian_cancer: String::new(),
            breast_biopsy: String::new(),
            history_of_other_cancers: String::new(),
            hysterectomy_or_ovary_removal: String::new(),
            hormone_replacement_therapy: String::new(),
            live_births: String::new(),
            menstrual_status: String::new(),
            years_smoking: String::new(),
            currently_smoke: String::new(),
            cigarettes_per_day: String::new(),
            years_drinking: String::new(),
            currently_drink: String::new(),
            drinks_per_week: String::new(),
            imaging_assay_type: "t-CyCIF".to_string(),
            fixative_type: "FFPE".to_string(),
            attribution: "Example citation.".to_string(),
            identifiers: vec![("Sample Name".to_string(), "CK17-M".to_string())],
        }
    }

    #[test]
    fn five_section_headers_in_order() {
        let doc = render(&blank_record());
        let headers: Vec<&str> = doc
            .lines()
            .filter(|line| line.starts_with("### "))
            .collect();
        assert_eq!(headers.len(), 5);
        assert!(headers[0].starts_with("### Diagnosis"));
        assert!(headers[1].starts_with("### Demographics"));
        assert!(headers[2].starts_with("### Clinical history"));
        assert!(headers[3].starts_with("### Attribution"));
        assert!(headers[4].starts_with("### Sample Identifiers"));
        assert!(doc.starts_with("# Metadata about this sample  \n"));
    }

    #[test]
    fn blank_fields_render_unknown() {
        let doc = render(&blank_record());
        assert!(doc.contains("**Breast Cancer**: Unknown"));
        assert!(doc.contains("**Race**: Unknown"));
        assert!(doc.contains("**Currently Smoke**: Unknown"));
    }

    #[test]
    fn optional_lines_omitted_when_blank() {
        let doc = render(&blank_record());
        assert!(!doc.contains("**Biopsy Results**"));
        assert!(!doc.contains("**Age Diagnosed with Breast Cancer**"));
        assert!(doc.contains("### Diagnosis \n**Tested for Genetic Risk**"));
    }

    #[test]
    fn optional_lines_present_when_set() {
        let mut record = blank_record();
        record.biopsy_results = "Benign".to_string();
        record.age_diagnosed_with_breast_cancer = "45".to_string();
        let doc = render(&record);
        assert!(doc.contains("### Diagnosis \n**Biopsy Results**: Benign\n"));
        assert!(doc.contains("**Breast Cancer**: Unknown\n**Age Diagnosed with Breast Cancer**: 45\n"));
    }

    #[test]
    fn attribution_line_omitted_without_citation() {
        let mut record = blank_record();
        record.attribution = String::new();
        let doc = render(&record);
        assert!(!doc.contains("**Please cite"));
        assert!(doc.contains("### Attribution \n"));
    }

    #[test]
    fn identifiers_render_in_insertion_order() {
        let mut record = blank_record();
        record
            .identifiers
            .push(("Atlas ID".to_string(), "HTA-42".to_string()));
        let doc = render(&record);
        assert!(doc.ends_with("**Sample Name**: CK17-M\n**Atlas ID**: HTA-42"));
    }

    #[test]
    fn imaging_constants_always_present() {
        let doc = render(&blank_record());
        assert!(doc.contains("**Imaging Assay Type**: t-CyCIF\n**Fixative Type**: FFPE"));
    }
}
