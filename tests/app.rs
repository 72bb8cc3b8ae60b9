use std::fs;
use std::sync::Mutex;

use camino::Utf8PathBuf;
use serde_json::{Value, json};

use minerva_meta::app::{App, PatchOptions};
use minerva_meta::config::ResolvedConfig;
use minerva_meta::error::MetaError;
use minerva_meta::exhibit::ExhibitClient;
use minerva_meta::store::OutputStore;

const RAW_EXHIBIT: &str = r#"{"Images": ["i0"], "Name": "placeholder", "Stories": []}"#;

const COLUMNS: &[(&str, &str)] = &[
    ("Biopsy Results", "Benign"),
    ("Tested for Genetic Risk", "Yes"),
    ("BRCA1", "Yes"),
    ("BRCA2", "No"),
    ("Breast Cancer", "Yes"),
    ("Age Diagnosed with Breast Cancer", "45"),
    ("Race", "White"),
    ("Hispanic", "No"),
    ("Ashkenazi Jewish", "No"),
    ("Age at Donation", "52"),
    ("Age at First Period", "13"),
    ("Relative with Breast/Ovarian Cancer", "Yes"),
    ("Breast Biopsy", "Yes"),
    ("History of Other Cancers", "No"),
    ("Hysterectomy or Ovary Removal", "No"),
    ("Hormone Replacement Therapy", "No"),
    ("Live Births", "2"),
    ("Menstrual Status", "Post-menopausal"),
    ("Years Smoking", "0"),
    ("Currently Smoke", "No"),
    ("Cigarettes Per Day", "0"),
    ("Years Drinking", "10"),
    ("Currently Drink", "Yes"),
    ("Drinks Per Week Current Age", "2"),
];

fn sample_csv(samples: &[(&str, &str)]) -> String {
    let mut header = vec!["Sampe Name", "Minerva Title"];
    header.extend(COLUMNS.iter().map(|(column, _)| *column));
    let mut csv = header.join(",");
    csv.push('\n');
    for (name, title) in samples {
        let mut cells = vec![name.to_string(), title.to_string()];
        cells.extend(COLUMNS.iter().map(|(_, value)| value.to_string()));
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }
    csv
}

struct MockExhibit {
    fetched: Mutex<Vec<String>>,
}

impl MockExhibit {
    fn new() -> Self {
        Self {
            fetched: Mutex::new(Vec::new()),
        }
    }
}

impl ExhibitClient for MockExhibit {
    fn fetch(&self, url: &str) -> Result<String, MetaError> {
        self.fetched.lock().unwrap().push(url.to_string());
        Ok(RAW_EXHIBIT.to_string())
    }
}

struct FailingExhibit;

impl ExhibitClient for FailingExhibit {
    fn fetch(&self, _url: &str) -> Result<String, MetaError> {
        Err(MetaError::ExhibitStatus {
            status: 404,
            message: "not found".to_string(),
        })
    }
}

struct Fixture {
    _temp: tempfile::TempDir,
    config: ResolvedConfig,
}

fn fixture(csv: &str, links: &str) -> Fixture {
    let temp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    let table = root.join("samples.csv");
    let list = root.join("links.txt");
    fs::write(table.as_std_path(), csv).unwrap();
    fs::write(list.as_std_path(), links).unwrap();

    let config = ResolvedConfig {
        links: list,
        table,
        out_dir: root.join("exhibits"),
        backup_dir: root.join("exhibit-backups"),
        bucket_prefix: "atlas-bucket/stories".to_string(),
        citation: "cite me".to_string(),
    };
    Fixture {
        _temp: temp,
        config,
    }
}

fn app_for<E: ExhibitClient>(config: &ResolvedConfig, exhibit: E) -> App<E> {
    let store = OutputStore::new(config.out_dir.clone(), config.backup_dir.clone());
    App::new(store, exhibit)
}

#[test]
fn patches_matched_exhibits() {
    let csv = sample_csv(&[("CCK17-M", "CK17-M story"), ("CK19-BCC", "CK19 story")]);
    let links = "https://example.org/stories/CK17_M/exhibit.json\n\
                 https://example.org/stories/Ck19_BCC/exhibit.json\n";
    let fixture = fixture(&csv, links);
    let app = app_for(&fixture.config, MockExhibit::new());

    let result = app
        .run(&fixture.config, PatchOptions { dry_run: false })
        .unwrap();

    assert_eq!(result.items.len(), 2);
    assert_eq!(result.items[0].sample, "CK17-M");
    assert_eq!(result.items[0].storage_path, "CK17_M");
    assert_eq!(result.items[0].action, "patched");
    assert_eq!(result.items[1].storage_path, "Ck19_BCC");

    let patched_path = fixture.config.out_dir.join("CK17_M/exhibit.json");
    let patched: Value =
        serde_json::from_str(&fs::read_to_string(patched_path.as_std_path()).unwrap()).unwrap();
    assert_eq!(patched["Name"], "CK17-M story");
    assert_eq!(patched["FirstViewport"], json!({"Pan": [0.5, 0.5], "Zoom": 1.0}));
    assert_eq!(patched["Images"], json!(["i0"]));
    let header = patched["Header"].as_str().unwrap();
    assert!(header.starts_with("# Metadata about this sample"));
    assert!(header.contains("**Genetic Features**: BRCA1-mutant"));
    assert!(header.contains("**Sample Name**: CK17-M"));
    assert!(header.contains("**Please cite the publication and underlying data as**: cite me"));
}

#[test]
fn backup_preserves_fetched_body() {
    let csv = sample_csv(&[("CCK17-M", "CK17-M story")]);
    let links = "https://example.org/stories/CK17_M/exhibit.json\n";
    let fixture = fixture(&csv, links);
    let app = app_for(&fixture.config, MockExhibit::new());

    app.run(&fixture.config, PatchOptions { dry_run: false })
        .unwrap();

    let backup_path = fixture.config.backup_dir.join("CK17_M/exhibit.json");
    assert_eq!(
        fs::read_to_string(backup_path.as_std_path()).unwrap(),
        RAW_EXHIBIT
    );
}

#[test]
fn unmatched_urls_are_silently_dropped() {
    let csv = sample_csv(&[("CCK17-M", "CK17-M story")]);
    let links = "https://example.org/stories/CK17_M/exhibit.json\n\
                 https://example.org/stories/UNLISTED/exhibit.json\n\
                 https://example.org/stories/CK17_M/index.html\n";
    let fixture = fixture(&csv, links);
    let exhibit = MockExhibit::new();
    let app = app_for(&fixture.config, exhibit);

    let result = app
        .run(&fixture.config, PatchOptions { dry_run: false })
        .unwrap();

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].storage_path, "CK17_M");
}

#[test]
fn emits_upload_command_per_sample() {
    let csv = sample_csv(&[("CCK17-M", "CK17-M story")]);
    let links = "https://example.org/stories/CK17_M/exhibit.json\n";
    let fixture = fixture(&csv, links);
    let app = app_for(&fixture.config, MockExhibit::new());

    let result = app
        .run(&fixture.config, PatchOptions { dry_run: false })
        .unwrap();

    let expected = format!(
        "aws s3 cp --acl public-read {} s3://atlas-bucket/stories/CK17_M/exhibit.json",
        fixture.config.out_dir.join("CK17_M/exhibit.json")
    );
    assert_eq!(result.items[0].upload_command, expected);
}

#[test]
fn dry_run_writes_nothing() {
    let csv = sample_csv(&[("CCK17-M", "CK17-M story")]);
    let links = "https://example.org/stories/CK17_M/exhibit.json\n";
    let fixture = fixture(&csv, links);
    let exhibit = MockExhibit::new();
    let app = app_for(&fixture.config, exhibit);

    let result = app
        .run(&fixture.config, PatchOptions { dry_run: true })
        .unwrap();

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].action, "planned");
    assert!(result.items[0].patched_path.is_none());
    assert!(!fixture.config.out_dir.as_std_path().exists());
    assert!(!fixture.config.backup_dir.as_std_path().exists());
}

#[test]
fn fetch_failure_is_fatal_for_the_run() {
    let csv = sample_csv(&[("CCK17-M", "CK17-M story")]);
    let links = "https://example.org/stories/CK17_M/exhibit.json\n";
    let fixture = fixture(&csv, links);
    let app = app_for(&fixture.config, FailingExhibit);

    let err = app
        .run(&fixture.config, PatchOptions { dry_run: false })
        .unwrap_err();
    assert!(matches!(err, MetaError::ExhibitStatus { status: 404, .. }));
}

#[test]
fn missing_column_aborts_batch() {
    // Header lacks the Race column entirely.
    let csv = sample_csv(&[("CCK17-M", "CK17-M story")]).replace("Race,", "Race2,");
    let links = "https://example.org/stories/CK17_M/exhibit.json\n";
    let fixture = fixture(&csv, links);
    let app = app_for(&fixture.config, MockExhibit::new());

    let err = app
        .run(&fixture.config, PatchOptions { dry_run: false })
        .unwrap_err();
    assert!(matches!(err, MetaError::KeyMissing(column) if column == "Race"));
}
