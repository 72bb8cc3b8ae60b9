const EXHIBIT_FILENAME: &str = "exhibit.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExhibitLink {
    pub url: String,
    /// Second-to-last path segment; matches the sample's storage path.
    pub sample: String,
}

/// Parses a newline-delimited URL list, keeping entries that start with
/// "http" and end with the exhibit filename. Everything else is silently
/// dropped, a deliberate best-effort filter.
pub fn parse_links(text: &str) -> Vec<ExhibitLink> {
    text.lines()
        .filter_map(|line| parse_link(line.trim()))
        .collect()
}

fn parse_link(url: &str) -> Option<ExhibitLink> {
    if !url.starts_with("http") || !url.ends_with(EXHIBIT_FILENAME) {
        return None;
    }
    let mut segments = url.rsplit('/');
    segments.next()?;
    let sample = segments.next()?.to_string();
    if sample.is_empty() {
        return None;
    }
    Some(ExhibitLink {
        url: url.to_string(),
        sample,
    })
}
