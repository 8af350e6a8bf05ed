/// Decode markdown as text. Heading markers are kept: they carry the title
/// and section structure the summarizer is asked to preserve.
pub fn extract_md(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}
