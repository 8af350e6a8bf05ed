/// Decode plain text, falling back to lossy UTF-8.
pub fn extract_txt(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}
