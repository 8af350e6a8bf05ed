use anyhow::Result;

use zipper_compress::{ComposedOutput, SummaryResult, Verdict, ZipError};
use zipper_core::Document;

/// What gets printed for one finished document.
#[derive(Debug)]
pub struct Report {
    pub stdout: String,
    /// Set when the summary was computed but could not be saved.
    pub save_error: Option<anyhow::Error>,
}

/// Render the outcome of `compose` as text or as a JSON document.
///
/// A failed save still prints the summary: the composed text in text mode,
/// or the full report with `saved_to: null` and the error in JSON mode.
pub fn render(
    doc: &Document,
    result: &SummaryResult,
    verdict: Option<&Verdict>,
    composed: Result<ComposedOutput, ZipError>,
    json: bool,
) -> Result<Report> {
    let (text, saved_to, save_error) = match composed {
        Ok(output) => (output.text, output.saved_to, None),
        Err(ZipError::PersistenceFailed {
            path,
            composed,
            source,
        }) => {
            let err = anyhow::Error::new(source)
                .context(format!("summary not saved to {}", path.display()));
            (composed, None, Some(err))
        }
        Err(e) => return Err(e.into()),
    };

    let stdout = if json {
        let report = serde_json::json!({
            "document": doc.path(),
            "result": result,
            "verdict": verdict,
            "saved_to": saved_to,
            "error": save_error.as_ref().map(|e| format!("{:#}", e)),
        });
        format!("{}\n", serde_json::to_string_pretty(&report)?)
    } else {
        text
    };

    Ok(Report { stdout, save_error })
}
