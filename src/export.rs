//! Saving a brief as `Summary_<YYYY-MM-DD>.txt`.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Calendar date a brief saved at `now` is named after. Always the UTC date.
pub fn export_date<Tz: TimeZone>(now: DateTime<Tz>) -> NaiveDate {
    now.with_timezone(&Utc).date_naive()
}

/// Today's export date.
pub fn today() -> NaiveDate {
    export_date(Utc::now())
}

/// File name for a brief saved on `date`.
pub fn summary_filename(date: NaiveDate) -> String {
    format!("Summary_{}.txt", date.format("%Y-%m-%d"))
}

/// Write the summary verbatim into `dir`, replacing a same-day file.
///
/// The content goes to a temporary file in the same directory which is then
/// persisted under its final name, so a failed write never leaves a partial brief.
pub fn save_summary(dir: &Path, summary: &str, date: NaiveDate) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(summary_filename(date));

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(summary.as_bytes())?;
    tmp.flush()?;
    tmp.persist(&path).map_err(|e| e.error)?;

    tracing::info!(path = %path.display(), bytes = summary.len(), "saved summary");
    Ok(path)
}
