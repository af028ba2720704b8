use crate::sortphotos_core::month::Month;
use std::path::{Path, PathBuf};
use time::PrimitiveDateTime;

/// Year directory name and month for a timestamp.
pub fn year_and_month(at: &PrimitiveDateTime) -> (String, Month) {
    (format!("{:04}", at.year()), Month::from(at.month()))
}

/// Directory a file taken at `at` belongs in: `<root>/<year>/<NN_Month>`.
pub fn destination_dir(target_root: &Path, at: &PrimitiveDateTime) -> PathBuf {
    let (year, month) = year_and_month(at);
    target_root.join(year).join(month.label())
}
