/*! Archive discovery.

Sources hand us glob patterns; discovery resolves them into a sorted file
list (sorted so that shuffling is the only source of file-order
randomness). Filenames of some sources carry the archive's year, which
lets the driver skip whole files whose year budget is spent.
!*/
use std::path::{Path, PathBuf};

use glob::glob;

use crate::error::Error;

/// Resolve a glob pattern into a sorted list of archive paths.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let mut paths = Vec::new();
    for entry in glob(pattern)? {
        paths.push(entry?);
    }
    paths.sort();
    Ok(paths)
}

/// Extract a year hint from an archive filename.
///
/// First run of 4 digits in the file stem that parses into a plausible
/// year. `ads_zoned_2014_part3.jsonl.gz` → 2014; counters like `5014`
/// fall outside the accepted range and are ignored.
pub fn year_hint(path: &Path) -> Option<u16> {
    let stem = path.file_stem()?.to_str()?;
    stem.as_bytes().windows(4).find_map(|window| {
        if window.iter().all(u8::is_ascii_digit) {
            std::str::from_utf8(window)
                .ok()?
                .parse::<u16>()
                .ok()
                .filter(|year| (1990..=2100).contains(year))
        } else {
            None
        }
    })
}
