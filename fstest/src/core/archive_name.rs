//! Timestamped names for archived directories.

use chrono::NaiveDateTime;

/// Second-precision stamp, e.g. `20261017093005`.
pub const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

pub fn format_stamp(at: NaiveDateTime) -> String {
    at.format(STAMP_FORMAT).to_string()
}

/// `<base>_<stamp>`.
pub fn archive_name(base: &str, stamp: &str) -> String {
    format!("{base}_{stamp}")
}

/// First archive name not reported as taken.
///
/// Two archives within the same second share a stamp; later ones get `_1`,
/// `_2`, ... appended.
pub fn unique_archive_name(base: &str, stamp: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let name = archive_name(base, stamp);
    if !is_taken(&name) {
        return name;
    }
    let mut counter = 1u32;
    loop {
        let candidate = format!("{name}_{counter}");
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
