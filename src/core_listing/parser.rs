use crate::constants::SYMLINK_SEPARATOR;
use crate::core_error::{FtpError, FtpResult};
use crate::core_listing::date::resolve_date;
use crate::core_listing::entry::ListingEntry;
use chrono::NaiveDateTime;

const LISTING_FIELDS: usize = 9;

/// Splits on whitespace runs into at most `limit` fields. The last field
/// keeps its inner whitespace, so names with spaces survive.
fn split_fields(line: &str, limit: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(limit);
    let mut rest = line.trim_start();

    while !rest.is_empty() {
        if fields.len() + 1 == limit {
            fields.push(rest);
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                fields.push(&rest[..end]);
                rest = rest[end..].trim_start();
            }
            None => {
                fields.push(rest);
                break;
            }
        }
    }

    fields
}

/// Parses one `ls -l` line, e.g.
/// `-rw-r--r--   1 owner group 1024 Jan 05 2023 file.txt`.
pub fn parse_line(line: &str, now: NaiveDateTime) -> FtpResult<ListingEntry> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields = split_fields(line, LISTING_FIELDS);
    if fields.len() != LISTING_FIELDS {
        return Err(FtpError::parse("listing line", line));
    }

    let mode = fields[0];
    let is_symlink = mode.starts_with('l');
    let is_container = mode.starts_with('d');

    let (name, link_target) = if is_symlink {
        match fields[8].split_once(SYMLINK_SEPARATOR) {
            Some((name, target)) => (name, target),
            None => (fields[8], ""),
        }
    } else {
        (fields[8], "")
    };

    Ok(ListingEntry {
        mode: mode.to_string(),
        links: fields[1].to_string(),
        owner: fields[2].to_string(),
        group: fields[3].to_string(),
        length: fields[4].to_string(),
        date: resolve_date(fields[5], fields[6], fields[7], now)?,
        name: name.to_string(),
        is_container,
        is_symlink,
        link_target: link_target.to_string(),
    })
}

/// Parses every non-empty line of a raw listing. The first bad line fails the whole listing.
pub fn parse_listing(raw: &str, now: NaiveDateTime) -> FtpResult<Vec<ListingEntry>> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_line(line, now))
        .collect()
}
