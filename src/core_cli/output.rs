use crate::core_ftpcommand::feat::FeatureRecord;
use crate::core_listing::RemoteEntry;
use colored::Colorize;

/// One console line per entry, `ls -l` style with the full remote path.
pub fn format_entry(entry: &RemoteEntry, show_url: bool) -> String {
    let location = if show_url {
        entry.url.to_string()
    } else {
        entry.full_path.clone()
    };
    let location = if entry.is_container {
        location.blue().bold().to_string()
    } else if entry.is_symlink {
        location.cyan().to_string()
    } else {
        location
    };

    let mut line = format!(
        "{} {:>3} {:<8} {:<8} {:>10} {} {}",
        entry.mode,
        entry.links,
        entry.owner,
        entry.group,
        entry.length,
        entry.date.format("%Y-%m-%d %H:%M"),
        location
    );
    if entry.is_symlink && !entry.link_target.is_empty() {
        line.push_str(" -> ");
        line.push_str(&entry.link_target);
    }
    line
}

pub fn format_feature(record: &FeatureRecord) -> String {
    if record.options.is_empty() {
        record.feature.bold().to_string()
    } else {
        format!("{} {}", record.feature.bold(), record.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_listing::{parse_line, RemoteEntry};
    use crate::helpers::locator_base;
    use chrono::Local;

    fn remote(line: &str) -> RemoteEntry {
        let entry = parse_line(line, Local::now().naive_local()).unwrap();
        RemoteEntry::new(entry, "/pub", &locator_base("ftp.example.org", 2121).unwrap())
    }

    #[test]
    fn test_format_entry() {
        colored::control::set_override(false);

        let file = remote("-rw-r--r-- 1 ftp ftp 405 Sep 02 2024 README");
        assert_eq!(
            format_entry(&file, false),
            "-rw-r--r--   1 ftp      ftp             405 2024-09-02 00:00 /pub/README"
        );
        assert!(format_entry(&file, true).ends_with("ftp://ftp.example.org:2121/pub/README"));

        let link = remote("lrwxrwxrwx 1 ftp ftp 6 Sep 02 2024 latest -> v1.2.3");
        assert!(format_entry(&link, false).ends_with("/pub/latest -> v1.2.3"));
    }

    #[test]
    fn test_format_feature() {
        colored::control::set_override(false);

        let record = FeatureRecord {
            feature: "REST".to_string(),
            options: "STREAM".to_string(),
        };
        assert_eq!(format_feature(&record), "REST STREAM");
    }
}
