use chrono::NaiveDateTime;
use url::Url;

use crate::helpers::join_remote_path;

/// One line of a UNIX long listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub mode: String,
    pub links: String,
    pub owner: String,
    pub group: String,
    /// Kept as listed; some servers put non-numeric text here.
    pub length: String,
    pub date: NaiveDateTime,
    pub name: String,
    pub is_container: bool,
    pub is_symlink: bool,
    /// Empty unless `is_symlink`.
    pub link_target: String,
}

/// A listing entry placed in the remote tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub mode: String,
    pub links: String,
    pub owner: String,
    pub group: String,
    pub length: String,
    pub date: NaiveDateTime,
    pub name: String,
    pub is_container: bool,
    pub is_symlink: bool,
    pub link_target: String,
    /// Absolute path of the directory holding the entry.
    pub directory: String,
    pub full_path: String,
    pub url: Url,
}

impl RemoteEntry {
    pub fn new(entry: ListingEntry, directory: &str, locator_base: &Url) -> Self {
        let full_path = join_remote_path(directory, &entry.name);
        let mut url = locator_base.clone();
        url.set_path(&full_path);

        let ListingEntry {
            mode,
            links,
            owner,
            group,
            length,
            date,
            name,
            is_container,
            is_symlink,
            link_target,
        } = entry;

        Self {
            mode,
            links,
            owner,
            group,
            length,
            date,
            name,
            is_container,
            is_symlink,
            link_target,
            directory: directory.to_string(),
            full_path,
            url,
        }
    }
}
