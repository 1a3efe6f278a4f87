use crate::core_error::{FtpError, FtpResult};
use crate::core_ftpcommand::cwd::change_directory;
use crate::core_ftpcommand::list::list;
use crate::core_listing::{parse_listing, RemoteEntry};
use crate::session::ControlSession;
use chrono::Local;
use log::{debug, info, warn};
use std::future::Future;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;
use url::Url;

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    pub recurse: bool,
    /// `None` means no limit when recursing.
    pub max_depth: Option<usize>,
}

impl WalkOptions {
    /// Depth the walk may reach; a non-recursive walk stays at depth 0.
    pub fn effective_max_depth(&self) -> usize {
        if self.recurse {
            self.max_depth.unwrap_or(usize::MAX)
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub entries: usize,
    pub directories: usize,
}

/// What the CWD probe found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Directory,
    SingleFile,
}

/// Turns a rejected CWD into a probe result. Only 550 replies are
/// reinterpreted; every other failure passes through untouched.
fn probe_failure(err: FtpError, path: &str) -> FtpResult<Probe> {
    if let FtpError::Protocol {
        code: Some(550),
        response,
        ..
    } = &err
    {
        if response.contains("Not a directory") {
            return Ok(Probe::SingleFile);
        }
        if response.contains("No such file or directory") {
            return Err(FtpError::Path {
                path: path.to_string(),
                response: response.clone(),
            });
        }
    }
    Err(err)
}

fn is_dot_entry(name: &str) -> bool {
    name == "." || name == ".."
}

type WalkFuture<'a> = Pin<Box<dyn Future<Output = FtpResult<()>> + Send + 'a>>;

/// Depth-first traversal of a remote tree over one control session.
///
/// Entries are handed to the sink as soon as they are built, so whatever was
/// emitted before a failure stays valid for the caller.
pub struct Walker {
    max_depth: usize,
    locator_base: Url,
    cancel: CancellationToken,
}

impl Walker {
    pub fn new(options: WalkOptions, locator_base: Url, cancel: CancellationToken) -> Self {
        Self {
            max_depth: options.effective_max_depth(),
            locator_base,
            cancel,
        }
    }

    /// Walks `path` depth-first, handing each entry to `sink` as it is parsed.
    ///
    /// `.` and `..` entries are filtered out and never descended into. A path
    /// that turns out to be a file is listed and emitted on its own.
    pub async fn walk(
        &self,
        session: &mut ControlSession,
        path: &str,
        sink: &mut (dyn FnMut(RemoteEntry) + Send),
    ) -> FtpResult<WalkSummary> {
        let start = if path.is_empty() { "/" } else { path };
        let mut summary = WalkSummary::default();

        self.walk_at(session, start.to_string(), 0, sink, &mut summary)
            .await?;

        info!(
            "Walk of {} done: {} entries in {} directories",
            start, summary.entries, summary.directories
        );
        Ok(summary)
    }

    fn walk_at<'a, 's: 'a>(
        &'a self,
        session: &'a mut ControlSession,
        path: String,
        depth: usize,
        sink: &'a mut (dyn FnMut(RemoteEntry) + Send + 's),
        summary: &'a mut WalkSummary,
    ) -> WalkFuture<'a> {
        Box::pin(async move {
            if self.cancel.is_cancelled() {
                return Err(FtpError::Cancelled);
            }
            if depth > self.max_depth {
                return Ok(());
            }

            let probe = match change_directory(session, &path).await {
                Ok(_) => Probe::Directory,
                Err(err) => probe_failure(err, &path)?,
            };
            debug!("Probe of {} at depth {}: {:?}", path, depth, probe);

            match probe {
                Probe::Directory => {
                    let listing = list(session, "").await?;
                    let entries = parse_listing(&listing.raw, Local::now().naive_local())?;
                    summary.directories += 1;

                    for entry in entries.into_iter().filter(|e| !is_dot_entry(&e.name)) {
                        let remote = RemoteEntry::new(entry, &listing.directory, &self.locator_base);
                        let child = remote.is_container.then(|| remote.full_path.clone());

                        summary.entries += 1;
                        sink(remote);

                        if let Some(child) = child {
                            self.walk_at(session, child, depth + 1, &mut *sink, &mut *summary)
                                .await?;
                        }
                    }
                }
                Probe::SingleFile => {
                    let listing = list(session, &path).await?;
                    let entries = parse_listing(&listing.raw, Local::now().naive_local())?;
                    if entries.len() > 1 {
                        warn!(
                            "LIST of single file {} returned {} lines, keeping the first",
                            path,
                            entries.len()
                        );
                    }
                    let entry = entries
                        .into_iter()
                        .next()
                        .ok_or_else(|| FtpError::parse("single file listing", listing.raw.as_str()))?;

                    summary.entries += 1;
                    sink(RemoteEntry::new(entry, &listing.directory, &self.locator_base));
                }
            }

            Ok(())
        })
    }
}
