use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, RecommendedCache};

use super::Catalog;
use crate::error::Result;

const WATCH_DEBOUNCE: Duration = Duration::from_millis(500);

pub enum CatalogEvent {
    Reloaded(Catalog),
    Failed(String),
}

/// Reloads a catalog file whenever it changes on disk. Dropping the watcher
/// stops the background thread.
pub struct CatalogWatcher {
    _debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
    receiver: mpsc::Receiver<CatalogEvent>,
}

impl CatalogWatcher {
    /// `wake` runs on the watcher thread after each event is queued.
    pub fn spawn<W>(path: PathBuf, wake: W) -> Result<Self>
    where
        W: Fn() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        // Watch events carry absolute paths.
        let path = path.canonicalize().unwrap_or(path);
        let watched = path.clone();

        let mut debouncer = new_debouncer(WATCH_DEBOUNCE, None, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    if !events
                        .iter()
                        .any(|event| event.paths.iter().any(|p| p == &watched))
                    {
                        return;
                    }
                    let event = match Catalog::load(&watched) {
                        Ok(catalog) => {
                            log::info!(
                                "Reloaded {} products from {}",
                                catalog.len(),
                                watched.display()
                            );
                            CatalogEvent::Reloaded(catalog)
                        }
                        Err(e) => {
                            log::warn!("Failed to reload catalog {}: {}", watched.display(), e);
                            CatalogEvent::Failed(e.to_string())
                        }
                    };
                    if tx.send(event).is_ok() {
                        wake();
                    }
                }
                Err(errors) => {
                    for e in errors {
                        log::error!("Catalog watch error: {}", e);
                    }
                }
            }
        })?;

        // Editors often replace the file instead of writing in place, so watch
        // the directory and filter by path.
        debouncer.watch(watch_root(&path), RecursiveMode::NonRecursive)?;
        log::debug!("Watching catalog file {}", path.display());

        Ok(Self {
            _debouncer: debouncer,
            receiver: rx,
        })
    }

    pub fn try_recv(&self) -> Option<CatalogEvent> {
        self.receiver.try_recv().ok()
    }
}

fn watch_root(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watches_parent_directory() {
        assert_eq!(
            watch_root(Path::new("/data/catalog.json")),
            Path::new("/data")
        );
    }

    #[test]
    fn bare_file_name_watches_current_directory() {
        assert_eq!(watch_root(Path::new("catalog.json")), Path::new("."));
    }

    #[test]
    fn missing_directory_fails_to_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("catalog.json");
        assert!(CatalogWatcher::spawn(path, || {}).is_err());
    }
}
