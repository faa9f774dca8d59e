//! `sidebar watch` command implementation.
//!
//! Resolves once, then re-runs the whole pipeline whenever the content
//! directory or the configuration file changes. Bursts of filesystem events
//! are coalesced into one run.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use clap::Args;
use notify::{RecursiveMode, Watcher};

use super::project::{Build, ProjectArgs};
use crate::error::CliError;
use crate::output::Output;

/// Quiet period after the last event before re-resolving.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Arguments for the watch command.
#[derive(Args)]
pub(crate) struct WatchArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Write the resolved sidebar to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

impl WatchArgs {
    /// Execute the watch command.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial configuration cannot be loaded or the
    /// watcher cannot be started. Errors during later runs are printed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Watch targets are fixed by the configuration at startup.
        let config = self.project.load_config()?;
        let targets = WatchTargets::new(
            &config.content_resolved.source_dir,
            config.config_path.as_deref(),
            self.output.as_deref(),
        );
        if targets.source_dir.is_none() {
            output.warning(&format!(
                "Source directory {} does not exist, watching configuration only",
                config.content_resolved.source_dir.display()
            ));
        }

        // Register before the first run so edits made during it are not lost.
        let (_watcher, rx) = start_watcher(&targets)?;
        self.rebuild(&output);

        output.highlight("Watching for changes (Ctrl+C to stop)");

        while let Some(changed) = next_batch(&rx, DEBOUNCE) {
            tracing::debug!(paths = ?changed, "Detected changes");
            output.info(&format!("{} path(s) changed, resolving", changed.len()));
            self.rebuild(&output);
        }

        Ok(())
    }

    /// Run one complete resolution, printing instead of returning errors.
    fn rebuild(&self, output: &Output) {
        let result = Build::run(&self.project).and_then(|build| {
            build.report_warnings(output);
            build
                .manifest()
                .write(self.output.as_deref(), self.pretty, output)?;
            Ok(build)
        });

        match result {
            Ok(build) => output.success(&format!(
                "Resolved {} entries in {} sections",
                build.resolution.tree.entry_count(),
                build.resolution.tree.len()
            )),
            Err(err) => output.error(&format!("Error: {err}")),
        }
    }
}

/// Start watching `targets`, forwarding relevant changed paths.
///
/// Events stop when the returned watcher is dropped.
fn start_watcher(
    targets: &WatchTargets,
) -> Result<(notify::RecommendedWatcher, Receiver<PathBuf>), CliError> {
    let (tx, rx) = mpsc::channel();
    let filter = targets.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        let Ok(event) = res else { return };
        if !is_change(event.kind) {
            return;
        }
        for path in event.paths {
            if filter.is_relevant(&path) {
                let _ = tx.send(path);
            }
        }
    })?;
    targets.watch(&mut watcher)?;
    Ok((watcher, rx))
}

/// True for event kinds that can change the resolved sidebar.
fn is_change(kind: notify::EventKind) -> bool {
    matches!(
        kind,
        notify::EventKind::Create(_) | notify::EventKind::Modify(_) | notify::EventKind::Remove(_)
    )
}

/// Paths watched for changes, canonicalized so event paths compare equal.
#[derive(Debug, Clone)]
struct WatchTargets {
    source_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

impl WatchTargets {
    fn new(source_dir: &Path, config_file: Option<&Path>, output_file: Option<&Path>) -> Self {
        Self {
            source_dir: fs::canonicalize(source_dir).ok(),
            config_file: config_file.and_then(|p| fs::canonicalize(p).ok()),
            output_file: output_file.and_then(canonical_file_path),
        }
    }

    /// True if a change to `path` should trigger a new run.
    ///
    /// Hidden entries under the source directory and the output file itself
    /// are ignored.
    fn is_relevant(&self, path: &Path) -> bool {
        if self.output_file.as_deref() == Some(path) {
            return false;
        }
        if self.config_file.as_deref() == Some(path) {
            return true;
        }
        self.source_dir
            .as_deref()
            .and_then(|dir| path.strip_prefix(dir).ok())
            .is_some_and(|rel| {
                !rel.components()
                    .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
            })
    }

    fn watch(&self, watcher: &mut impl Watcher) -> Result<(), notify::Error> {
        if let Some(dir) = &self.source_dir {
            watcher.watch(dir, RecursiveMode::Recursive)?;
        }
        // Watch the parent so editors that replace the file are still seen.
        if let Some(parent) = self.config_file.as_deref().and_then(Path::parent)
            && self
                .source_dir
                .as_deref()
                .is_none_or(|dir| !parent.starts_with(dir))
        {
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
        }
        Ok(())
    }
}

/// Canonical path of a file that may not exist yet.
fn canonical_file_path(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let parent = fs::canonicalize(parent).or_else(|_| std::path::absolute(parent)).ok()?;
    Some(parent.join(file_name))
}

/// Block until a change arrives, then collect changes until the channel has
/// been quiet for `window`.
///
/// Returns `None` once the sender side is gone and nothing is pending.
fn next_batch(rx: &Receiver<PathBuf>, window: Duration) -> Option<BTreeSet<PathBuf>> {
    let first = rx.recv().ok()?;
    let mut batch = BTreeSet::from([first]);
    loop {
        match rx.recv_timeout(window) {
            Ok(path) => {
                batch.insert(path);
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return Some(batch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn targets(temp_dir: &TempDir) -> WatchTargets {
        let root = temp_dir.path();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::write(root.join("sidebar.toml"), "").unwrap();
        WatchTargets::new(
            &root.join("docs"),
            Some(&root.join("sidebar.toml")),
            Some(&root.join("docs/sidebar.json")),
        )
    }

    #[test]
    fn test_next_batch_coalesces_burst() {
        let (tx, rx) = mpsc::channel();
        for path in ["b.md", "a.md", "b.md"] {
            tx.send(PathBuf::from(path)).unwrap();
        }
        drop(tx);

        let batch = next_batch(&rx, Duration::from_millis(10)).unwrap();

        assert_eq!(
            batch.into_iter().collect::<Vec<_>>(),
            vec![PathBuf::from("a.md"), PathBuf::from("b.md")]
        );
        assert!(next_batch(&rx, Duration::from_millis(10)).is_none());
    }

    #[test]
    fn test_next_batch_splits_on_quiet_period() {
        let (tx, rx) = mpsc::channel();
        tx.send(PathBuf::from("a.md")).unwrap();

        let batch = next_batch(&rx, Duration::from_millis(10)).unwrap();
        tx.send(PathBuf::from("b.md")).unwrap();
        let second = next_batch(&rx, Duration::from_millis(10)).unwrap();

        assert_eq!(batch.len(), 1);
        assert!(second.contains(Path::new("b.md")));
    }

    #[test]
    fn test_relevant_paths() {
        let temp_dir = TempDir::new().unwrap();
        let targets = targets(&temp_dir);
        let docs = targets.source_dir.clone().unwrap();
        let root = docs.parent().unwrap().to_path_buf();

        assert!(targets.is_relevant(&docs.join("javascript/closures.md")));
        assert!(targets.is_relevant(&docs.join("javascript")));
        assert!(targets.is_relevant(&root.join("sidebar.toml")));
        assert!(!targets.is_relevant(&docs.join(".git/index")));
        assert!(!targets.is_relevant(&docs.join("sidebar.json")));
        assert!(!targets.is_relevant(&root.join("README.md")));
    }

    #[test]
    fn test_missing_source_dir_not_watched() {
        let temp_dir = TempDir::new().unwrap();

        let targets = WatchTargets::new(&temp_dir.path().join("missing"), None, None);

        assert!(targets.source_dir.is_none());
        assert!(!targets.is_relevant(&temp_dir.path().join("missing/a.md")));
    }

    #[test]
    fn test_watcher_is_live_once_started() {
        let temp_dir = TempDir::new().unwrap();
        let targets = targets(&temp_dir);
        let docs = targets.source_dir.clone().unwrap();

        let (_watcher, rx) = start_watcher(&targets).unwrap();
        fs::write(docs.join("closures.md"), "# Closures\n").unwrap();
        fs::write(docs.join("sidebar.json"), "[]").unwrap();

        let changed = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(changed, docs.join("closures.md"));
        while let Ok(path) = rx.recv_timeout(Duration::from_millis(200)) {
            assert_ne!(path, docs.join("sidebar.json"));
        }
    }

    #[test]
    fn test_is_change() {
        use notify::event::{AccessKind, CreateKind, EventKind};

        assert!(is_change(EventKind::Create(CreateKind::File)));
        assert!(!is_change(EventKind::Access(AccessKind::Any)));
    }
}
