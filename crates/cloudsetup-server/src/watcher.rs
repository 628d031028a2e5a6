//! File watching for live reload.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

use cloudsetup_content::{Locale, META_FILE};

/// What kind of content a change touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A guide's `meta.json`
    Metadata,

    /// A guide body (`.mdx` or `.md`)
    Body,

    /// Anything else: public assets, stray files, removed directories
    Other,
}

/// A classified file change.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchEvent {
    pub kind: ChangeKind,

    /// Guide the change belongs to, when it is under the content root
    pub slug: Option<String>,

    /// Body locale, for body changes named after a known locale
    pub locale: Option<Locale>,

    pub path: PathBuf,
}

/// How long the content tree must stay quiet before a burst of changes is forwarded.
const QUIET_PERIOD: Duration = Duration::from_millis(100);

/// File watcher for detecting content changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch the content root and any extra paths.
    ///
    /// Returns the watcher and a channel to receive events.
    pub fn new(
        content_root: &Path,
        extra_paths: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        let content_root = content_root
            .canonicalize()
            .unwrap_or_else(|_| content_root.to_path_buf());

        for path in std::iter::once(&content_root).chain(extra_paths) {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        // Forward events from the notify thread to the async side
        std::thread::spawn(move || forward_changes(sync_rx, &content_root, QUIET_PERIOD, async_tx));

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Changes gathered during a burst: one per path, latest classification wins.
#[derive(Debug, Default)]
struct PendingChanges {
    events: Vec<WatchEvent>,
}

impl PendingChanges {
    fn push(&mut self, event: WatchEvent) {
        match self.events.iter_mut().find(|e| e.path == event.path) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn take(&mut self) -> Vec<WatchEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Coalesce raw notify events and forward them once no new event has
/// arrived for `quiet`. Returns when either channel closes.
fn forward_changes(
    rx: mpsc::Receiver<notify::Event>,
    content_root: &Path,
    quiet: Duration,
    tx: async_mpsc::Sender<WatchEvent>,
) {
    let mut pending = PendingChanges::default();

    loop {
        let received = if pending.is_empty() {
            rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected)
        } else {
            rx.recv_timeout(quiet)
        };

        match received {
            Ok(event) => {
                for path in &event.paths {
                    if let Some(change) = classify_event(content_root, path, &event.kind) {
                        pending.push(change);
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                for change in pending.take() {
                    if tx.blocking_send(change).is_err() {
                        return;
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                for change in pending.take() {
                    if tx.blocking_send(change).is_err() {
                        break;
                    }
                }
                return;
            }
        }
    }
}

/// Classify a notify event relative to the content root.
pub fn classify_event(
    content_root: &Path,
    path: &Path,
    kind: &notify::EventKind,
) -> Option<WatchEvent> {
    use notify::EventKind;

    if !matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return None;
    }

    let slug = path
        .strip_prefix(content_root)
        .ok()
        .filter(|relative| relative.components().count() > 1)
        .and_then(|relative| relative.components().next())
        .and_then(|c| c.as_os_str().to_str())
        .map(str::to_string);

    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");

    let (kind, locale) = match (&slug, file_name, ext) {
        (Some(_), META_FILE, _) => (ChangeKind::Metadata, None),
        (Some(_), _, "mdx" | "md") => (ChangeKind::Body, stem.parse().ok()),
        _ => (ChangeKind::Other, None),
    };

    Some(WatchEvent {
        kind,
        slug,
        locale,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};
    use notify::EventKind;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn modify() -> EventKind {
        EventKind::Modify(ModifyKind::Any)
    }

    #[test]
    fn classifies_metadata_change() {
        let root = Path::new("/site/content/guides");
        let event = classify_event(root, &root.join("gcp-vision-setup/meta.json"), &modify()).unwrap();

        assert_eq!(event.kind, ChangeKind::Metadata);
        assert_eq!(event.slug.as_deref(), Some("gcp-vision-setup"));
        assert_eq!(event.locale, None);
    }

    #[test]
    fn classifies_body_change() {
        let root = Path::new("/site/content/guides");
        let event = classify_event(root, &root.join("gcp-vision-setup/en.mdx"), &modify()).unwrap();

        assert_eq!(event.kind, ChangeKind::Body);
        assert_eq!(event.locale, Some(Locale::En));
    }

    #[test]
    fn classifies_outside_changes_as_other() {
        let root = Path::new("/site/content/guides");

        let event = classify_event(
            root,
            Path::new("/site/public/screenshots/a.png"),
            &EventKind::Create(CreateKind::File),
        )
        .unwrap();
        assert_eq!(event.kind, ChangeKind::Other);
        assert_eq!(event.slug, None);

        // A guide directory itself
        let event = classify_event(root, &root.join("new-guide"), &modify()).unwrap();
        assert_eq!(event.kind, ChangeKind::Other);
        assert_eq!(event.slug, None);
    }

    #[test]
    fn ignores_access_events() {
        let root = Path::new("/site/content/guides");
        let kind = EventKind::Access(notify::event::AccessKind::Any);

        assert!(classify_event(root, &root.join("x/meta.json"), &kind).is_none());
    }

    #[tokio::test]
    async fn bursts_are_coalesced_without_losing_the_last_change() {
        let root = PathBuf::from("/site/content/guides");
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, mut async_rx) = async_mpsc::channel(100);

        let forward_root = root.clone();
        let forwarder = std::thread::spawn(move || {
            forward_changes(sync_rx, &forward_root, Duration::from_millis(50), async_tx)
        });

        let meta = root.join("gcp-vision-setup/meta.json");
        let body = root.join("gcp-vision-setup/en.mdx");
        for path in [&body, &meta, &body] {
            sync_tx
                .send(notify::Event::new(modify()).add_path(path.clone()))
                .unwrap();
        }
        sync_tx
            .send(notify::Event::new(EventKind::Remove(notify::event::RemoveKind::File)).add_path(body.clone()))
            .unwrap();

        let mut received = Vec::new();
        for _ in 0..2 {
            let change = tokio::time::timeout(Duration::from_secs(2), async_rx.recv())
                .await
                .unwrap()
                .unwrap();
            received.push(change.path);
        }
        assert_eq!(received, vec![body, meta]);

        drop(sync_tx);
        forwarder.join().unwrap();
        assert!(async_rx.recv().await.is_none());
    }

    #[test]
    fn pending_changes_keep_one_entry_per_path() {
        let root = Path::new("/site/content/guides");
        let mut pending = PendingChanges::default();

        pending.push(classify_event(root, &root.join("a/en.mdx"), &modify()).unwrap());
        pending.push(classify_event(root, &root.join("a/meta.json"), &modify()).unwrap());
        pending.push(classify_event(root, &root.join("a/en.mdx"), &modify()).unwrap());

        let changes = pending.take();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].kind, ChangeKind::Body);
        assert_eq!(changes[1].kind, ChangeKind::Metadata);
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let guide_dir = temp.path().join("gcp-vision-setup");
        fs::create_dir_all(&guide_dir).unwrap();

        let (watcher, mut rx) = FileWatcher::new(temp.path(), &[]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(150)).await;

        fs::write(guide_dir.join("ko.mdx"), "## 단계").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }
}
