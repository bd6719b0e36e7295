//! Session orchestration.
//!
//! A [`Session`] owns everything with a lifetime for one workspace: the
//! current document set and relevance index, the status indicator, change
//! subscribers, and the folder watchers that trigger rescans.
//!
//! State is swapped wholesale under one lock, so readers always see a
//! document set and relevant subset from the same pass. Rescans are
//! single-flight: a refresh requested while one is running is coalesced
//! into one follow-up pass instead of running in parallel.

use crate::config::InsightsConfig;
use crate::error::{Result, WatchError};
use crate::security;
use crate::services::{
    detector, scanner, DiscoveryPipeline, RelevanceIndex, RenderService, RenderedPanel,
};
use crate::types::Document;
use crate::view::{self, SelectorItem, StatusText, ViewItem};
use notify::event::{CreateKind, MetadataKind, ModifyKind, RemoveKind};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use std::thread;

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A rescan completed and replaced the document set.
    DocumentsChanged { documents: usize, relevant: usize },
    /// The active file changed and relevance was recomputed.
    RelevanceChanged {
        active_file: Option<String>,
        relevant: usize,
    },
}

/// Result of a refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// This call ran the rescan, including any passes coalesced into it.
    Completed {
        documents: usize,
        relevant: usize,
        passes: usize,
    },
    /// A rescan was already running; it will run once more when done.
    Coalesced,
}

type Handler = Arc<dyn Fn(&SessionEvent) + Send + Sync>;
type HandlerList = Mutex<Vec<(u64, Handler)>>;

/// Registration token returned by [`Session::subscribe`].
///
/// The handler stays registered until the token is disposed or dropped.
#[must_use = "dropping a Subscription unregisters its handler"]
pub struct Subscription {
    id: u64,
    handlers: Weak<HandlerList>,
}

impl Subscription {
    /// Unregisters the handler.
    pub fn dispose(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handlers) = self.handlers.upgrade() {
            lock(&handlers).retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Shared status indicator owned by the session.
///
/// Shows text only while the relevant set is non-empty.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    current: RwLock<Option<StatusText>>,
}

impl StatusIndicator {
    fn update(&self, relevant: usize) {
        *write(&self.current) = view::status_text(relevant);
    }

    /// Current indicator, or `None` when hidden.
    pub fn current(&self) -> Option<StatusText> {
        read(&self.current).clone()
    }
}

#[derive(Debug, Default)]
struct Snapshot {
    documents: Vec<Document>,
    relevance: RelevanceIndex,
}

#[derive(Debug, Default)]
struct RescanState {
    running: bool,
    pending: bool,
}

/// Non-recursive watchers over the current search folders.
///
/// Also watches the directories a missing search folder could appear in
/// (the root, `docs/`, the nearest existing ancestor) so new folders are
/// picked up without a manual refresh.
struct FolderWatcher {
    _watcher: RecommendedWatcher,
    folders: Vec<PathBuf>,
}

impl FolderWatcher {
    fn new(
        search: Vec<PathBuf>,
        parents: Vec<PathBuf>,
        trigger: Sender<()>,
    ) -> std::result::Result<Self, WatchError> {
        let folders: Vec<PathBuf> = search.iter().chain(parents.iter()).cloned().collect();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) if is_search_change(&event, &search, &parents) => {
                let _ = trigger.send(());
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Watch error: {}", e),
        })?;

        let mut watched = Vec::with_capacity(folders.len());
        for folder in folders {
            match watcher.watch(&folder, RecursiveMode::NonRecursive) {
                Ok(()) => watched.push(folder),
                Err(source) => {
                    let err = WatchError::Notify {
                        path: folder,
                        source,
                    };
                    tracing::warn!(code = err.code(), "{}", err);
                }
            }
        }

        Ok(Self {
            _watcher: watcher,
            folders: watched,
        })
    }
}

/// Returns true for events that can change the document set.
///
/// That is a create, modify or remove of a `.md` file inside a search
/// folder, or a directory appearing, disappearing or being renamed.
/// Markdown files directly inside one of `parents` are not documents.
fn is_search_change(event: &Event, search: &[PathBuf], parents: &[PathBuf]) -> bool {
    let is_document = |p: &PathBuf| {
        p.extension().is_some_and(|ext| ext == "md")
            && !p.parent().is_some_and(|dir| parents.iter().any(|w| w == dir))
    };
    let any_path = |f: &dyn Fn(&PathBuf) -> bool| event.paths.iter().any(f);

    match event.kind {
        EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder) => true,
        EventKind::Create(CreateKind::File) | EventKind::Remove(RemoveKind::File) => {
            any_path(&is_document)
        }
        // Backends that cannot tell files from folders.
        EventKind::Create(_) => any_path(&|p: &PathBuf| p.is_dir() || is_document(p)),
        EventKind::Remove(_) => true,
        EventKind::Modify(ModifyKind::Name(_)) => {
            any_path(&|p: &PathBuf| p.is_dir() || search.contains(p) || is_document(p))
        }
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::AccessTime)) => false,
        EventKind::Modify(_) => any_path(&is_document),
        _ => false,
    }
}

struct Inner {
    pipeline: DiscoveryPipeline,
    render: RenderService,
    snapshot: RwLock<Snapshot>,
    status: StatusIndicator,
    handlers: Arc<HandlerList>,
    next_handler_id: AtomicU64,
    rescan: Mutex<RescanState>,
    watcher: Mutex<Option<FolderWatcher>>,
    trigger: Mutex<Option<Sender<()>>>,
    closed: AtomicBool,
}

/// Handle to a workspace session. Cloning shares the session.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Inner>,
}

impl Session {
    /// Creates a session without touching the file system.
    ///
    /// Call [`Session::start`] to run the first scan and begin watching,
    /// or [`Session::refresh`] to scan without watching.
    pub fn new(root: PathBuf, config: InsightsConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                pipeline: DiscoveryPipeline::new(root, config),
                render: RenderService::new(),
                snapshot: RwLock::new(Snapshot::default()),
                status: StatusIndicator::default(),
                handlers: Arc::new(Mutex::new(Vec::new())),
                next_handler_id: AtomicU64::new(0),
                rescan: Mutex::new(RescanState::default()),
                watcher: Mutex::new(None),
                trigger: Mutex::new(None),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Validates `root`, loads its layered configuration and creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a directory or a configuration
    /// file is malformed.
    pub fn open(root: &Path, explicit_config: Option<&Path>) -> Result<Self> {
        let root = security::validate_workspace_root(root)?;
        let config = InsightsConfig::load(&root, explicit_config)?;
        tracing::debug!("Session config for {}: {:?}", root.display(), config);
        Ok(Self::new(root, config))
    }

    /// Runs the first scan and starts watching search folders.
    ///
    /// Subsequent calls behave like [`Session::refresh`].
    pub fn start(&self) -> RefreshOutcome {
        {
            let mut trigger = lock(&self.inner.trigger);
            if trigger.is_none() && !self.inner.closed.load(Ordering::Acquire) {
                let (tx, rx) = mpsc::channel();
                *trigger = Some(tx);
                spawn_rescan_worker(Arc::downgrade(&self.inner), rx);
            }
        }
        self.refresh()
    }

    /// Workspace root.
    pub fn root(&self) -> &Path {
        self.inner.pipeline.root()
    }

    /// Configuration in use.
    pub fn config(&self) -> &InsightsConfig {
        self.inner.pipeline.config()
    }

    /// Re-runs discovery and relevance.
    ///
    /// If a rescan is already in flight this returns
    /// [`RefreshOutcome::Coalesced`] immediately and the running rescan
    /// performs exactly one more pass when it finishes.
    pub fn refresh(&self) -> RefreshOutcome {
        {
            let mut state = lock(&self.inner.rescan);
            if state.running {
                state.pending = true;
                tracing::debug!("Rescan in flight, coalescing request");
                return RefreshOutcome::Coalesced;
            }
            state.running = true;
        }

        let mut passes = 0;
        loop {
            self.rescan_once();
            passes += 1;

            let mut state = lock(&self.inner.rescan);
            if state.pending {
                state.pending = false;
                continue;
            }
            state.running = false;
            break;
        }

        let snapshot = read(&self.inner.snapshot);
        RefreshOutcome::Completed {
            documents: snapshot.documents.len(),
            relevant: snapshot.relevance.relevant().len(),
            passes,
        }
    }

    fn rescan_once(&self) {
        let paths = self.inner.pipeline.search_paths();
        // Watch first so files written during the scan still trigger a pass.
        self.rewatch(&paths);
        let documents = self.inner.pipeline.scan_paths(&paths);

        let event = {
            let mut snapshot = write(&self.inner.snapshot);
            snapshot.relevance.rescore(&documents);
            snapshot.documents = documents;
            let relevant = snapshot.relevance.relevant().len();
            self.inner.status.update(relevant);
            SessionEvent::DocumentsChanged {
                documents: snapshot.documents.len(),
                relevant,
            }
        };
        self.fire(&event);
    }

    /// Replaces the folder watchers with ones for `paths` and the
    /// directories missing paths would be created in.
    fn rewatch(&self, paths: &[String]) {
        let trigger = match lock(&self.inner.trigger).clone() {
            Some(tx) => tx,
            None => return,
        };

        let (search, missing): (Vec<PathBuf>, Vec<PathBuf>) = paths
            .iter()
            .map(|p| scanner::resolve_folder(self.root(), p))
            .partition(|p| p.is_dir());

        let mut parents = vec![self.root().to_path_buf()];
        let docs = self.root().join(detector::DOCS_DIR);
        if docs.is_dir() {
            parents.push(docs);
        }
        parents.extend(
            missing
                .iter()
                .filter_map(|p| p.ancestors().skip(1).find(|a| a.is_dir()))
                .map(Path::to_path_buf),
        );
        parents.sort();
        parents.dedup();
        parents.retain(|p| !search.contains(p));

        let mut slot = lock(&self.inner.watcher);
        // Release the old watches before creating new ones.
        *slot = None;
        if self.inner.closed.load(Ordering::Acquire) {
            return;
        }
        match FolderWatcher::new(search, parents, trigger) {
            Ok(watcher) => {
                tracing::debug!("Watching {} folders", watcher.folders.len());
                *slot = Some(watcher);
            }
            Err(e) => tracing::warn!(code = e.code(), "{}", e),
        }
    }

    /// Reports a new active file.
    ///
    /// Returns `false` and fires nothing when the active file is unchanged.
    /// `None` or an empty path clears the relevant set.
    pub fn set_active_file(&self, active: Option<&str>) -> bool {
        let event = {
            let mut snapshot = write(&self.inner.snapshot);
            let Snapshot {
                documents,
                relevance,
            } = &mut *snapshot;
            if !relevance.set_active_file(active, documents) {
                return false;
            }
            let relevant = relevance.relevant().len();
            self.inner.status.update(relevant);
            SessionEvent::RelevanceChanged {
                active_file: relevance.active_file().map(String::from),
                relevant,
            }
        };
        self.fire(&event);
        true
    }

    /// Current document set, newest first.
    pub fn documents(&self) -> Vec<Document> {
        read(&self.inner.snapshot).documents.clone()
    }

    /// Documents relevant to the active file.
    pub fn relevant(&self) -> Vec<Document> {
        read(&self.inner.snapshot).relevance.relevant().to_vec()
    }

    /// Active file relevance was last computed for.
    pub fn active_file(&self) -> Option<String> {
        read(&self.inner.snapshot)
            .relevance
            .active_file()
            .map(String::from)
    }

    /// Panel rows for the current state.
    pub fn view_items(&self) -> Vec<ViewItem> {
        let snapshot = read(&self.inner.snapshot);
        view::build_items(
            self.root(),
            &snapshot.documents,
            snapshot.relevance.relevant(),
        )
    }

    /// Pick-list of every current document.
    pub fn selector_items(&self) -> Vec<SelectorItem> {
        view::selector_items(self.root(), &read(&self.inner.snapshot).documents)
    }

    /// Status indicator, or `None` while nothing is relevant.
    pub fn status(&self) -> Option<StatusText> {
        self.inner.status.current()
    }

    /// Folders currently watched for changes, search folders first.
    pub fn watched_folders(&self) -> Vec<PathBuf> {
        lock(&self.inner.watcher)
            .as_ref()
            .map(|w| w.folders.clone())
            .unwrap_or_default()
    }

    /// Renders the document at `path` for the panel.
    ///
    /// Documents in the current set open as listed, even when their search
    /// folder lies outside the root or behind a symlink. Any other path must
    /// stay inside the workspace. Never fails: rejected paths and unreadable
    /// files both produce an error fragment.
    pub fn open_document(&self, path: &str) -> RenderedPanel {
        if let Some(listed) = self.listed_document(path) {
            return self.inner.render.open(&listed);
        }
        match security::validate_document_path(self.root(), path) {
            Ok(resolved) => self.inner.render.open(&resolved),
            Err(e) => {
                tracing::warn!("Rejected document path: {}", e);
                RenderedPanel {
                    title: Path::new(path)
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.to_string()),
                    path: path.to_string(),
                    html: self.inner.render.error_fragment(&e.to_string()),
                    ok: false,
                }
            }
        }
    }

    /// Path of the current document `path` names, if any.
    fn listed_document(&self, path: &str) -> Option<PathBuf> {
        let requested = security::normalize_path(&self.root().join(path));
        read(&self.inner.snapshot)
            .documents
            .iter()
            .find(|d| d.path == requested)
            .map(|d| d.path.clone())
    }

    /// Registers a change handler.
    ///
    /// Handlers run on the thread that made the change, after the new state
    /// is visible to readers. They may call back into the session.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_handler_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.handlers).push((id, Arc::new(handler)));
        Subscription {
            id,
            handlers: Arc::downgrade(&self.inner.handlers),
        }
    }

    fn fire(&self, event: &SessionEvent) {
        // Call outside the lock so handlers can subscribe or refresh.
        let handlers: Vec<Handler> = lock(&self.inner.handlers)
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in handlers {
            handler(event);
        }
    }

    /// Stops watching and drops every subscriber. Idempotent.
    pub fn shutdown(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        *lock(&self.inner.watcher) = None;
        *lock(&self.inner.trigger) = None;
        lock(&self.inner.handlers).clear();
        tracing::debug!("Session for {} shut down", self.root().display());
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("root", &self.root())
            .field("config", self.config())
            .finish_non_exhaustive()
    }
}

/// Forwards watcher triggers to `refresh` until the session goes away.
fn spawn_rescan_worker(inner: Weak<Inner>, rx: Receiver<()>) {
    let spawned = thread::Builder::new()
        .name("ux-insights-rescan".into())
        .spawn(move || {
            while rx.recv().is_ok() {
                // Collapse a burst of events into one rescan.
                while rx.try_recv().is_ok() {}
                let Some(inner) = inner.upgrade() else {
                    break;
                };
                if inner.closed.load(Ordering::Acquire) {
                    break;
                }
                tracing::debug!("Search folder changed, rescanning");
                Session { inner }.refresh();
            }
        });
    if let Err(e) = spawned {
        tracing::warn!("Failed to spawn rescan worker: {}", e);
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read<T>(l: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    l.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(l: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    l.write().unwrap_or_else(PoisonError::into_inner)
}
