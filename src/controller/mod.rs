//! SelectionController — the LOB → app → package cascade.
//!
//! Owns the catalog, the current selection, and the derived display state.
//! One instance per picker; every transition goes through `&mut self`, so a
//! frontend that runs fetches in the background must funnel results back
//! through [`SelectionController::finish_load`].
//!
//! ## States
//!
//! ```text
//! uninitialized ──load──▶ loaded ──select_lob──▶ lob ──select_app──▶ lob+app
//!       ▲                   ▲                                          │
//!       └──── reload ───────┴──────────────── clear ◀──────────────────┘
//! ```
//!
//! Load batches are identified by [`LoadTicket`]s. Only the most recently
//! issued ticket is applied; older results are dropped on arrival.

pub mod error;
pub mod view;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::error::{EmptyDataError, LoadError};
use crate::catalog::{Catalog, Resources};
use crate::source::DataSource;
use crate::store::PersistenceStore;

pub use error::{ControllerError, SelectionError};
use view::{
    ChooserView, DisplayState, StatusLine, Summary, NO_APPS, NO_LOBS, SELECT_APP, SELECT_LOB,
};

/// Default persistence slot for the selection.
pub const DEFAULT_STORE_KEY: &str = "lobApp";

/// Current user choice. `app` is only ever set together with `lob`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub lob: Option<String>,
    pub app: Option<String>,
}

/// Persisted form of a [`Selection`]: unset fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSelection {
    #[serde(default)]
    pub lob: String,
    #[serde(default)]
    pub app: String,
}

impl From<&Selection> for SavedSelection {
    fn from(s: &Selection) -> Self {
        Self {
            lob: s.lob.clone().unwrap_or_default(),
            app: s.app.clone().unwrap_or_default(),
        }
    }
}

/// Identifies one load batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// A fetch batch detached from the controller, runnable on any task.
pub struct LoadJob {
    ticket: LoadTicket,
    source: Arc<dyn DataSource>,
    resources: Resources,
}

impl LoadJob {
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    /// Fetch the three tables. Pass the output to `finish_load`.
    pub async fn run(self) -> (LoadTicket, Result<Catalog, LoadError>) {
        let result = Catalog::fetch(self.source.as_ref(), &self.resources).await;
        (self.ticket, result)
    }
}

/// What `finish_load` did with a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Applied; the catalog holds this many LOBs.
    Loaded { lobs: usize },
    /// A newer batch was issued after this one; nothing changed.
    Superseded,
}

pub struct SelectionController {
    source: Arc<dyn DataSource>,
    store: Box<dyn PersistenceStore>,
    resources: Resources,
    store_key: String,
    catalog: Option<Catalog>,
    selection: Selection,
    view: DisplayState,
    generation: u64,
}

impl SelectionController {
    pub fn new(source: Arc<dyn DataSource>, store: Box<dyn PersistenceStore>) -> Self {
        Self {
            source,
            store,
            resources: Resources::default(),
            store_key: DEFAULT_STORE_KEY.into(),
            catalog: None,
            selection: Selection::default(),
            view: DisplayState::default(),
            generation: 0,
        }
    }

    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_store_key(mut self, key: impl Into<String>) -> Self {
        self.store_key = key.into();
        self
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view(&self) -> &DisplayState {
        &self.view
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    // ── Load ──

    /// Fetch and apply all three tables inline.
    pub async fn load(&mut self) -> Result<(), ControllerError> {
        let job = self.begin_load();
        let (ticket, result) = job.run().await;
        self.finish_load(ticket, result).map(|_| ())
    }

    /// Load followed by restore. The only way to pick up upstream changes.
    pub async fn reload(&mut self) -> Result<(), ControllerError> {
        self.load().await?;
        self.restore_selection();
        Ok(())
    }

    /// Enter the uninitialized state and hand out a batch to run.
    ///
    /// Any batch issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadJob {
        self.generation += 1;
        self.catalog = None;
        self.selection = Selection::default();
        self.view = DisplayState::blank(StatusLine::info("Loading data\u{2026}"));
        debug!(generation = self.generation, source = %self.source.describe(), "load started");

        LoadJob {
            ticket: LoadTicket(self.generation),
            source: Arc::clone(&self.source),
            resources: self.resources.clone(),
        }
    }

    /// Apply a fetched batch, unless a newer one has been issued since.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Catalog, LoadError>,
    ) -> Result<LoadOutcome, ControllerError> {
        if ticket != LoadTicket(self.generation) {
            debug!(?ticket, current = self.generation, "dropping superseded load");
            return Ok(LoadOutcome::Superseded);
        }

        let catalog = match result {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "load failed");
                self.view = DisplayState::blank(StatusLine::error(e.to_string()));
                return Err(e.into());
            }
        };

        let names = catalog.lobs.names();
        debug!(lobs = ?names, "LOB list");

        if catalog.lobs.is_empty() {
            let err = EmptyDataError {
                path: self.resources.lob.clone(),
            };
            warn!("{err}");
            self.catalog = Some(catalog);
            self.view = DisplayState {
                lob_chooser: ChooserView::disabled(NO_LOBS),
                status: StatusLine::error(err.to_string()),
                ..DisplayState::default()
            };
            return Err(err.into());
        }

        let lobs = catalog.lobs.len();
        info!(lobs, "catalog loaded");
        self.catalog = Some(catalog);
        self.view = DisplayState {
            lob_chooser: ChooserView::populated(names, SELECT_LOB, NO_LOBS),
            status: StatusLine::info(format!("Loaded {lobs} LOBs.")),
            ..DisplayState::default()
        };
        Ok(LoadOutcome::Loaded { lobs })
    }

    // ── Selection ──

    /// Restore the persisted selection against the current catalog.
    ///
    /// Unknown LOB drops everything; unknown app drops only the app.
    /// Never fails: bad or missing slots read as "nothing saved".
    pub fn restore_selection(&mut self) {
        let Some(catalog) = self.catalog.as_ref() else {
            return;
        };
        let saved = self.read_saved();

        let apps = if saved.lob.is_empty() {
            None
        } else {
            catalog.lobs.apps(&saved.lob).map(<[String]>::to_vec)
        };
        let Some(apps) = apps else {
            if !saved.lob.is_empty() {
                debug!(lob = %saved.lob, "saved LOB no longer present, discarding");
            }
            self.show_no_lob();
            return;
        };
        debug!(lob = %saved.lob, apps = ?apps, "apps for saved LOB");

        self.show_lob(&saved.lob, apps.clone());
        if !saved.app.is_empty() && apps.contains(&saved.app) {
            self.show_app(&saved.lob, &saved.app);
        } else if !saved.app.is_empty() {
            debug!(app = %saved.app, "saved app not under saved LOB, discarding");
        }
    }

    /// Choose a LOB (empty string deselects). Clears the app.
    pub fn select_lob(&mut self, lob: &str) -> Result<(), SelectionError> {
        let catalog = self.catalog.as_ref().ok_or(SelectionError::NotLoaded)?;

        if lob.is_empty() {
            self.show_no_lob();
        } else {
            let apps = catalog
                .lobs
                .apps(lob)
                .ok_or_else(|| SelectionError::UnknownLob(lob.to_string()))?
                .to_vec();
            debug!(lob, apps = ?apps, "apps under LOB");
            self.show_lob(lob, apps);
        }

        self.persist();
        Ok(())
    }

    /// Choose an app under the current LOB (empty string deselects).
    ///
    /// The app list is re-derived from the selected LOB; apps outside it
    /// are rejected without touching state.
    pub fn select_app(&mut self, app: &str) -> Result<(), SelectionError> {
        let catalog = self.catalog.as_ref().ok_or(SelectionError::NotLoaded)?;
        let lob = self
            .selection
            .lob
            .clone()
            .ok_or(SelectionError::NoLobSelected)?;

        if app.is_empty() {
            self.selection.app = None;
            self.view.app_chooser.selected = None;
            self.view.summary = Summary::lob_only(&lob);
        } else {
            let belongs = catalog
                .lobs
                .apps(&lob)
                .is_some_and(|apps| apps.iter().any(|a| a == app));
            if !belongs {
                return Err(SelectionError::AppNotInLob {
                    lob,
                    app: app.to_string(),
                });
            }
            self.show_app(&lob, app);
        }

        self.persist();
        Ok(())
    }

    /// Forget everything: persisted slot, selection, app list, summary.
    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove(&self.store_key) {
            warn!(error = %e, "failed to remove saved selection");
        }
        self.show_no_lob();
        self.view.status = StatusLine::info("Cleared.");
    }

    // ── Internals ──

    fn show_no_lob(&mut self) {
        self.selection = Selection::default();
        self.view.lob_chooser.selected = None;
        self.view.app_chooser = ChooserView::disabled(SELECT_APP);
        self.view.summary = Summary::empty();
    }

    fn show_lob(&mut self, lob: &str, apps: Vec<String>) {
        self.selection = Selection {
            lob: Some(lob.to_string()),
            app: None,
        };
        self.view.lob_chooser.selected = Some(lob.to_string());
        self.view.app_chooser = ChooserView::populated(apps, SELECT_APP, NO_APPS);
        self.view.summary = Summary::lob_only(lob);
    }

    /// Caller has checked `app` belongs to `lob`.
    fn show_app(&mut self, lob: &str, app: &str) {
        let Some(catalog) = self.catalog.as_ref() else {
            return;
        };
        let package = catalog.package(app);
        let description = catalog.description(app);
        debug!(app, ?package, ?description, "resolved");

        self.view.summary = Summary::full(lob, app, package, description);
        self.selection.app = Some(app.to_string());
        self.view.app_chooser.selected = Some(app.to_string());
    }

    fn read_saved(&self) -> SavedSelection {
        let raw = match self.store.read(&self.store_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SavedSelection::default(),
            Err(e) => {
                debug!(error = %e, "saved selection unreadable");
                return SavedSelection::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            debug!(error = %e, "saved selection corrupted, ignoring");
            SavedSelection::default()
        })
    }

    fn persist(&self) {
        let saved = SavedSelection::from(&self.selection);
        let json = match serde_json::to_string(&saved) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to encode selection");
                return;
            }
        };
        if let Err(e) = self.store.write(&self.store_key, &json) {
            warn!(error = %e, "failed to save selection");
        }
    }
}
