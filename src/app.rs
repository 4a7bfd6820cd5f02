use crate::catalog::{normalize_query, CatalogIndex, DataSource, LoadError};
use crate::config::Config;
use crate::hover::HoverController;
use crate::render::{apply, apply_nav, RenderEngine, RenderInstruction};
use crate::router::{encode_search_token, resolve, Location, ViewState};
use crate::ui::Surface;
use crate::util::MAX_SEARCH_QUERY_LENGTH;
use anyhow::Result;
use std::borrow::Cow;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How long a status message stays in the status bar.
const STATUS_TTL_SECS: u64 = 3;

/// Events posted back to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A dataset load finished.
    CatalogLoaded(Result<CatalogIndex, LoadError>),
    /// The navigation token changed; carries the new token.
    TokenChanged(String),
    /// A hover hide timer elapsed.
    HoverExpired {
        generation: u64,
        seq: u64,
        card: usize,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub http_client: reqwest::Client,
    pub source: DataSource,
    events: mpsc::UnboundedSender<AppEvent>,

    /// Loaded catalog. `None` until the first load succeeds, and again after a
    /// failed reload.
    pub catalog: Option<CatalogIndex>,
    pub loading: bool,
    load_handle: Option<JoinHandle<()>>,

    pub location: Location,
    /// View on screen. `None` while nothing has been routed.
    pub view: Option<ViewState>,
    pub engine: RenderEngine,
    pub surface: Surface,

    // Hover
    pub hover: HoverController,
    /// Card currently under the pointer.
    pub hovered: Option<usize>,

    /// Last category shown, used to leave search view.
    pub last_category: Option<String>,

    // Search prompt
    pub search_mode: bool,
    pub search_input: String,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
}

impl App {
    pub fn new(
        source: DataSource,
        config: &Config,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!("skillbook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            source,
            catalog: None,
            loading: false,
            load_handle: None,
            location: Location::new(&config.open, events.clone()),
            view: None,
            engine: RenderEngine::new(config.default_icon.clone()),
            surface: Surface::default(),
            hover: HoverController::new(config.hover_delay(), config.popout_width, events.clone()),
            hovered: None,
            last_category: None,
            search_mode: false,
            search_input: String::new(),
            status_message: None,
            needs_redraw: true,
            events,
        })
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Start loading the dataset in the background. A load already in flight
    /// is aborted; its result would be stale.
    pub fn spawn_load(&mut self) {
        if let Some(handle) = self.load_handle.take() {
            handle.abort();
            tracing::debug!("Aborted previous dataset load");
        }

        self.loading = true;
        self.set_status(format!("Loading {}...", self.source));

        let source = self.source.clone();
        let client = self.http_client.clone();
        let tx = self.events.clone();
        tracing::info!(source = %source, "Loading dataset");

        self.load_handle = Some(tokio::spawn(async move {
            let result = source.load(&client).await;
            if tx.send(AppEvent::CatalogLoaded(result)).is_err() {
                tracing::warn!("Dataset loaded after the event loop exited");
            }
        }));
    }

    /// Install a freshly loaded catalog and route the current token against it.
    pub fn install_catalog(&mut self, index: CatalogIndex) {
        self.loading = false;
        self.load_handle = None;
        tracing::info!(
            categories = index.len(),
            skills = index.skill_count(),
            "Catalog loaded"
        );

        apply_nav(self.engine.nav_entries(&index), &mut self.surface);
        let summary = format!(
            "Loaded {} jobs, {} skills",
            index.len(),
            index.skill_count()
        );
        self.catalog = Some(index);
        self.set_status(summary);
        self.route();
    }

    /// Replace everything on screen with the load failure surface.
    ///
    /// The previous catalog, if any, is discarded so nothing can route against
    /// it until a reload succeeds.
    pub fn fail_load(&mut self, err: LoadError) {
        self.loading = false;
        self.load_handle = None;
        tracing::error!(source = %self.source, error = %err, "Dataset load failed");

        self.catalog = None;
        self.view = None;
        let instruction = RenderInstruction::load_error(&self.source.to_string(), &err.to_string());
        apply_nav(Vec::new(), &mut self.surface);
        self.show(instruction);
        self.set_status(format!("Load failed: {}", err));
    }

    // ------------------------------------------------------------------------
    // Routing
    // ------------------------------------------------------------------------

    /// Handle a token change notification.
    pub fn on_token_changed(&mut self, token: &str) {
        if token != self.location.current() {
            // A newer change is already queued behind this one
            tracing::trace!(token, current = %self.location.current(), "Skipping superseded token");
            return;
        }
        self.route();
    }

    /// Resolve the current token and render it, or rewrite the token when it
    /// needs normalizing. A rewrite renders nothing here; its change
    /// notification does, so each token change renders exactly once.
    pub fn route(&mut self) {
        let Some(index) = self.catalog.as_ref() else {
            tracing::debug!("No catalog loaded, not routing");
            return;
        };

        let resolution = resolve(self.location.current(), index);
        if let Some(target) = resolution.redirect {
            if self.location.set(&target) {
                return;
            }
            // The token already names the fallback (e.g. an empty category key)
        }

        let instruction = self.engine.render(&resolution.view, index);
        if let ViewState::Category(id) = &resolution.view {
            self.last_category = Some(id.clone());
        }
        tracing::debug!(view = ?resolution.view, cards = instruction.cards.len(), "Rendered view");
        self.view = Some(resolution.view);
        self.show(instruction);
    }

    fn show(&mut self, instruction: RenderInstruction) {
        apply(instruction, &mut self.surface);
        self.hover.attach(self.surface.card_count());
        self.hovered = None;
        self.needs_redraw = true;
    }

    /// Point the location at `token`.
    pub fn navigate(&mut self, token: &str) {
        self.location.set(token);
    }

    /// Move the category selection by `delta` in catalog order, clamped at
    /// either end. From search view the move starts at the last category shown.
    pub fn select_category_offset(&mut self, delta: isize) {
        let Some(index) = self.catalog.as_ref() else {
            return;
        };
        let ids: Vec<&str> = index.categories().map(|c| c.id.as_str()).collect();
        if ids.is_empty() {
            return;
        }

        let current = match &self.view {
            Some(ViewState::Category(id)) => Some(id.as_str()),
            _ => self.last_category.as_deref(),
        };
        let next = match current.and_then(|id| ids.iter().position(|c| *c == id)) {
            Some(pos) => pos.saturating_add_signed(delta).min(ids.len() - 1),
            None => 0,
        };
        let target = ids[next].to_owned();
        self.navigate(&target);
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    /// Open the search prompt, prefilled with the active query.
    pub fn begin_search(&mut self) {
        self.search_mode = true;
        self.search_input = match &self.view {
            Some(ViewState::Search(query)) => query.clone(),
            _ => String::new(),
        };
    }

    pub fn cancel_search(&mut self) {
        self.search_mode = false;
        self.search_input.clear();
    }

    /// Submit the search prompt.
    ///
    /// A non-blank query navigates to its search token. A blank one leaves
    /// search view for the last category, and does nothing elsewhere.
    pub fn submit_search(&mut self) {
        self.search_mode = false;
        let input = std::mem::take(&mut self.search_input);

        if input.chars().count() > MAX_SEARCH_QUERY_LENGTH {
            self.set_status(format!(
                "Search query too long (max {} chars)",
                MAX_SEARCH_QUERY_LENGTH
            ));
            return;
        }

        match normalize_query(&input) {
            Some(query) => {
                let token = encode_search_token(query);
                self.navigate(&token);
            }
            None => {
                if matches!(self.view, Some(ViewState::Search(_))) {
                    let target = self.last_category.clone().unwrap_or_default();
                    self.navigate(&target);
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Hover
    // ------------------------------------------------------------------------

    /// Track the pointer over the card grid.
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        let hit = self.surface.hit_test(column, row);
        let target = hit.map(|(card, _)| card);
        if target == self.hovered {
            return;
        }

        if let Some(prev) = self.hovered.take() {
            self.hover.on_leave(prev);
        }
        if let Some((card, bounds)) = hit {
            self.hover
                .on_enter(card, bounds, self.surface.viewport_width());
            self.hovered = Some(card);
        }
        self.needs_redraw = true;
    }

    pub fn on_hover_expired(&mut self, generation: u64, seq: u64, card: usize) {
        if self.hover.on_expired(generation, seq, card) {
            self.needs_redraw = true;
        }
    }

    // ------------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------------

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear status message if expired.
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

/// Abort the in-flight dataset load on drop.
impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.load_handle.take() {
            handle.abort();
            tracing::debug!("Aborted dataset load on App drop");
        }
    }
}
