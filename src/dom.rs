use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use crate::models::{PageId, active_link_href};

/// DomAdapter
///
/// The document operations the navigator performs. All calls are synchronous
/// and apply immediately; animations (the splash fade) are started, not awaited.
pub trait DomAdapter: Send + Sync {
    fn show_panel(&self, page: PageId);
    fn hide_panel(&self, page: PageId);
    /// Starts a fade-out that leaves the panel visible until it completes.
    fn fade_out_panel(&self, page: PageId, duration: Duration);
    /// Removes the active marker from every link.
    fn clear_active_links(&self);
    /// Adds the active marker to every link whose `href` equals `href`.
    fn mark_link_active(&self, href: &str);
    fn close_drawer(&self);
    fn scroll_to_top(&self);
    /// Reveals the sign-in affordance inside the splash panel.
    fn show_splash_login(&self);
}

/// Shared handle stored in `NavigatorState`.
pub type DomState = Arc<dyn DomAdapter>;

/// Links present in the navigation drawer and header.
pub const DEFAULT_NAV_LINKS: [&str; 6] = ["/", "/home", "/recent", "/about", "/terms", "/add"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Hidden,
    Visible,
    FadingOut(Duration),
}

impl PanelState {
    /// A fading panel is still on screen.
    pub fn is_visible(&self) -> bool {
        !matches!(self, PanelState::Hidden)
    }
}

/// DomSnapshot
///
/// Everything `InMemoryDom` tracks, copied out for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomSnapshot {
    pub panels: BTreeMap<PageId, PanelState>,
    pub links: BTreeSet<String>,
    pub active_links: BTreeSet<String>,
    pub drawer_open: bool,
    pub scroll_top: u32,
    pub splash_login_visible: bool,
}

impl DomSnapshot {
    pub fn visible_panels(&self) -> Vec<PageId> {
        self.panels
            .iter()
            .filter(|(_, state)| state.is_visible())
            .map(|(page, _)| *page)
            .collect()
    }

    pub fn state_of(&self, page: PageId) -> PanelState {
        self.panels.get(&page).copied().unwrap_or(PanelState::Hidden)
    }
}

/// InMemoryDom
///
/// Headless document used by the harness binary and the tests. Starts with
/// every panel hidden, the drawer closed and the viewport at the top.
pub struct InMemoryDom {
    state: Mutex<DomSnapshot>,
}

impl InMemoryDom {
    pub fn new() -> Self {
        Self::with_links(DEFAULT_NAV_LINKS)
    }

    pub fn with_links<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let panels = PageId::ALL
            .iter()
            .map(|page| (*page, PanelState::Hidden))
            .collect();
        Self {
            state: Mutex::new(DomSnapshot {
                panels,
                links: links.into_iter().map(Into::into).collect(),
                active_links: BTreeSet::new(),
                drawer_open: false,
                scroll_top: 0,
                splash_login_visible: false,
            }),
        }
    }

    pub fn snapshot(&self) -> DomSnapshot {
        self.lock().clone()
    }

    pub fn visible_panels(&self) -> Vec<PageId> {
        self.lock().visible_panels()
    }

    pub fn active_links(&self) -> BTreeSet<String> {
        self.lock().active_links.clone()
    }

    /// Simulates the user opening the navigation drawer.
    pub fn open_drawer(&self) {
        self.lock().drawer_open = true;
    }

    /// Simulates the user scrolling.
    pub fn scroll_to(&self, offset: u32) {
        self.lock().scroll_top = offset;
    }

    /// Completes every running fade-out.
    pub fn finish_fades(&self) {
        for state in self.lock().panels.values_mut() {
            if matches!(state, PanelState::FadingOut(_)) {
                *state = PanelState::Hidden;
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, DomSnapshot> {
        // A panicking assertion elsewhere must not hide the document state.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_panel(&self, page: PageId, state: PanelState) {
        self.lock().panels.insert(page, state);
    }
}

impl Default for InMemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl DomAdapter for InMemoryDom {
    fn show_panel(&self, page: PageId) {
        self.set_panel(page, PanelState::Visible);
    }

    fn hide_panel(&self, page: PageId) {
        self.set_panel(page, PanelState::Hidden);
    }

    fn fade_out_panel(&self, page: PageId, duration: Duration) {
        let mut state = self.lock();
        let panel = state.panels.entry(page).or_insert(PanelState::Hidden);
        // Fading an already hidden panel is a no-op, as with jQuery.
        if panel.is_visible() {
            *panel = PanelState::FadingOut(duration);
        }
    }

    fn clear_active_links(&self) {
        self.lock().active_links.clear();
    }

    fn mark_link_active(&self, href: &str) {
        let href = active_link_href(href);
        let mut state = self.lock();
        if state.links.contains(href) {
            state.active_links.insert(href.to_string());
        }
    }

    fn close_drawer(&self) {
        self.lock().drawer_open = false;
    }

    fn scroll_to_top(&self) {
        self.lock().scroll_top = 0;
    }

    fn show_splash_login(&self) {
        self.lock().splash_login_visible = true;
    }
}
