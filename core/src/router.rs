//! Section and tab navigation.
//!
//! # Design
//! `ViewRouter` is the single owner of [`ViewState`]. Navigation to an
//! unknown target is logged and reported as a [`NavigationError`] with the
//! state left untouched. Once the state changes, every step that talks to
//! the presentation layer is best effort: a missing container is logged and
//! skipped so a broken page never wedges the router.
//!
//! Each section has an initializer that builds its [`SectionView`] from the
//! current backend state. Initializers run once per navigation and must be
//! idempotent; the view replaces whatever the container showed before.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{NavigationError, ViewError};
use crate::fixtures::DocsCatalog;
use crate::service::MockApiService;
use crate::view::{EndpointSummary, SectionView, ViewSurface};

// ---------------------------------------------------------------------------
// Sections and tabs
// ---------------------------------------------------------------------------

/// Top-level sections of the site.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Dashboard,
    ApiExplorer,
    Demo,
    Docs,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Dashboard,
        Section::ApiExplorer,
        Section::Demo,
        Section::Docs,
    ];

    /// Identifier used in fragments and container ids.
    pub fn id(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::ApiExplorer => "api-explorer",
            Section::Demo => "demo",
            Section::Docs => "docs",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.id() == s)
            .ok_or_else(|| NavigationError::UnknownSection(s.to_string()))
    }
}

/// Tabs inside the demo section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    #[default]
    Users,
    ApiTester,
    Code,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Users, Tab::ApiTester, Tab::Code];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Users => "users",
            Tab::ApiTester => "api-tester",
            Tab::Code => "code",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tab {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == s)
            .ok_or_else(|| NavigationError::UnknownTab(s.to_string()))
    }
}

/// Which section and demo tab are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub active_section: Section,
    /// Only meaningful while `active_section` is [`Section::Demo`].
    pub active_tab: Tab,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Back/forward list of visited sections, like a browser session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<Section>,
    cursor: usize,
}

impl History {
    pub fn new(initial: Section) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> Section {
        self.entries[self.cursor]
    }

    /// Record a visit. Forward entries are discarded; revisiting the current
    /// entry adds nothing.
    pub fn push(&mut self, section: Section) {
        if self.current() == section {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(section);
        self.cursor += 1;
    }

    pub fn back(&mut self) -> Option<Section> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<Section> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Move the cursor to the entry for `section` closest to the current
    /// position, preferring earlier entries. Returns `false` and leaves the
    /// cursor alone when the section was never visited.
    pub fn seek(&mut self, section: Section) -> bool {
        let (before, after) = self.entries.split_at(self.cursor + 1);
        let earlier = before.iter().rposition(|&s| s == section);
        let later = after
            .iter()
            .position(|&s| s == section)
            .map(|offset| self.cursor + 1 + offset);
        match earlier.or(later) {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Initializers
// ---------------------------------------------------------------------------

/// Read-only state handed to section initializers.
pub struct InitContext<'a> {
    pub api: &'a MockApiService,
    pub docs: &'a DocsCatalog,
}

pub type Initializer = Box<dyn Fn(&InitContext<'_>) -> SectionView>;

fn default_initializer(section: Section) -> Initializer {
    match section {
        Section::Dashboard => Box::new(dashboard_view),
        Section::ApiExplorer => Box::new(endpoints_view),
        Section::Demo => Box::new(users_view),
        Section::Docs => Box::new(docs_view),
    }
}

fn dashboard_view(ctx: &InitContext<'_>) -> SectionView {
    SectionView::Dashboard {
        users: ctx.api.record_count(),
        endpoints: ctx.api.fixtures().len(),
        annotations: ctx.docs.len(),
    }
}

fn endpoints_view(ctx: &InitContext<'_>) -> SectionView {
    let endpoints = ctx
        .api
        .fixtures()
        .iter()
        .map(|f| EndpointSummary {
            method: f.method,
            path: f.path.clone(),
            description: f.description.clone(),
        })
        .collect();
    SectionView::Endpoints { endpoints }
}

fn users_view(ctx: &InitContext<'_>) -> SectionView {
    SectionView::Users {
        users: ctx.api.records(),
    }
}

fn docs_view(ctx: &InitContext<'_>) -> SectionView {
    SectionView::Docs {
        entries: ctx.docs.entries().to_vec(),
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub struct ViewRouter {
    state: ViewState,
    history: History,
    initializers: HashMap<Section, Initializer>,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new(Section::default())
    }
}

impl ViewRouter {
    /// A router showing `default_section` and the first demo tab, with the
    /// built-in initializers registered.
    pub fn new(default_section: Section) -> Self {
        let initializers = Section::ALL
            .into_iter()
            .map(|section| (section, default_initializer(section)))
            .collect();
        Self {
            state: ViewState {
                active_section: default_section,
                active_tab: Tab::default(),
            },
            history: History::new(default_section),
            initializers,
        }
    }

    /// Replace the initializer for one section.
    pub fn set_initializer(
        &mut self,
        section: Section,
        initializer: impl Fn(&InitContext<'_>) -> SectionView + 'static,
    ) {
        self.initializers.insert(section, Box::new(initializer));
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn active_section(&self) -> Section {
        self.state.active_section
    }

    pub fn active_tab(&self) -> Tab {
        self.state.active_tab
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Switch to the section named `name`, run its initializer, update the
    /// fragment and record a history entry.
    pub fn navigate_to_section(
        &mut self,
        name: &str,
        ctx: &InitContext<'_>,
        surface: &mut dyn ViewSurface,
    ) -> Result<Section, NavigationError> {
        let section = name.parse::<Section>().inspect_err(|e| {
            warn!("Ignoring navigation: {e}");
        })?;
        self.apply(section, ctx, surface);
        self.history.push(section);
        info!(section = %section, "Navigated");
        Ok(section)
    }

    /// Switch the demo tab. Only allowed while the demo section is active.
    pub fn navigate_to_tab(
        &mut self,
        name: &str,
        surface: &mut dyn ViewSurface,
    ) -> Result<Tab, NavigationError> {
        let tab = name.parse::<Tab>().inspect_err(|e| {
            warn!("Ignoring tab switch: {e}");
        })?;
        if self.state.active_section != Section::Demo {
            let err = NavigationError::TabOutsideDemo {
                tab,
                active: self.state.active_section,
            };
            warn!("Ignoring tab switch: {err}");
            return Err(err);
        }
        self.state.active_tab = tab;
        self.show_tab(surface);
        debug!(tab = %tab, "Switched tab");
        Ok(tab)
    }

    /// Apply a location fragment at startup. Unknown or empty fragments
    /// leave the default section in place and return `None`.
    pub fn restore_from_location(
        &mut self,
        fragment: &str,
        ctx: &InitContext<'_>,
        surface: &mut dyn ViewSurface,
    ) -> Option<Section> {
        let name = fragment.strip_prefix('#').unwrap_or(fragment);
        if name.is_empty() {
            return None;
        }
        match name.parse::<Section>() {
            Ok(_) => self.navigate_to_section(name, ctx, surface).ok(),
            Err(e) => {
                debug!("Ignoring location fragment: {e}");
                None
            }
        }
    }

    /// Render the active section without touching history. Used for the
    /// first paint and after the backend state changes.
    pub fn show_current(&mut self, ctx: &InitContext<'_>, surface: &mut dyn ViewSurface) {
        self.apply(self.state.active_section, ctx, surface);
    }

    /// Re-run the active section's initializer only.
    pub fn refresh(&self, ctx: &InitContext<'_>, surface: &mut dyn ViewSurface) {
        self.populate(self.state.active_section, ctx, surface);
    }

    /// Step back in history without recording a new entry.
    pub fn back(
        &mut self,
        ctx: &InitContext<'_>,
        surface: &mut dyn ViewSurface,
    ) -> Option<Section> {
        let section = self.history.back()?;
        self.apply(section, ctx, surface);
        debug!(section = %section, "History back");
        Some(section)
    }

    /// Step forward in history without recording a new entry.
    pub fn forward(
        &mut self,
        ctx: &InitContext<'_>,
        surface: &mut dyn ViewSurface,
    ) -> Option<Section> {
        let section = self.history.forward()?;
        self.apply(section, ctx, surface);
        debug!(section = %section, "History forward");
        Some(section)
    }

    /// Re-apply a section recorded by the host's own history (a popstate
    /// event) without pushing a new entry. The history cursor follows to
    /// the matching entry so later `back`/`forward` calls stay in step.
    pub fn restore_from_history(
        &mut self,
        section: Section,
        ctx: &InitContext<'_>,
        surface: &mut dyn ViewSurface,
    ) {
        if !self.history.seek(section) {
            debug!(section = %section, "Restored section is not in history");
        }
        self.apply(section, ctx, surface);
    }

    fn apply(&mut self, section: Section, ctx: &InitContext<'_>, surface: &mut dyn ViewSurface) {
        self.state.active_section = section;
        for candidate in Section::ALL {
            skip_missing(surface.set_section_visible(candidate, candidate == section));
        }
        if section == Section::Demo {
            self.show_tab(surface);
        }
        self.populate(section, ctx, surface);
        surface.set_fragment(section.id());
    }

    fn show_tab(&self, surface: &mut dyn ViewSurface) {
        for tab in Tab::ALL {
            skip_missing(surface.set_tab_visible(tab, tab == self.state.active_tab));
        }
    }

    fn populate(&self, section: Section, ctx: &InitContext<'_>, surface: &mut dyn ViewSurface) {
        let Some(init) = self.initializers.get(&section) else {
            warn!(section = %section, "No initializer registered");
            return;
        };
        let view = init(ctx);
        skip_missing(surface.render(section, &view));
    }
}

fn skip_missing(result: Result<(), ViewError>) {
    if let Err(e) = result {
        warn!("Skipping view update: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShowcaseConfig;
    use crate::view::{CommandQueue, ViewCommand};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fixture {
        api: MockApiService,
        docs: DocsCatalog,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                api: MockApiService::from_config(&ShowcaseConfig::default()).unwrap(),
                docs: DocsCatalog::builtin().unwrap(),
            }
        }

        fn ctx(&self) -> InitContext<'_> {
            InitContext {
                api: &self.api,
                docs: &self.docs,
            }
        }
    }

    #[test]
    fn section_ids_round_trip() {
        for section in Section::ALL {
            assert_eq!(section.id().parse::<Section>().unwrap(), section);
        }
        assert!("Dashboard".parse::<Section>().is_err());
    }

    #[test]
    fn defaults_are_dashboard_and_first_tab() {
        let router = ViewRouter::default();
        assert_eq!(router.active_section(), Section::Dashboard);
        assert_eq!(router.active_tab(), Tab::ALL[0]);
    }

    #[test]
    fn navigate_shows_target_and_hides_others() {
        let fx = Fixture::new();
        let mut router = ViewRouter::default();
        let mut surface = CommandQueue::new();

        let section = router
            .navigate_to_section("docs", &fx.ctx(), &mut surface)
            .unwrap();
        assert_eq!(section, Section::Docs);
        assert_eq!(router.active_section(), Section::Docs);

        let visible: Vec<Section> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                ViewCommand::SectionVisibility {
                    section,
                    visible: true,
                } => Some(*section),
                _ => None,
            })
            .collect();
        assert_eq!(visible, vec![Section::Docs]);
        assert_eq!(surface.last_fragment(), Some("docs"));
    }

    #[test]
    fn unknown_section_leaves_state_unchanged() {
        let fx = Fixture::new();
        let mut router = ViewRouter::default();
        let mut surface = CommandQueue::new();
        router
            .navigate_to_section("demo", &fx.ctx(), &mut surface)
            .unwrap();
        surface.drain();

        let err = router
            .navigate_to_section("pricing", &fx.ctx(), &mut surface)
            .unwrap_err();
        assert_eq!(err, NavigationError::UnknownSection("pricing".to_string()));
        assert_eq!(router.active_section(), Section::Demo);
        assert!(surface.commands().is_empty());
        assert_eq!(router.history().len(), 2);
    }

    #[test]
    fn initializer_runs_once_per_navigation() {
        let fx = Fixture::new();
        let mut router = ViewRouter::default();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        router.set_initializer(Section::Docs, move |_| {
            counter.set(counter.get() + 1);
            SectionView::Empty
        });
        let mut surface = CommandQueue::new();

        router
            .navigate_to_section("docs", &fx.ctx(), &mut surface)
            .unwrap();
        assert_eq!(calls.get(), 1);
        router
            .navigate_to_section("docs", &fx.ctx(), &mut surface)
            .unwrap();
        assert_eq!(calls.get(), 2);
        router
            .navigate_to_section("dashboard", &fx.ctx(), &mut surface)
            .unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn demo_initializer_snapshots_users() {
        let fx = Fixture::new();
        let mut router = ViewRouter::default();
        let mut surface = CommandQueue::new();
        router
            .navigate_to_section("demo", &fx.ctx(), &mut surface)
            .unwrap();
        let rendered = surface.commands().iter().find_map(|c| match c {
            ViewCommand::Render {
                view: SectionView::Users { users },
                ..
            } => Some(users.len()),
            _ => None,
        });
        assert_eq!(rendered, Some(3));
    }

    #[test]
    fn tab_switch_requires_demo_section() {
        let fx = Fixture::new();
        let mut router = ViewRouter::default();
        let mut surface = CommandQueue::new();

        let err = router.navigate_to_tab("code", &mut surface).unwrap_err();
        assert!(matches!(err, NavigationError::TabOutsideDemo { .. }));
        assert_eq!(router.active_tab(), Tab::Users);

        router
            .navigate_to_section("demo", &fx.ctx(), &mut surface)
            .unwrap();
        assert_eq!(router.navigate_to_tab("code", &mut surface), Ok(Tab::Code));
        assert_eq!(router.active_tab(), Tab::Code);
        assert_eq!(router.active_section(), Section::Demo);
    }

    #[test]
    fn unknown_tab_is_rejected() {
        let fx = Fixture::new();
        let mut router = ViewRouter::default();
        let mut surface = CommandQueue::new();
        router
            .navigate_to_section("demo", &fx.ctx(), &mut surface)
            .unwrap();
        assert_eq!(
            router.navigate_to_tab("settings", &mut surface),
            Err(NavigationError::UnknownTab("settings".to_string()))
        );
        assert_eq!(router.active_tab(), Tab::Users);
    }

    #[test]
    fn restore_from_location_accepts_known_fragment_only() {
        let fx = Fixture::new();
        let mut surface = CommandQueue::new();

        let mut router = ViewRouter::default();
        assert_eq!(
            router.restore_from_location("#api-explorer", &fx.ctx(), &mut surface),
            Some(Section::ApiExplorer)
        );
        assert_eq!(router.active_section(), Section::ApiExplorer);

        let mut router = ViewRouter::default();
        assert_eq!(router.restore_from_location("#nope", &fx.ctx(), &mut surface), None);
        assert_eq!(router.restore_from_location("", &fx.ctx(), &mut surface), None);
        assert_eq!(router.active_section(), Section::Dashboard);
    }

    #[test]
    fn back_and_forward_do_not_push_entries() {
        let fx = Fixture::new();
        let mut router = ViewRouter::default();
        let mut surface = CommandQueue::new();
        router
            .navigate_to_section("demo", &fx.ctx(), &mut surface)
            .unwrap();
        router
            .navigate_to_section("docs", &fx.ctx(), &mut surface)
            .unwrap();
        assert_eq!(router.history().len(), 3);

        assert_eq!(router.back(&fx.ctx(), &mut surface), Some(Section::Demo));
        assert_eq!(router.back(&fx.ctx(), &mut surface), Some(Section::Dashboard));
        assert_eq!(router.back(&fx.ctx(), &mut surface), None);
        assert_eq!(router.active_section(), Section::Dashboard);
        assert_eq!(router.forward(&fx.ctx(), &mut surface), Some(Section::Demo));
        assert_eq!(router.history().len(), 3);
        assert_eq!(surface.last_fragment(), Some("demo"));
    }

    #[test]
    fn navigating_after_back_discards_forward_entries() {
        let fx = Fixture::new();
        let mut router = ViewRouter::default();
        let mut surface = CommandQueue::new();
        router
            .navigate_to_section("demo", &fx.ctx(), &mut surface)
            .unwrap();
        router
            .navigate_to_section("docs", &fx.ctx(), &mut surface)
            .unwrap();
        router.back(&fx.ctx(), &mut surface);
        router
            .navigate_to_section("api-explorer", &fx.ctx(), &mut surface)
            .unwrap();
        assert_eq!(router.forward(&fx.ctx(), &mut surface), None);
        assert_eq!(router.history().len(), 3);
    }

    #[test]
    fn restore_from_history_applies_without_push() {
        let fx = Fixture::new();
        let mut router = ViewRouter::default();
        let mut surface = CommandQueue::new();
        router.restore_from_history(Section::Docs, &fx.ctx(), &mut surface);
        assert_eq!(router.active_section(), Section::Docs);
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn restore_from_history_moves_cursor() {
        let fx = Fixture::new();
        let mut router = ViewRouter::default();
        let mut surface = CommandQueue::new();
        for name in ["api-explorer", "demo", "docs"] {
            router.navigate_to_section(name, &fx.ctx(), &mut surface).unwrap();
        }

        // Host popstate jumps two entries back.
        router.restore_from_history(Section::ApiExplorer, &fx.ctx(), &mut surface);
        assert_eq!(router.history().current(), Section::ApiExplorer);
        assert_eq!(router.back(&fx.ctx(), &mut surface), Some(Section::Dashboard));
        assert_eq!(router.forward(&fx.ctx(), &mut surface), Some(Section::ApiExplorer));
        assert_eq!(router.forward(&fx.ctx(), &mut surface), Some(Section::Demo));
    }

    #[test]
    fn history_seek_prefers_earlier_entries() {
        let mut history = History::new(Section::Dashboard);
        history.push(Section::Docs);
        history.push(Section::Dashboard);
        history.push(Section::Demo);
        history.back();
        history.back();
        assert_eq!(history.current(), Section::Docs);

        assert!(history.seek(Section::Dashboard));
        assert_eq!(history.current(), Section::Dashboard);
        assert_eq!(history.back(), None);

        assert!(history.seek(Section::Demo));
        assert_eq!(history.forward(), None);
        assert!(!history.seek(Section::ApiExplorer));
        assert_eq!(history.current(), Section::Demo);
    }

    #[test]
    fn missing_container_does_not_stop_navigation() {
        let fx = Fixture::new();
        let mut router = ViewRouter::default();
        let mut surface = CommandQueue::new().without_container("docs");
        let result = router.navigate_to_section("docs", &fx.ctx(), &mut surface);
        assert_eq!(result, Ok(Section::Docs));
        assert_eq!(router.active_section(), Section::Docs);
        assert_eq!(surface.last_fragment(), Some("docs"));
        assert!(!surface
            .commands()
            .iter()
            .any(|c| matches!(c, ViewCommand::Render { .. })));
    }
}
