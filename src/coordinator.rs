//! Top-level view state machine.
//!
//! The coordinator decides which view is visible. Leaving an item view is
//! always a two-step affair: the coordinator records where to go next and
//! flags the item as exiting; the item's player plays its closing pass and
//! reports back through [`ViewCoordinator::on_item_exit_complete`], which
//! is the only place the pending target gets applied.
//!
//! The static views (overview and auxiliary) have their own fade/scale
//! transitions and switch immediately.

use crate::{Catalog, Item};

/// Which view is displayed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum View {
    /// The full-board overview
    #[default]
    Overview,
    /// The secondary informational view
    Auxiliary,
    /// A single item with its sequence viewer
    ItemDetail(String),
}

impl View {
    /// The item id for `ItemDetail`, `None` otherwise.
    pub fn item_id(&self) -> Option<&str> {
        match self {
            View::ItemDetail(id) => Some(id.as_str()),
            View::Overview | View::Auxiliary => None,
        }
    }

    #[inline]
    pub fn is_item(&self) -> bool {
        matches!(self, View::ItemDetail(_))
    }
}

/// What a coordinator operation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Nothing changed
    Ignored,
    /// The visible view changed immediately
    Switched(View),
    /// The active item started its closing pass; `pending` follows it
    ExitStarted { pending: View },
    /// A closing pass was already running; its pending target was replaced
    PendingReplaced { pending: View },
    /// The detail panel was opened (`true`) or closed (`false`)
    PanelToggled(bool),
}

/// Single authority over the visible view.
///
/// ## Example
///
/// ```rust
/// use showcase_core_view::{Catalog, ImageSequence, Item, Navigation, View, ViewCoordinator};
///
/// let item = |id: &str| Item {
///     id: id.into(),
///     display_name: id.into(),
///     headline: String::new(),
///     theme_color: "white".into(),
///     specs: Vec::new(),
///     features: Vec::new(),
///     image_sequence: ImageSequence::new(format!("/{id}/"), 5),
/// };
/// let catalog = Catalog::new(vec![item("a"), item("b")]).unwrap();
/// let mut nav = ViewCoordinator::new(catalog);
///
/// nav.select_item("a");
/// assert_eq!(nav.view(), &View::ItemDetail("a".into()));
///
/// // Switching items waits for the closing pass
/// let started = nav.select_item("b");
/// assert_eq!(started, Navigation::ExitStarted { pending: View::ItemDetail("b".into()) });
/// assert_eq!(nav.view(), &View::ItemDetail("a".into()));
///
/// nav.on_item_exit_complete();
/// assert_eq!(nav.view(), &View::ItemDetail("b".into()));
/// assert!(!nav.is_exiting());
/// ```
#[derive(Clone, Debug)]
pub struct ViewCoordinator {
    catalog: Catalog,
    view: View,
    /// The active item is playing its closing pass
    exiting: bool,
    /// Where to go once the closing pass completes
    pending: Option<View>,
    detail_panel_open: bool,
}

impl ViewCoordinator {
    /// Start on the overview.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            view: View::Overview,
            exiting: false,
            pending: None,
            detail_panel_open: false,
        }
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Id of the item whose viewer is mounted.
    #[inline]
    pub fn active_item_id(&self) -> Option<&str> {
        self.view.item_id()
    }

    pub fn active_item(&self) -> Option<&Item> {
        self.active_item_id().and_then(|id| self.catalog.get(id))
    }

    /// Position of the active item in the catalog.
    pub fn active_index(&self) -> Option<usize> {
        self.active_item_id().and_then(|id| self.catalog.index_of(id))
    }

    /// Whether the active item is playing its closing pass.
    ///
    /// Hosts forward this to the mounted player's closing request.
    #[inline]
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    #[inline]
    pub fn pending_target(&self) -> Option<&View> {
        self.pending.as_ref()
    }

    #[inline]
    pub fn is_detail_panel_open(&self) -> bool {
        self.detail_panel_open
    }

    /// The detail panel shows only over an item view.
    pub fn is_detail_panel_visible(&self) -> bool {
        self.detail_panel_open && self.view.is_item()
    }

    /// Overview navigation button state.
    pub fn is_overview_highlighted(&self) -> bool {
        self.view == View::Overview && !self.exiting
    }

    /// Auxiliary navigation button state.
    pub fn is_auxiliary_highlighted(&self) -> bool {
        self.view == View::Auxiliary && !self.exiting
    }

    /// Item navigation button state.
    pub fn is_item_highlighted(&self, id: &str) -> bool {
        self.active_item_id() == Some(id)
    }

    /// The item title card hides as soon as the item starts closing.
    pub fn is_title_visible(&self) -> bool {
        self.view.is_item() && !self.exiting
    }

    /// Show the item with `id`.
    ///
    /// From a static view this switches immediately. From another item it
    /// starts that item's closing pass first. Re-selecting the active item
    /// and unknown ids are ignored.
    pub fn select_item(&mut self, id: &str) -> Navigation {
        if !self.catalog.contains(id) {
            log::debug!("ignoring selection of unknown item {}", id);
            return Navigation::Ignored;
        }
        if self.active_item_id() == Some(id) {
            return Navigation::Ignored;
        }
        self.navigate(View::ItemDetail(id.to_string()))
    }

    /// Show the overview.
    pub fn request_overview(&mut self) -> Navigation {
        self.navigate(View::Overview)
    }

    /// Show the auxiliary view.
    pub fn request_auxiliary(&mut self) -> Navigation {
        self.navigate(View::Auxiliary)
    }

    /// Select the item after the active one, wrapping around.
    pub fn next(&mut self) -> Navigation {
        let Some(next) = self
            .active_item_id()
            .and_then(|id| self.catalog.next_id(id))
            .map(str::to_string)
        else {
            return Navigation::Ignored;
        };
        self.select_item(&next)
    }

    /// Select the item before the active one, wrapping around.
    pub fn prev(&mut self) -> Navigation {
        let Some(prev) = self
            .active_item_id()
            .and_then(|id| self.catalog.prev_id(id))
            .map(str::to_string)
        else {
            return Navigation::Ignored;
        };
        self.select_item(&prev)
    }

    /// Flip the detail panel. Only meaningful over an item view.
    pub fn toggle_detail_panel(&mut self) -> Navigation {
        if !self.view.is_item() {
            return Navigation::Ignored;
        }
        self.detail_panel_open = !self.detail_panel_open;
        Navigation::PanelToggled(self.detail_panel_open)
    }

    /// Close the detail panel if it's open.
    pub fn close_detail_panel(&mut self) -> Navigation {
        if !self.detail_panel_open {
            return Navigation::Ignored;
        }
        self.detail_panel_open = false;
        Navigation::PanelToggled(false)
    }

    /// The active item's closing pass reached frame 0.
    ///
    /// Applies the pending target (the overview when there is none) and
    /// returns to idle. Ignored unless an exit is in progress.
    pub fn on_item_exit_complete(&mut self) -> Navigation {
        if !self.exiting {
            log::debug!("ignoring exit completion while idle, view {:?}", self.view);
            return Navigation::Ignored;
        }
        let target = self.pending.take().unwrap_or_default();
        self.exiting = false;
        self.view = target.clone();
        log::debug!("exit complete, showing {:?}", target);
        Navigation::Switched(target)
    }

    fn navigate(&mut self, target: View) -> Navigation {
        // Any navigation closes the panel.
        self.detail_panel_open = false;

        if self.view.is_item() {
            self.pending = Some(target.clone());
            if self.exiting {
                log::debug!("replacing pending target with {:?}", target);
                return Navigation::PendingReplaced { pending: target };
            }
            self.exiting = true;
            log::debug!("closing {:?} before showing {:?}", self.view, target);
            return Navigation::ExitStarted { pending: target };
        }

        log::debug!("switching {:?} -> {:?}", self.view, target);
        self.pending = None;
        self.exiting = false;
        self.view = target.clone();
        Navigation::Switched(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::item;

    fn coordinator() -> ViewCoordinator {
        ViewCoordinator::new(Catalog::new(vec![item("a", 5), item("b", 5), item("c", 5)]).unwrap())
    }

    fn detail(id: &str) -> View {
        View::ItemDetail(id.to_string())
    }

    #[test]
    fn starts_on_overview() {
        let nav = coordinator();
        assert_eq!(nav.view(), &View::Overview);
        assert!(!nav.is_exiting());
        assert!(nav.pending_target().is_none());
        assert!(nav.is_overview_highlighted());
        assert!(!nav.is_title_visible());
    }

    #[test]
    fn select_from_static_views_is_immediate() {
        let mut nav = coordinator();
        assert_eq!(nav.select_item("a"), Navigation::Switched(detail("a")));
        assert!(!nav.is_exiting());
        assert_eq!(nav.active_index(), Some(0));
        assert!(nav.is_title_visible());

        let mut nav = coordinator();
        nav.request_auxiliary();
        assert_eq!(nav.select_item("c"), Navigation::Switched(detail("c")));
    }

    #[test]
    fn switching_items_waits_for_exit() {
        let mut nav = coordinator();
        nav.select_item("a");

        assert_eq!(
            nav.select_item("b"),
            Navigation::ExitStarted { pending: detail("b") }
        );
        assert_eq!(nav.view(), &detail("a"));
        assert!(nav.is_exiting());
        assert_eq!(nav.pending_target(), Some(&detail("b")));
        assert!(!nav.is_title_visible());

        assert_eq!(nav.on_item_exit_complete(), Navigation::Switched(detail("b")));
        assert_eq!(nav.view(), &detail("b"));
        assert!(!nav.is_exiting());
        assert!(nav.pending_target().is_none());
    }

    #[test]
    fn every_item_switch_closes_once() {
        let ids = ["a", "b", "c"];
        for &first in &ids {
            for &second in &ids {
                for &third in &ids {
                    let mut nav = coordinator();
                    nav.select_item(first);
                    let mut closes = 0;
                    for target in [second, third] {
                        if let Navigation::ExitStarted { .. } = nav.select_item(target) {
                            closes += 1;
                            nav.on_item_exit_complete();
                        }
                    }
                    assert_eq!(nav.view(), &detail(third));
                    let expected = (first != second) as usize + (second != third) as usize;
                    assert_eq!(closes, expected, "{first} -> {second} -> {third}");
                }
            }
        }
    }

    #[test]
    fn reselecting_active_item_is_noop() {
        let mut nav = coordinator();
        nav.select_item("a");
        nav.toggle_detail_panel();
        assert_eq!(nav.select_item("a"), Navigation::Ignored);
        assert!(!nav.is_exiting());
        assert!(nav.is_detail_panel_open());
    }

    #[test]
    fn unknown_item_is_ignored() {
        let mut nav = coordinator();
        assert_eq!(nav.select_item("zzz"), Navigation::Ignored);
        assert_eq!(nav.view(), &View::Overview);

        nav.select_item("a");
        assert_eq!(nav.select_item("zzz"), Navigation::Ignored);
        assert!(!nav.is_exiting());
    }

    #[test]
    fn overview_from_item_waits_for_exit() {
        let mut nav = coordinator();
        nav.select_item("a");
        assert_eq!(
            nav.request_overview(),
            Navigation::ExitStarted { pending: View::Overview }
        );
        assert!(nav.is_exiting());
        assert!(!nav.is_overview_highlighted());

        nav.on_item_exit_complete();
        assert_eq!(nav.view(), &View::Overview);
        assert!(nav.is_overview_highlighted());
    }

    #[test]
    fn auxiliary_from_item_waits_for_exit() {
        let mut nav = coordinator();
        nav.select_item("b");
        nav.request_auxiliary();
        assert_eq!(nav.pending_target(), Some(&View::Auxiliary));
        nav.on_item_exit_complete();
        assert_eq!(nav.view(), &View::Auxiliary);
        assert!(nav.is_auxiliary_highlighted());
    }

    #[test]
    fn static_views_switch_directly() {
        let mut nav = coordinator();
        assert_eq!(nav.request_auxiliary(), Navigation::Switched(View::Auxiliary));
        assert_eq!(nav.request_auxiliary(), Navigation::Switched(View::Auxiliary));
        assert_eq!(nav.request_overview(), Navigation::Switched(View::Overview));
        assert!(!nav.is_exiting());
    }

    #[test]
    fn navigation_during_exit_overwrites_pending() {
        let mut nav = coordinator();
        nav.select_item("a");
        nav.select_item("b");
        assert_eq!(
            nav.request_auxiliary(),
            Navigation::PendingReplaced { pending: View::Auxiliary }
        );
        assert_eq!(
            nav.select_item("c"),
            Navigation::PendingReplaced { pending: detail("c") }
        );
        nav.on_item_exit_complete();
        assert_eq!(nav.view(), &detail("c"));
    }

    #[test]
    fn exit_completion_consumes_pending_once() {
        let mut nav = coordinator();
        nav.select_item("a");
        nav.request_overview();
        assert_eq!(nav.on_item_exit_complete(), Navigation::Switched(View::Overview));
        assert!(!nav.is_exiting());
        assert!(nav.pending_target().is_none());

        // A repeated report has nothing left to apply
        assert_eq!(nav.on_item_exit_complete(), Navigation::Ignored);
        assert_eq!(nav.view(), &View::Overview);
    }

    #[test]
    fn idle_exit_completion_is_ignored() {
        let mut nav = coordinator();
        nav.select_item("a");
        nav.toggle_detail_panel();
        assert_eq!(nav.on_item_exit_complete(), Navigation::Ignored);
        assert_eq!(nav.view(), &detail("a"));
        assert!(nav.is_detail_panel_open());

        nav.request_overview();
        nav.on_item_exit_complete();
        nav.request_auxiliary();
        assert_eq!(nav.on_item_exit_complete(), Navigation::Ignored);
        assert_eq!(nav.view(), &View::Auxiliary);
    }

    #[test]
    fn next_and_prev_cycle() {
        let mut nav = coordinator();
        nav.select_item("c");
        assert_eq!(nav.next(), Navigation::ExitStarted { pending: detail("a") });
        nav.on_item_exit_complete();
        assert_eq!(nav.prev(), Navigation::ExitStarted { pending: detail("c") });
        nav.on_item_exit_complete();
        assert_eq!(nav.view(), &detail("c"));
    }

    #[test]
    fn next_cycles_through_whole_catalog() {
        let mut nav = coordinator();
        nav.select_item("b");
        for _ in 0..nav.catalog().len() {
            nav.next();
            nav.on_item_exit_complete();
        }
        assert_eq!(nav.active_item_id(), Some("b"));
    }

    #[test]
    fn next_prev_outside_item_view_ignored() {
        let mut nav = coordinator();
        assert_eq!(nav.next(), Navigation::Ignored);
        assert_eq!(nav.prev(), Navigation::Ignored);

        let mut empty = ViewCoordinator::new(Catalog::default());
        assert_eq!(empty.next(), Navigation::Ignored);
        assert_eq!(empty.prev(), Navigation::Ignored);
        assert_eq!(empty.select_item("a"), Navigation::Ignored);
    }

    #[test]
    fn detail_panel_rules() {
        let mut nav = coordinator();
        assert_eq!(nav.toggle_detail_panel(), Navigation::Ignored);

        nav.select_item("a");
        assert_eq!(nav.toggle_detail_panel(), Navigation::PanelToggled(true));
        assert!(nav.is_detail_panel_visible());
        assert_eq!(nav.toggle_detail_panel(), Navigation::PanelToggled(false));
        nav.toggle_detail_panel();

        // Navigation forces it closed
        nav.request_overview();
        assert!(!nav.is_detail_panel_open());

        nav.on_item_exit_complete();
        assert_eq!(nav.close_detail_panel(), Navigation::Ignored);
    }

    #[test]
    fn item_highlight_tracks_active_item() {
        let mut nav = coordinator();
        nav.select_item("a");
        assert!(nav.is_item_highlighted("a"));
        assert!(!nav.is_item_highlighted("b"));
        assert_eq!(nav.active_item().map(|i| i.display_name.as_str()), Some("A"));
    }
}
