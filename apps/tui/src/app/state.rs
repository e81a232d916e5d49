use color_eyre::Result;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::{info, warn};
use vinos_ibericos::config::AppConfig;
use vinos_ibericos::data::load_locations;
use vinos_ibericos::db::BodegaRecord;
use vinos_ibericos::detail::DetailView;
use vinos_ibericos::domain::{sorted_by_name, Location};
use vinos_ibericos::forms::BodegaForm;
use vinos_ibericos::map::MapPlan;
use vinos_ibericos::{Selection, SelectionChange};

use crate::app::actions::AppActions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Main,
    Bodegas,
    BodegaForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Blocking message; swallows input until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub config: AppConfig,
    pub actions: AppActions,
    pub screen: AppScreen,
    pub show_help: bool,
    pub notice: Option<Notice>,
    pub status_message: String,

    /// Locations sorted by name
    pub locations: Vec<Location>,
    pub cursor: usize,
    pub selection: Selection,
    pub detail: Option<DetailView>,
    /// First visible line of the detail text
    pub detail_scroll: u16,
    pub map_plan: Option<MapPlan>,

    pub search_active: bool,
    pub search_query: String,
    pub filtered_indices: Vec<usize>,

    pub bodegas: Vec<BodegaRecord>,
    pub selected_bodega_index: usize,
    pub bodega_view: Option<BodegaRecord>,

    pub form: BodegaForm,
    pub form_return: AppScreen,
}

impl App {
    pub fn new(config: AppConfig, locations: Vec<Location>) -> Self {
        let actions = AppActions::new(&config);
        let locations = sorted_by_name(&locations);
        let filtered_indices = (0..locations.len()).collect();

        Self {
            running: true,
            config,
            actions,
            screen: AppScreen::Main,
            show_help: false,
            notice: None,
            status_message: String::new(),
            locations,
            cursor: 0,
            selection: Selection::new(),
            detail: None,
            detail_scroll: 0,
            map_plan: None,
            search_active: false,
            search_query: String::new(),
            filtered_indices,
            bodegas: Vec::new(),
            selected_bodega_index: 0,
            bodega_view: None,
            form: BodegaForm::new(),
            form_return: AppScreen::Main,
        }
    }

    pub async fn initialize_db(&mut self) -> Result<()> {
        self.actions.initialize().await
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Location under the list cursor.
    pub fn cursor_location(&self) -> Option<&Location> {
        self.filtered_indices
            .get(self.cursor)
            .and_then(|&index| self.locations.get(index))
    }

    pub fn selected_location(&self) -> Option<&Location> {
        let name = self.selection.current()?;
        self.locations.iter().find(|l| l.name == name)
    }

    /// Toggles the entry under the cursor.
    pub fn toggle_cursor(&mut self) {
        let Some(name) = self.cursor_location().map(|l| l.name.clone()) else {
            return;
        };
        let change = self.selection.toggle(&name);
        if let Some(change) = change {
            self.on_selection_changed(&change);
        }
    }

    /// Deselects, shows the default map and closes the detail overlay.
    pub fn reset(&mut self) {
        match self.selection.clear() {
            Some(change) => self.on_selection_changed(&change),
            None => {
                self.detail = None;
                self.refresh_map();
            }
        }
        self.status_message = "View reset".to_string();
    }

    /// Single reaction point for selection transitions.
    pub fn on_selection_changed(&mut self, change: &SelectionChange) {
        info!(
            "Selection changed from {:?} to {:?}",
            change.previous, change.current
        );
        self.refresh_map();
        self.refresh_detail();
        self.status_message = change.current.as_ref().map_or_else(
            || "Selection cleared".to_string(),
            |name| format!("Selected {name}"),
        );
    }

    /// Re-renders the map for the current selection.
    pub fn refresh_map(&mut self) {
        let filter = self.selection.current().map(str::to_string);
        let (plan, written) = self.actions.show_map(&self.locations, filter.as_deref());
        self.map_plan = Some(plan);
        if let Err(e) = written {
            self.notify(Notice::error("Map", e.to_string()));
        }
    }

    /// Opens, refreshes or closes the detail overlay to match the selection.
    pub fn refresh_detail(&mut self) {
        self.detail = self
            .selected_location()
            .map(|location| DetailView::build(location, &self.config.assets));
        self.detail_scroll = 0;
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.detail_scroll = 0;
    }

    /// Scrolls the detail text by `delta` lines, stopping at its first and
    /// last line.
    pub fn scroll_detail(&mut self, delta: i32) {
        let Some(detail) = &self.detail else {
            return;
        };
        let last = u16::try_from(detail.lines.len() + detail.links.len()).unwrap_or(u16::MAX);
        let target = i32::from(self.detail_scroll).saturating_add(delta);
        self.detail_scroll = u16::try_from(target.max(0)).unwrap_or(u16::MAX).min(last);
    }

    /// Re-reads the locations file, keeping the previous list on failure.
    pub fn reload(&mut self) {
        match load_locations(&self.config.locations_path) {
            Ok(locations) => {
                self.locations = sorted_by_name(&locations);
                let keep = self
                    .selection
                    .current()
                    .filter(|name| self.locations.iter().any(|l| l.name == *name))
                    .map(str::to_string);
                self.selection.restore(keep);
                self.update_search();
                self.refresh_map();
                self.refresh_detail();
                self.status_message = format!("Reloaded {} locations", self.locations.len());
            }
            Err(e) => {
                warn!("Reload failed: {e}");
                self.notify(Notice::error("Reload failed", e.to_string()));
            }
        }
    }

    pub fn open_map(&mut self) {
        match self.actions.open_map() {
            Ok(()) => {
                self.status_message =
                    format!("Map opened: {}", self.actions.sink.path().display());
            }
            Err(e) => self.notify(Notice::error("Map", e.to_string())),
        }
    }

    /// Opens the numbered link of the detail overlay.
    pub fn open_detail_link(&mut self, number: usize) {
        let Some(href) = self
            .detail
            .as_ref()
            .and_then(|d| d.link(number))
            .map(|link| link.href.clone())
        else {
            return;
        };
        match AppActions::open_external(&href) {
            Ok(()) => self.status_message = format!("Opened {href}"),
            Err(e) => self.notify(Notice::error("Link", e.to_string())),
        }
    }

    pub fn open_detail_image(&mut self) {
        let Some(path) = self
            .detail
            .as_ref()
            .and_then(|d| d.image.path())
            .map(|p| p.display().to_string())
        else {
            return;
        };
        if let Err(e) = AppActions::open_external(&path) {
            self.notify(Notice::error("Image", e.to_string()));
        }
    }

    pub fn start_search(&mut self) {
        self.search_active = true;
    }

    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.search_query.clear();
        self.update_search();
    }

    /// Recomputes the visible entries for the current query, best match first.
    pub fn update_search(&mut self) {
        let query = self.search_query.trim();
        self.filtered_indices = if query.is_empty() {
            (0..self.locations.len()).collect()
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(i64, usize)> = self
                .locations
                .iter()
                .enumerate()
                .filter_map(|(i, l)| matcher.fuzzy_match(&l.name, query).map(|s| (s, i)))
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
            scored.into_iter().map(|(_, i)| i).collect()
        };
        if self.cursor >= self.filtered_indices.len() {
            self.cursor = self.filtered_indices.len().saturating_sub(1);
        }
    }

    pub async fn fetch_bodegas(&mut self) -> Result<()> {
        self.bodegas = self.actions.fetch_bodegas().await?;
        if self.selected_bodega_index >= self.bodegas.len() {
            self.selected_bodega_index = self.bodegas.len().saturating_sub(1);
        }
        Ok(())
    }

    pub async fn open_bodegas(&mut self) {
        match self.fetch_bodegas().await {
            Ok(()) => {
                self.bodega_view = None;
                self.screen = AppScreen::Bodegas;
            }
            Err(e) => self.notify(Notice::error("Bodegas", e.to_string())),
        }
    }

    pub async fn view_selected_bodega(&mut self) {
        let Some(id) = self.bodegas.get(self.selected_bodega_index).map(|b| b.id) else {
            return;
        };
        match self.actions.get_bodega(id).await {
            Ok(Some(record)) => self.bodega_view = Some(record),
            Ok(None) => self.status_message = format!("Bodega {id} no longer exists"),
            Err(e) => self.notify(Notice::error("Bodegas", e.to_string())),
        }
    }

    pub async fn delete_selected_bodega(&mut self) {
        let Some((id, name)) = self
            .bodegas
            .get(self.selected_bodega_index)
            .map(|b| (b.id, b.name.clone()))
        else {
            return;
        };
        match self.actions.delete_bodega(id).await {
            Ok(true) => self.status_message = format!("Deleted bodega {name}"),
            Ok(false) => self.status_message = format!("Bodega {id} was already gone"),
            Err(e) => {
                self.notify(Notice::error("Delete failed", e.to_string()));
                return;
            }
        }
        self.bodega_view = None;
        if let Err(e) = self.fetch_bodegas().await {
            self.notify(Notice::error("Bodegas", e.to_string()));
        }
    }

    pub fn open_form(&mut self) {
        self.form_return = self.screen;
        self.form.clear();
        self.screen = AppScreen::BodegaForm;
    }

    pub fn close_form(&mut self) {
        self.form.clear();
        self.screen = self.form_return;
    }

    /// Validates the form and stores the bodega; the form stays open on error.
    pub async fn submit_form(&mut self) {
        let data = match self.form.submit() {
            Ok(data) => data,
            Err(e) => {
                self.notify(Notice::error("Invalid bodega", e.to_string()));
                return;
            }
        };
        let name = data
            .get("name")
            .and_then(Clone::clone)
            .unwrap_or_default();

        match self.actions.add_bodega(&data).await {
            Ok(id) => {
                self.notify(Notice::info(
                    "Bodega added",
                    format!("The bodega \u{ab} {name} \u{bb} was added (id {id})."),
                ));
                self.close_form();
                if self.screen == AppScreen::Bodegas {
                    if let Err(e) = self.fetch_bodegas().await {
                        self.status_message = format!("Failed to refresh bodegas: {e}");
                    }
                }
            }
            Err(e) => self.notify(Notice::error("Could not add bodega", e.to_string())),
        }
    }
}
