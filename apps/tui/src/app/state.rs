use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use romi_dashboard_core::{FetchError, Fragment, Route, Surface};

use crate::ui::widgets::fragment::fragment_lines;

/// A requested move to another resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    /// Whether the route being left goes onto the back stack
    pub push_history: bool,
}

impl Navigation {
    pub const fn forward(route: Route) -> Self {
        Self {
            route,
            push_history: true,
        }
    }

    pub const fn revisit(route: Route) -> Self {
        Self {
            route,
            push_history: false,
        }
    }
}

/// Size of the content pane inside its border, as of the last draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub server: String,
    pub current: Option<Route>,
    pub pending: Option<Navigation>,
    pub history: Vec<Route>,
    pub fragment: Fragment,
    /// Index into [`App::visible_links`]
    pub selected_link: usize,
    /// First content row on screen, counted after wrapping
    pub scroll: usize,
    /// Whether the next draw scrolls the selected link into view
    pub follow_selection: bool,
    pub viewport: Viewport,
    pub alert: Option<String>,
    pub status_message: String,
    pub search_active: bool,
    pub search_query: String,
    /// Ordinals (in [`Fragment::links`]) of links matching the search query
    pub filtered_links: Vec<usize>,
}

impl App {
    pub fn new(start: Route, server: String) -> Self {
        Self {
            running: true,
            server,
            current: None,
            pending: Some(Navigation::forward(start)),
            history: Vec::new(),
            fragment: Fragment::new(),
            selected_link: 0,
            scroll: 0,
            follow_selection: true,
            viewport: Viewport::default(),
            alert: None,
            status_message: String::new(),
            search_active: false,
            search_query: String::new(),
            filtered_links: Vec::new(),
        }
    }

    /// Links currently offered for selection as `(ordinal, label, target)`
    pub fn visible_links(&self) -> Vec<(usize, &str, &Route)> {
        let links = self.fragment.links().into_iter().enumerate();
        if self.search_query.is_empty() {
            links.map(|(ordinal, (label, target))| (ordinal, label, target)).collect()
        } else {
            links
                .filter(|(ordinal, _)| self.filtered_links.contains(ordinal))
                .map(|(ordinal, (label, target))| (ordinal, label, target))
                .collect()
        }
    }

    /// Ordinal of the selected link within the whole fragment
    pub fn selected_ordinal(&self) -> Option<usize> {
        self.visible_links()
            .get(self.selected_link)
            .map(|(ordinal, _, _)| *ordinal)
    }

    pub fn selected_route(&self) -> Option<Route> {
        self.visible_links()
            .get(self.selected_link)
            .map(|(_, _, target)| (*target).clone())
    }

    pub fn follow_selected(&mut self) {
        if let Some(route) = self.selected_route() {
            self.pending = Some(Navigation::forward(route));
        }
    }

    pub fn go_back(&mut self) {
        match self.history.pop() {
            Some(route) => self.pending = Some(Navigation::revisit(route)),
            None => self.status_message = "Already at the first page".to_string(),
        }
    }

    pub fn reload(&mut self) {
        if let Some(route) = self.current.clone() {
            self.pending = Some(Navigation::revisit(route));
        }
    }

    /// Bookkeeping once `navigation` has been displayed
    pub fn arrive(&mut self, navigation: Navigation) {
        if navigation.push_history {
            if let Some(previous) = self.current.take() {
                if previous != navigation.route {
                    self.history.push(previous);
                }
            }
        }
        self.status_message = navigation.route.path();
        self.current = Some(navigation.route);
    }

    /// A failed back step keeps its route on the stack
    pub fn navigation_failed(&mut self, navigation: Navigation, error: &FetchError) {
        if !navigation.push_history && self.current.as_ref() != Some(&navigation.route) {
            self.history.push(navigation.route);
        }
        self.status_message = format!("Failed: {}", error.url());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn apply_search_filter(&mut self) {
        let matcher = SkimMatcherV2::default();
        self.filtered_links = self
            .fragment
            .links()
            .into_iter()
            .enumerate()
            .filter(|(_, (label, _))| matcher.fuzzy_match(label, &self.search_query).is_some())
            .map(|(ordinal, _)| ordinal)
            .collect();
        self.selected_link = 0;
    }

    pub fn clear_search(&mut self) {
        self.search_active = false;
        self.search_query.clear();
        self.filtered_links.clear();
        self.selected_link = 0;
    }

    /// Moves the selection up; at the first link the content scrolls instead
    pub fn select_previous(&mut self, step: usize) {
        if self.selected_link > 0 {
            self.selected_link = self.selected_link.saturating_sub(step);
            self.follow_selection = true;
        } else {
            self.scroll_up(step);
        }
    }

    /// Moves the selection down; past the last link the content scrolls instead
    pub fn select_next(&mut self, step: usize) {
        let total = self.visible_links().len();
        if self.selected_link + 1 < total {
            self.selected_link = (self.selected_link + step).min(total - 1);
            self.follow_selection = true;
        } else {
            self.scroll_down(step);
        }
    }

    pub fn select_first(&mut self) {
        self.selected_link = 0;
        self.scroll = 0;
        self.follow_selection = true;
    }

    /// Last link selected and the end of the content on screen
    pub fn select_last(&mut self) {
        self.selected_link = self.visible_links().len().saturating_sub(1);
        self.scroll = self.max_scroll().unwrap_or(usize::MAX);
        self.follow_selection = false;
    }

    /// Rows of content once wrapped to the viewport width
    pub fn content_rows(&self) -> usize {
        fragment_lines(&self.fragment, None, &|_| true)
            .wrapped(self.viewport.width)
            .lines
            .len()
    }

    /// Largest useful scroll offset, unknown until the first draw
    pub fn max_scroll(&self) -> Option<usize> {
        (self.viewport.height > 0)
            .then(|| self.content_rows().saturating_sub(self.viewport.height))
    }

    pub const fn page_rows(&self) -> usize {
        if self.viewport.height > 1 {
            self.viewport.height - 1
        } else {
            1
        }
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
        self.follow_selection = false;
    }

    pub fn scroll_down(&mut self, rows: usize) {
        let target = self.scroll.saturating_add(rows);
        self.scroll = self.max_scroll().map_or(target, |max| target.min(max));
        self.follow_selection = false;
    }

    /// Records the pane size at draw time and settles the scroll offset for
    /// `rows` rows of content, `selected_row` being the selected link's row.
    pub fn fit_viewport(
        &mut self,
        viewport: Viewport,
        rows: usize,
        selected_row: Option<usize>,
    ) -> usize {
        self.viewport = viewport;
        let height = viewport.height;

        if self.follow_selection {
            match selected_row {
                Some(row) if row >= self.scroll + height => {
                    self.scroll = (row + 1).saturating_sub(height);
                }
                Some(row) if row < self.scroll => self.scroll = row,
                _ => {}
            }
        }

        self.scroll = self.scroll.min(rows.saturating_sub(height));
        self.scroll
    }
}

impl Surface for App {
    fn replace(&mut self, fragment: Fragment) {
        self.fragment = fragment;
        self.scroll = 0;
        self.follow_selection = true;
        self.clear_search();
    }

    fn alert(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }
}
