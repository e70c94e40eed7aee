// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AppMode, Catalog, Category, Entry, ResizeController, SortDirection, SortKey, derive};

const LOAD_FAILED_FALLBACK: &str = "failed to load webring data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready(Catalog),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub load: LoadState,
    pub active_category: Category,
    pub search_text: String,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub hovered_entry: Option<String>,
    pub hovered_category: Option<Category>,
    pub sidebar: ResizeController,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            load: LoadState::Loading,
            active_category: Category::All,
            search_text: String::new(),
            sort_key: SortKey::Year,
            sort_direction: SortDirection::Asc,
            hovered_entry: None,
            hovered_category: None,
            sidebar: ResizeController::default(),
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SetCategory(Category),
    NextCategory,
    PrevCategory,
    RequestSort(SortKey),
    SetSearchText(String),
    PushSearchChar(char),
    PopSearchChar,
    ClearSearch,
    EnterSearch,
    ExitSearch,
    SetHoveredEntry(Option<String>),
    SetHoveredCategory(Option<Category>),
    BeginResize,
    ResizeTo { pointer_x: i64, container_left: i64 },
    NudgeSidebar(i64),
    EndResize,
    ResolveLoad(Result<Catalog, String>),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    CategoryChanged(Category),
    SortChanged(SortKey, SortDirection),
    SearchChanged(String),
    HoveredEntryChanged(Option<String>),
    HoveredCategoryChanged(Option<Category>),
    ResizeStarted,
    SidebarResized(i64),
    /// A drag finished at a non-default width that should be persisted.
    SidebarWidthCommitted(i64),
    ResizeEnded,
    CatalogLoaded(usize),
    LoadFailed(String),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SetCategory(category) => {
                self.active_category = category;
                vec![AppEvent::CategoryChanged(category)]
            }
            AppCommand::NextCategory => self.rotate_category(1),
            AppCommand::PrevCategory => self.rotate_category(-1),
            AppCommand::RequestSort(key) => {
                if self.sort_key == key {
                    self.sort_direction = self.sort_direction.flipped();
                } else {
                    self.sort_key = key;
                    self.sort_direction = SortDirection::Asc;
                }
                vec![AppEvent::SortChanged(self.sort_key, self.sort_direction)]
            }
            AppCommand::SetSearchText(text) => self.replace_search(text),
            AppCommand::PushSearchChar(value) => {
                let mut text = self.search_text.clone();
                text.push(value);
                self.replace_search(text)
            }
            AppCommand::PopSearchChar => {
                let mut text = self.search_text.clone();
                if text.pop().is_none() {
                    return Vec::new();
                }
                self.replace_search(text)
            }
            AppCommand::ClearSearch => self.replace_search(String::new()),
            AppCommand::EnterSearch => {
                self.mode = AppMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitSearch => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetHoveredEntry(name) => {
                if self.hovered_entry == name {
                    return Vec::new();
                }
                self.hovered_entry = name.clone();
                vec![AppEvent::HoveredEntryChanged(name)]
            }
            AppCommand::SetHoveredCategory(category) => {
                if self.hovered_category == category {
                    return Vec::new();
                }
                self.hovered_category = category;
                vec![AppEvent::HoveredCategoryChanged(category)]
            }
            AppCommand::BeginResize => {
                self.sidebar.begin();
                vec![AppEvent::ResizeStarted]
            }
            AppCommand::ResizeTo {
                pointer_x,
                container_left,
            } => {
                if self.sidebar.drag_to(pointer_x, container_left) {
                    vec![AppEvent::SidebarResized(self.sidebar.width())]
                } else {
                    Vec::new()
                }
            }
            AppCommand::NudgeSidebar(delta) => {
                let before = self.sidebar.width();
                let committed = self.sidebar.nudge(delta);
                let mut events = Vec::new();
                if self.sidebar.width() != before {
                    events.push(AppEvent::SidebarResized(self.sidebar.width()));
                }
                if let Some(width) = committed {
                    events.push(AppEvent::SidebarWidthCommitted(width));
                }
                events
            }
            AppCommand::EndResize => {
                if !self.sidebar.is_resizing() {
                    return Vec::new();
                }
                let mut events = Vec::new();
                if let Some(width) = self.sidebar.end() {
                    events.push(AppEvent::SidebarWidthCommitted(width));
                }
                events.push(AppEvent::ResizeEnded);
                events
            }
            AppCommand::ResolveLoad(result) => self.resolve_load(result),
            AppCommand::SetStatus(message) => vec![self.set_status(message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.load {
            LoadState::Ready(catalog) => Some(catalog),
            LoadState::Loading | LoadState::Failed(_) => None,
        }
    }

    /// The list both views render. Empty until the catalog is loaded.
    pub fn visible_entries(&self) -> Vec<Entry> {
        self.catalog()
            .map(|catalog| {
                derive(
                    catalog,
                    self.active_category,
                    &self.search_text,
                    self.sort_key,
                    self.sort_direction,
                )
            })
            .unwrap_or_default()
    }

    pub fn is_emphasized(&self, entry: &Entry) -> bool {
        self.hovered_entry.as_deref() == Some(entry.name.as_str())
            || self
                .hovered_category
                .is_some_and(|category| category.matches_program(&entry.program))
    }

    pub fn sort_marker(&self, key: SortKey) -> Option<&'static str> {
        (self.sort_key == key).then(|| self.sort_direction.marker())
    }

    fn rotate_category(&mut self, delta: isize) -> Vec<AppEvent> {
        let categories = Category::ALL;
        let current = self.active_category.index() as isize;
        let len = categories.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_category = categories[next];
        vec![AppEvent::CategoryChanged(self.active_category)]
    }

    fn replace_search(&mut self, text: String) -> Vec<AppEvent> {
        if self.search_text == text {
            return Vec::new();
        }
        self.search_text = text;
        vec![AppEvent::SearchChanged(self.search_text.clone())]
    }

    fn resolve_load(&mut self, result: Result<Catalog, String>) -> Vec<AppEvent> {
        if self.load != LoadState::Loading {
            return Vec::new();
        }
        match result {
            Ok(catalog) => {
                let count = catalog.len();
                self.load = LoadState::Ready(catalog);
                vec![AppEvent::CatalogLoaded(count)]
            }
            Err(message) => {
                let message = if message.trim().is_empty() {
                    LOAD_FAILED_FALLBACK.to_owned()
                } else {
                    message
                };
                self.load = LoadState::Failed(message.clone());
                vec![AppEvent::LoadFailed(message)]
            }
        }
    }

    fn set_status(&mut self, message: String) -> AppEvent {
        self.status_line = Some(message.clone());
        AppEvent::StatusUpdated(message)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState, LoadState};
    use crate::{AppMode, Catalog, Category, Entry, SortDirection, SortKey};

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            Entry {
                name: "Bob".to_owned(),
                website: "b.com".to_owned(),
                year: 2023,
                program: "COMP".to_owned(),
            },
            Entry {
                name: "Amy".to_owned(),
                website: "a.com".to_owned(),
                year: 2022,
                program: "COEN".to_owned(),
            },
        ])
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.dispatch(AppCommand::ResolveLoad(Ok(sample_catalog())));
        state
    }

    #[test]
    fn repeated_sort_request_flips_direction() {
        let mut state = AppState::default();
        assert_eq!(state.sort_key, SortKey::Year);

        let events = state.dispatch(AppCommand::RequestSort(SortKey::Year));
        assert_eq!(state.sort_direction, SortDirection::Desc);
        assert_eq!(
            events,
            vec![AppEvent::SortChanged(SortKey::Year, SortDirection::Desc)]
        );

        state.dispatch(AppCommand::RequestSort(SortKey::Year));
        assert_eq!(state.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn new_sort_key_resets_to_ascending() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::RequestSort(SortKey::Year));
        assert_eq!(state.sort_direction, SortDirection::Desc);

        state.dispatch(AppCommand::RequestSort(SortKey::Program));
        assert_eq!(state.sort_key, SortKey::Program);
        assert_eq!(state.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn set_category_keeps_search_and_sort() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::SetSearchText("o".to_owned()));
        state.dispatch(AppCommand::RequestSort(SortKey::Name));
        state.dispatch(AppCommand::RequestSort(SortKey::Name));

        state.dispatch(AppCommand::SetCategory(Category::Comp));
        assert_eq!(state.active_category, Category::Comp);
        assert_eq!(state.search_text, "o");
        assert_eq!(state.sort_key, SortKey::Name);
        assert_eq!(state.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn category_rotation_wraps() {
        let mut state = AppState {
            active_category: Category::Elec,
            ..AppState::default()
        };
        let events = state.dispatch(AppCommand::NextCategory);
        assert_eq!(state.active_category, Category::All);
        assert_eq!(events, vec![AppEvent::CategoryChanged(Category::All)]);

        state.dispatch(AppCommand::PrevCategory);
        assert_eq!(state.active_category, Category::Elec);
    }

    #[test]
    fn search_text_edits_are_verbatim() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetSearchText("  Amy ".to_owned()));
        assert_eq!(state.search_text, "  Amy ");

        state.dispatch(AppCommand::PushSearchChar('x'));
        assert_eq!(state.search_text, "  Amy x");

        state.dispatch(AppCommand::PopSearchChar);
        state.dispatch(AppCommand::PopSearchChar);
        assert_eq!(state.search_text, "  Amy");

        let events = state.dispatch(AppCommand::ClearSearch);
        assert!(state.search_text.is_empty());
        assert_eq!(events, vec![AppEvent::SearchChanged(String::new())]);
        assert!(state.dispatch(AppCommand::PopSearchChar).is_empty());
    }

    #[test]
    fn search_mode_transitions() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::EnterSearch);
        assert_eq!(state.mode, AppMode::Search);
        state.dispatch(AppCommand::ExitSearch);
        assert_eq!(state.mode, AppMode::Nav);
    }

    #[test]
    fn hover_entry_and_category_are_independent() {
        let mut state = loaded_state();
        state.dispatch(AppCommand::SetHoveredEntry(Some("Amy".to_owned())));
        state.dispatch(AppCommand::SetHoveredCategory(Some(Category::Comp)));
        assert_eq!(state.hovered_entry.as_deref(), Some("Amy"));
        assert_eq!(state.hovered_category, Some(Category::Comp));

        let entries = state.visible_entries();
        assert!(entries.iter().all(|entry| state.is_emphasized(entry)));

        state.dispatch(AppCommand::SetHoveredEntry(None));
        assert_eq!(state.hovered_category, Some(Category::Comp));
        let emphasized = entries
            .iter()
            .filter(|entry| state.is_emphasized(entry))
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(emphasized, vec!["Bob"]);
    }

    #[test]
    fn unchanged_hover_emits_nothing() {
        let mut state = AppState::default();
        assert!(state.dispatch(AppCommand::SetHoveredEntry(None)).is_empty());
        assert!(
            state
                .dispatch(AppCommand::SetHoveredCategory(None))
                .is_empty()
        );
    }

    #[test]
    fn resize_drag_commits_non_default_width() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::BeginResize);
        assert!(state.sidebar.is_resizing());

        let ignored = state.dispatch(AppCommand::ResizeTo {
            pointer_x: 900,
            container_left: 0,
        });
        assert!(ignored.is_empty());
        assert_eq!(state.sidebar.width(), 800);

        let resized = state.dispatch(AppCommand::ResizeTo {
            pointer_x: 500,
            container_left: 0,
        });
        assert_eq!(resized, vec![AppEvent::SidebarResized(500)]);

        let ended = state.dispatch(AppCommand::EndResize);
        assert_eq!(
            ended,
            vec![AppEvent::SidebarWidthCommitted(500), AppEvent::ResizeEnded]
        );
        assert!(!state.sidebar.is_resizing());
        assert!(state.dispatch(AppCommand::EndResize).is_empty());
    }

    #[test]
    fn nudge_reports_resize_and_commit() {
        let mut state = AppState::default();
        let events = state.dispatch(AppCommand::NudgeSidebar(-50));
        assert_eq!(
            events,
            vec![
                AppEvent::SidebarResized(750),
                AppEvent::SidebarWidthCommitted(750),
            ]
        );
    }

    #[test]
    fn load_resolves_exactly_once() {
        let mut state = AppState::default();
        assert!(state.visible_entries().is_empty());

        let events = state.dispatch(AppCommand::ResolveLoad(Ok(sample_catalog())));
        assert_eq!(events, vec![AppEvent::CatalogLoaded(2)]);

        let ignored = state.dispatch(AppCommand::ResolveLoad(Err("late".to_owned())));
        assert!(ignored.is_empty());
        assert!(matches!(state.load, LoadState::Ready(_)));

        let names = state
            .visible_entries()
            .into_iter()
            .map(|entry| entry.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Amy".to_owned(), "Bob".to_owned()]);
    }

    #[test]
    fn load_failure_keeps_catalog_unset() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::ResolveLoad(Err(
            "fetch webring.json: HTTP 404 Not Found".to_owned(),
        )));
        assert!(state.catalog().is_none());
        match &state.load {
            LoadState::Failed(message) => assert!(message.contains("404")),
            other => panic!("expected failed load state, got {other:?}"),
        }

        let mut blank = AppState::default();
        blank.dispatch(AppCommand::ResolveLoad(Err("  ".to_owned())));
        assert_eq!(
            blank.load,
            LoadState::Failed("failed to load webring data".to_owned())
        );
    }

    #[test]
    fn sort_marker_tracks_active_key() {
        let mut state = AppState::default();
        assert_eq!(state.sort_marker(SortKey::Year), Some("▲"));
        assert_eq!(state.sort_marker(SortKey::Name), None);
        state.dispatch(AppCommand::RequestSort(SortKey::Year));
        assert_eq!(state.sort_marker(SortKey::Year), Some("▼"));
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();
        let events = state.dispatch(AppCommand::SetStatus("sorted".to_owned()));
        assert_eq!(events, vec![AppEvent::StatusUpdated("sorted".to_owned())]);
        assert_eq!(state.status_line.as_deref(), Some("sorted"));
        state.dispatch(AppCommand::ClearStatus);
        assert!(state.status_line.is_none());
    }
}
