// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Points};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use webring_app::{
    AppCommand, AppEvent, AppMode, AppState, Catalog, Category, Entry, LoadState,
    ResizeController, SortKey, category_count,
};
use webring_fetch::LoadError;

/// Sidebar widths are stored in tenths of a terminal column.
pub const UNITS_PER_COLUMN: i64 = 10;

const NUDGE_STEP: i64 = 50;
const HEADER_HEIGHT: u16 = 6;
const STATUS_HEIGHT: u16 = 1;
const PROGRAM_COLUMN_WIDTH: u16 = 9;
const YEAR_COLUMN_WIDTH: u16 = 6;
const COLUMN_SPACING: u16 = 1;
const TAB_DIVIDER: &str = "│";
const RING_RADIUS: f64 = 1.0;
const RING_BOUND: f64 = 1.45;
const LABEL_OFFSET: f64 = 1.12;
const TITLE: &str = "Concordia Webring";
const OTHER_WEBRINGS: [(&str, &str); 4] = [
    ("McGill CS", "https://mcgillcswebring.pages.dev/"),
    ("UBC", "https://webring.michaeldemar.co/"),
    ("Waterloo SE", "https://se-webring.xyz/"),
    ("Waterloo CS", "https://cs.uwatering.com/"),
];
const CONTRIBUTE_NOTE: &str = "Want to add your website? Open a pull request that updates webring.json at https://github.com/rvdeguzman/concordia-webring/";
const BLURB: &str = "A collection of personal websites from students and alumni of Concordia University's Gina Cody School of Engineering and Computer Science.";

/// Sortable headers in display order; the trailing website column is not
/// sortable.
const SORTABLE_COLUMNS: [SortKey; 3] = [SortKey::Name, SortKey::Program, SortKey::Year];

pub trait AppRuntime {
    fn load_catalog(&mut self) -> Result<Catalog, LoadError>;
    /// Starts the one catalog load for this session. The default runs it
    /// inline; runtimes with real I/O should move it off the UI thread.
    fn spawn_catalog_load(&mut self, tx: Sender<InternalEvent>) -> Result<()> {
        let result = self.load_catalog().map_err(|error| error.to_string());
        tx.send(InternalEvent::CatalogLoaded(result))
            .map_err(|_| anyhow::anyhow!("catalog event channel closed"))?;
        Ok(())
    }
    fn load_sidebar_width(&mut self) -> Result<Option<i64>>;
    fn save_sidebar_width(&mut self, width: i64) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    CatalogLoaded(Result<Catalog, String>),
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    viewport: Rect,
    selected_row: usize,
    scroll_offset: usize,
    help_visible: bool,
    status_token: u64,
}

/// Screen regions for one frame. Rendering and mouse hit-testing both read
/// from here so clicks land where things are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ScreenLayout {
    header: Rect,
    tabs: Rect,
    body: Rect,
    search: Rect,
    table: Rect,
    divider: Rect,
    ring: Rect,
    status: Rect,
}

impl ScreenLayout {
    fn visible_rows(&self) -> usize {
        usize::from(self.table.height.saturating_sub(1))
    }

    fn header_row(&self) -> u16 {
        self.table.y
    }

    fn first_row(&self) -> u16 {
        self.table.y.saturating_add(1)
    }
}

fn screen_layout(area: Rect, sidebar_width: i64) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    let (header, body, status) = (rows[0], rows[1], rows[2]);

    let header_inner = Rect::new(
        header.x.saturating_add(1),
        header.y.saturating_add(1),
        header.width.saturating_sub(2),
        header.height.saturating_sub(2),
    );
    // Blurb, other webrings, and the contribution note sit above the tabs.
    let tabs = Rect::new(
        header_inner.x,
        header_inner.y.saturating_add(3),
        header_inner.width,
        header_inner.height.saturating_sub(3).min(1),
    );

    let sidebar_columns = sidebar_columns(sidebar_width).min(body.width.saturating_sub(2));
    let sidebar = Rect::new(body.x, body.y, sidebar_columns, body.height);
    let divider = Rect::new(sidebar.right(), body.y, 1.min(body.width), body.height);
    let ring = Rect::new(
        divider.right(),
        body.y,
        body.right().saturating_sub(divider.right()),
        body.height,
    );
    let search = Rect::new(sidebar.x, sidebar.y, sidebar.width, 1.min(sidebar.height));
    let table = Rect::new(
        sidebar.x,
        search.bottom(),
        sidebar.width,
        sidebar.height.saturating_sub(search.height),
    );

    ScreenLayout {
        header,
        tabs,
        body,
        search,
        table,
        divider,
        ring,
        status,
    }
}

fn sidebar_columns(width: i64) -> u16 {
    u16::try_from(width / UNITS_PER_COLUMN).unwrap_or(u16::MAX)
}

/// Column widths for name, program, year, and website. They always add up
/// to `width` once spacing is included.
fn column_widths(width: u16) -> [u16; 4] {
    let spacing = COLUMN_SPACING * 3;
    let remaining = width.saturating_sub(PROGRAM_COLUMN_WIDTH + YEAR_COLUMN_WIDTH + spacing);
    let name = (remaining / 2).max(4).min(remaining);
    let website = remaining - name;
    [name, PROGRAM_COLUMN_WIDTH, YEAR_COLUMN_WIDTH, website]
}

fn column_at(table: Rect, column: u16) -> Option<usize> {
    let mut start = table.x;
    for (index, width) in column_widths(table.width).into_iter().enumerate() {
        let end = start.saturating_add(width);
        if (start..end).contains(&column) {
            return Some(index);
        }
        start = end.saturating_add(COLUMN_SPACING);
    }
    None
}

fn tab_label(category: Category) -> String {
    format!(" {} ", category.as_str())
}

fn tab_at(tabs: Rect, column: u16, row: u16) -> Option<Category> {
    if !tabs.contains(Position::new(column, row)) {
        return None;
    }
    let mut start = tabs.x;
    for category in Category::ALL {
        let width = tab_label(category).chars().count() as u16;
        let end = start.saturating_add(width);
        if (start..end).contains(&column) {
            return Some(category);
        }
        start = end.saturating_add(TAB_DIVIDER.chars().count() as u16);
    }
    None
}

/// Positions on the unit circle for `count` entries, starting at twelve
/// o'clock and going clockwise.
fn ring_points(count: usize) -> Vec<(f64, f64)> {
    (0..count)
        .map(|index| {
            let angle = FRAC_PI_2 - TAU * index as f64 / count as f64;
            (RING_RADIUS * angle.cos(), RING_RADIUS * angle.sin())
        })
        .collect()
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    match runtime.load_sidebar_width() {
        Ok(width) => state.sidebar = ResizeController::restore(width),
        Err(error) => tracing::warn!(%error, "ignoring stored sidebar width"),
    }

    let (internal_tx, internal_rx) = mpsc::channel();
    if let Err(error) = runtime.spawn_catalog_load(internal_tx.clone()) {
        state.dispatch(AppCommand::ResolveLoad(Err(error.to_string())));
    }

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    let mut view_data = ViewData::default();

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        match terminal.size() {
            Ok(size) => view_data.viewport = Rect::new(0, 0, size.width, size.height),
            Err(error) => {
                result = Err(error).context("read terminal size");
                break;
            }
        }

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(state, runtime, &mut view_data, &internal_tx, mouse);
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::CatalogLoaded(result) => {
                state.dispatch(AppCommand::ResolveLoad(result));
                sync_cursor(state, view_data);
            }
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if !matches!(state.load, LoadState::Ready(_)) {
        return key.code == KeyCode::Char('q') || key.code == KeyCode::Esc;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
            emit_status(state, view_data, internal_tx, "help hidden");
        }
        return false;
    }

    if state.mode == AppMode::Search {
        handle_search_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    let command = match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => return true,
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
            emit_status(state, view_data, internal_tx, "help open");
            return false;
        }
        (KeyCode::Char('/'), _) => AppCommand::EnterSearch,
        (KeyCode::Tab, _) | (KeyCode::Char('f'), KeyModifiers::NONE) => AppCommand::NextCategory,
        (KeyCode::BackTab, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            AppCommand::PrevCategory
        }
        (KeyCode::Char(digit @ '1'..='6'), _) => {
            let index = digit as usize - '1' as usize;
            AppCommand::SetCategory(Category::ALL[index])
        }
        (KeyCode::Char('n'), _) => AppCommand::RequestSort(SortKey::Name),
        (KeyCode::Char('p'), _) => AppCommand::RequestSort(SortKey::Program),
        (KeyCode::Char('y'), _) => AppCommand::RequestSort(SortKey::Year),
        (KeyCode::Char('<'), _) => AppCommand::NudgeSidebar(-NUDGE_STEP),
        (KeyCode::Char('>'), _) => AppCommand::NudgeSidebar(NUDGE_STEP),
        (KeyCode::Char('j') | KeyCode::Down, _) => {
            move_cursor(state, runtime, view_data, internal_tx, 1);
            return false;
        }
        (KeyCode::Char('k') | KeyCode::Up, _) => {
            move_cursor(state, runtime, view_data, internal_tx, -1);
            return false;
        }
        (KeyCode::Enter, _) => {
            let entries = state.visible_entries();
            match entries.get(view_data.selected_row) {
                Some(entry) => {
                    let message = format!("{}: {}", entry.name, entry.website);
                    emit_status(state, view_data, internal_tx, message);
                }
                None => emit_status(state, view_data, internal_tx, "no site selected"),
            }
            return false;
        }
        (KeyCode::Esc, _) => AppCommand::SetHoveredEntry(None),
        _ => return false,
    };

    dispatch_and_refresh(state, runtime, view_data, command, internal_tx);
    false
}

fn handle_search_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let command = match (key.code, key.modifiers) {
        (KeyCode::Esc | KeyCode::Enter, _) => AppCommand::ExitSearch,
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::ClearSearch
        }
        (KeyCode::Backspace, _) => AppCommand::PopSearchChar,
        (KeyCode::Char(value), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::PushSearchChar(value)
        }
        _ => return,
    };
    dispatch_and_refresh(state, runtime, view_data, command, internal_tx);
}

fn handle_mouse_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mouse: MouseEvent,
) {
    if !matches!(state.load, LoadState::Ready(_)) || view_data.help_visible {
        return;
    }

    let layout = screen_layout(view_data.viewport, state.sidebar.width());
    let (column, row) = (mouse.column, mouse.row);
    let at = Position::new(column, row);

    let command = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if layout.divider.contains(at) {
                Some(AppCommand::BeginResize)
            } else if let Some(category) = tab_at(layout.tabs, column, row) {
                Some(AppCommand::SetCategory(category))
            } else if layout.table.contains(at) && row == layout.header_row() {
                column_at(layout.table, column)
                    .and_then(|index| SORTABLE_COLUMNS.get(index).copied())
                    .map(AppCommand::RequestSort)
            } else if let Some(index) = row_at(&layout, view_data, state, at) {
                view_data.selected_row = index;
                hovered_name(state, index).map(|name| AppCommand::SetHoveredEntry(Some(name)))
            } else {
                None
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if state.sidebar.is_resizing() => {
            Some(AppCommand::ResizeTo {
                pointer_x: i64::from(column) * UNITS_PER_COLUMN,
                container_left: i64::from(layout.body.x) * UNITS_PER_COLUMN,
            })
        }
        MouseEventKind::Up(MouseButton::Left) if state.sidebar.is_resizing() => {
            Some(AppCommand::EndResize)
        }
        MouseEventKind::Moved => {
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::SetHoveredCategory(tab_at(layout.tabs, column, row)),
                internal_tx,
            );
            let hovered = row_at(&layout, view_data, state, at)
                .and_then(|index| hovered_name(state, index));
            Some(AppCommand::SetHoveredEntry(hovered))
        }
        _ => None,
    };

    if let Some(command) = command {
        dispatch_and_refresh(state, runtime, view_data, command, internal_tx);
    }
}

fn row_at(
    layout: &ScreenLayout,
    view_data: &ViewData,
    state: &AppState,
    at: Position,
) -> Option<usize> {
    if !layout.table.contains(at) || at.y < layout.first_row() {
        return None;
    }
    let index = view_data.scroll_offset + usize::from(at.y - layout.first_row());
    (index < state.visible_entries().len()).then_some(index)
}

fn hovered_name(state: &AppState, index: usize) -> Option<String> {
    state
        .visible_entries()
        .get(index)
        .map(|entry| entry.name.clone())
}

fn move_cursor<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    delta: isize,
) {
    let entries = state.visible_entries();
    if entries.is_empty() {
        return;
    }
    let last = entries.len() - 1;
    view_data.selected_row = view_data.selected_row.saturating_add_signed(delta).min(last);
    scroll_into_view(state, view_data);
    let name = entries[view_data.selected_row].name.clone();
    dispatch_and_refresh(
        state,
        runtime,
        view_data,
        AppCommand::SetHoveredEntry(Some(name)),
        internal_tx,
    );
}

/// Keeps the cursor inside the derived list after it changes shape.
fn sync_cursor(state: &AppState, view_data: &mut ViewData) {
    let len = state.visible_entries().len();
    if len == 0 {
        view_data.selected_row = 0;
        view_data.scroll_offset = 0;
        return;
    }
    view_data.selected_row = view_data.selected_row.min(len - 1);
    view_data.scroll_offset = view_data.scroll_offset.min(len - 1);
    scroll_into_view(state, view_data);
}

fn scroll_into_view(state: &AppState, view_data: &mut ViewData) {
    let visible = screen_layout(view_data.viewport, state.sidebar.width()).visible_rows();
    if visible == 0 {
        return;
    }
    if view_data.selected_row < view_data.scroll_offset {
        view_data.scroll_offset = view_data.selected_row;
    } else if view_data.selected_row >= view_data.scroll_offset + visible {
        view_data.scroll_offset = view_data.selected_row + 1 - visible;
    }
}

fn dispatch_and_refresh<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = state.dispatch(command);

    if events.iter().any(|event| {
        matches!(
            event,
            AppEvent::CategoryChanged(_) | AppEvent::SearchChanged(_) | AppEvent::SortChanged(..)
        )
    }) {
        sync_cursor(state, view_data);
    }

    for event in &events {
        if let AppEvent::SidebarWidthCommitted(width) = event
            && let Err(error) = runtime.save_sidebar_width(*width)
        {
            tracing::warn!(%error, width, "sidebar width not saved");
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("save sidebar width failed: {error}"),
            );
        }
    }

    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    match &state.load {
        LoadState::Loading => {
            let loading = Paragraph::new("Loading ...")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title("webring"));
            frame.render_widget(loading, frame.area());
            return;
        }
        LoadState::Failed(message) => {
            let error = Paragraph::new(format!("{message}\n\nq quit"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Error"));
            frame.render_widget(error, frame.area());
            return;
        }
        LoadState::Ready(_) => {}
    }

    let layout = screen_layout(frame.area(), state.sidebar.width());
    let entries = state.visible_entries();

    render_header(frame, &layout, state);
    render_sidebar(frame, &layout, state, view_data, &entries);

    let divider_style = if state.sidebar.is_resizing() {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let divider_lines = (0..layout.divider.height)
        .map(|_| Line::from("┃"))
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(divider_lines).style(divider_style),
        layout.divider,
    );

    render_ring(frame, layout.ring, state, &entries);

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(status, layout.status);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_header(frame: &mut ratatui::Frame<'_>, layout: &ScreenLayout, state: &AppState) {
    let header = Paragraph::new(header_lines(state)).block(
        Block::default()
            .title(Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL),
    );
    frame.render_widget(header, layout.header);
}

/// Header body; the tab strip must stay last so it lands on `layout.tabs`.
fn header_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut spans = Vec::new();
    for (index, category) in Category::ALL.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(
                TAB_DIVIDER,
                Style::default().fg(Color::DarkGray),
            ));
        }
        let mut style = Style::default().fg(Color::White);
        if state.hovered_category == Some(category) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if category == state.active_category {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(tab_label(category), style));
    }

    let muted = Style::default().fg(Color::DarkGray);
    vec![
        Line::styled(BLURB, muted),
        other_webrings_line(),
        Line::styled(CONTRIBUTE_NOTE, muted),
        Line::from(spans),
    ]
}

fn other_webrings_line() -> Line<'static> {
    let muted = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::styled("Other webrings: ", muted)];
    for (index, (name, url)) in OTHER_WEBRINGS.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(" · ", muted));
        }
        spans.push(Span::styled(name, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!(" {url}"), muted));
    }
    Line::from(spans)
}

fn render_sidebar(
    frame: &mut ratatui::Frame<'_>,
    layout: &ScreenLayout,
    state: &AppState,
    view_data: &ViewData,
    entries: &[Entry],
) {
    frame.render_widget(
        Paragraph::new(search_line(state)).style(Style::default().fg(Color::White)),
        layout.search,
    );

    let header_cells = SORTABLE_COLUMNS
        .iter()
        .map(|key| header_label(state, *key))
        .chain(std::iter::once("Website".to_owned()))
        .map(|label| {
            Cell::from(label).style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        });
    let header = Row::new(header_cells);

    let rows = entries
        .iter()
        .enumerate()
        .skip(view_data.scroll_offset)
        .take(layout.visible_rows())
        .map(|(index, entry)| {
            let mut style = Style::default();
            if state.is_emphasized(entry) {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if index == view_data.selected_row {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Row::new(vec![
                Cell::from(entry.name.clone()),
                Cell::from(entry.program.clone()),
                Cell::from(entry.year.to_string()),
                Cell::from(entry.website.clone()),
            ])
            .style(style)
        });

    let widths = column_widths(layout.table.width).map(Constraint::Length);
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING);
    frame.render_widget(table, layout.table);
}

fn search_line(state: &AppState) -> String {
    let count = state
        .catalog()
        .map(|catalog| category_count(catalog, state.active_category))
        .unwrap_or(0);
    let query = match state.mode {
        AppMode::Search => format!("/ {}▏", state.search_text),
        AppMode::Nav if state.search_text.is_empty() => "/ to search".to_owned(),
        AppMode::Nav => format!("/ {}", state.search_text),
    };
    format!("Students ({count})  {query}")
}

fn header_label(state: &AppState, key: SortKey) -> String {
    match state.sort_marker(key) {
        Some(marker) => format!("{} {marker}", key.label()),
        None => key.label().to_owned(),
    }
}

fn render_ring(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, entries: &[Entry]) {
    let points = ring_points(entries.len());
    let (hot, plain): (Vec<_>, Vec<_>) = entries
        .iter()
        .zip(points.iter().copied())
        .partition(|(entry, _)| state.is_emphasized(entry));
    let plain = plain.into_iter().map(|(_, point)| point).collect::<Vec<_>>();
    let hot_points = hot.iter().map(|(_, point)| *point).collect::<Vec<_>>();

    let title = format!("{} ring", state.active_category.as_str());
    let canvas = Canvas::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .marker(Marker::Braille)
        .x_bounds([-RING_BOUND, RING_BOUND])
        .y_bounds([-RING_BOUND, RING_BOUND])
        .paint(|ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: RING_RADIUS,
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &plain,
                color: Color::White,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &hot_points,
                color: Color::Cyan,
            });
            for (entry, (x, y)) in &hot {
                ctx.print(
                    x * LABEL_OFFSET,
                    y * LABEL_OFFSET,
                    Line::styled(
                        entry.name.clone(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
            if entries.is_empty() {
                ctx.print(-0.3, 0.0, Line::styled("no sites", Style::default().fg(Color::DarkGray)));
            }
        });
    frame.render_widget(canvas, area);
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if let Some(status) = &state.status_line {
        return status.clone();
    }
    if view_data.help_visible {
        return String::new();
    }
    match state.mode {
        AppMode::Nav => "NAV | q quit | / search | tab/f/b category | n/p/y sort | j/k move | </> width | enter site | ? help".to_owned(),
        AppMode::Search => "SEARCH | type to filter | ctrl+u clear | esc/enter done".to_owned(),
    }
}

fn help_overlay_text() -> &'static str {
    "global: q or ctrl+c quit | ? help\n\
categories: tab/shift+tab or f/b rotate | 1-6 jump | mouse click tab\n\
sort: n name | p program | y year | again to flip | mouse click header\n\
list: j/k move | enter show site | mouse hover highlights the ring\n\
search: / start | type to filter | backspace | ctrl+u clear | esc/enter done\n\
sidebar: drag the divider | < narrower | > wider"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
