#![allow(clippy::too_many_lines)]

//!

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{
        Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
        Tabs, Wrap,
    },
    Frame, Terminal,
};

use crate::{
    menu::MenuEntry,
    nav::RowKind,
    network_logs::{
        detail_lines,
        format::{format_duration, format_size, StatusClass},
        DetailTab, NetworkRequest,
    },
    router::Route,
    state::{Page, State, StatusMessage},
};

///
const SIDEBAR_WIDTH: u16 = 28;

///
const COLLAPSED_SIDEBAR_WIDTH: u16 = 8;

/// Leaves the terminal as it found it when any step fails.
pub fn configure_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let setup = || -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Ok(Terminal::new(backend)?)
    };

    setup().map_err(|err| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        let _ = disable_raw_mode();
        err
    })
}

///
pub fn ui<B: Backend>(frame: &mut Frame<B>, state: &State) {
    match state.current_page {
        Page::Menu | Page::NetworkLogs | Page::NetworkFilter => shell(frame, state),
        Page::Search => search(frame, state),
        Page::UserMenu => {
            shell(frame, state);
            user_menu(frame, state);
        }
    }
}

/// Symbol for a glyph name; unknown names render as a bullet.
fn glyph(icon: Option<&str>) -> &'static str {
    match icon {
        Some("home") => "⌂",
        Some("unordered-list") => "≡",
        Some("setting") => "⚙",
        Some("user") => "☺",
        Some("logout") => "⏻",
        Some(_) => "•",
        None => " ",
    }
}

///
fn highlight() -> Style {
    Style::default()
        .add_modifier(Modifier::BOLD)
        .fg(Color::Yellow)
}

///
fn shell<B: Backend>(frame: &mut Frame<B>, state: &State) {
    let mut main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(frame.size())
        .into_iter();

    if let Some(rect) = main_chunks.next() {
        frame.render_widget(header(state), rect);
    }

    if let Some(rect) = main_chunks.next() {
        let sidebar_width = if state.nav_state.is_collapsed() {
            COLLAPSED_SIDEBAR_WIDTH
        } else {
            SIDEBAR_WIDTH
        };

        let mut chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(10)].as_ref())
            .split(rect)
            .into_iter();

        if let Some(rect) = chunks.next() {
            let (sidebar, mut sidebar_state) = sidebar(state);
            frame.render_stateful_widget(sidebar, rect, &mut sidebar_state);
        }

        if let Some(rect) = chunks.next() {
            content(frame, state, rect);
        }
    }

    if let Some(rect) = main_chunks.next() {
        frame.render_widget(status(state), rect);
    }
}

///
fn header<'header>(state: &State) -> Paragraph<'header> {
    let block = Block::default().title("Console").borders(Borders::ALL);

    let mut spans = vec![Span::raw(" "), Span::raw(state.router.location().to_owned())];
    if state.nav_state.is_searching() {
        spans.push(Span::styled(
            format!("   search: {}", state.nav_state.search_text()),
            Style::default().fg(Color::Cyan),
        ));
    }
    let hint = match state.current_page {
        Page::NetworkLogs => {
            "   [enter] open  [t] tab  [m] method  [s] status  [f] filter  [c] connect  [x] clear  [tab] menu"
        }
        Page::NetworkFilter => "   type to filter  [enter] done",
        Page::Menu | Page::Search | Page::UserMenu => {
            "   [/] search  [u] user  [[] collapse  [H] home  [tab] content"
        }
    };
    spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
    if state.router.can_go_back() {
        spans.push(Span::styled("  [h] back", Style::default().fg(Color::DarkGray)));
    }

    Paragraph::new(Spans::from(spans)).block(block)
}

///
fn sidebar<'list>(state: &State) -> (List<'list>, ListState) {
    let collapsed = state.nav_state.is_collapsed();
    let selected = state.nav_state.selected_keys();

    let items: Vec<ListItem> = state
        .menu_rows()
        .into_iter()
        .map(|row| {
            let icon = glyph(row.icon.as_deref());
            let is_selected = row
                .key
                .as_ref()
                .map_or(false, |key| selected.contains(key));

            let text = match row.kind {
                RowKind::Divider => "─".repeat(usize::from(SIDEBAR_WIDTH)),
                RowKind::Group { open } if !collapsed => {
                    let marker = if open { "▾" } else { "▸" };
                    format!("{icon} {} {marker}", row.label)
                }
                RowKind::Leaf if !collapsed && row.depth > 0 => {
                    format!("   {icon} {}", row.label)
                }
                RowKind::Leaf if !collapsed => format!("{icon} {}", row.label),
                RowKind::Group { .. } | RowKind::Leaf => icon.to_owned(),
            };

            let style = if is_selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };

            ListItem::new(Text::styled(text, style))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.menu_cursor));

    let list = List::new(items)
        .block(Block::default().title("Menu").borders(Borders::ALL))
        .highlight_symbol("> ")
        .highlight_style(highlight());

    (list, list_state)
}

///
fn content<B: Backend>(frame: &mut Frame<B>, state: &State, rect: Rect) {
    let (title, body) = match state.route() {
        Route::NetworkLogs => {
            network_logs(frame, state, rect);
            return;
        }
        Route::Home => ("首页".to_owned(), "Welcome.".to_owned()),
        Route::Login => (
            "Login".to_owned(),
            "Sign-in is not wired to any backend.".to_owned(),
        ),
        Route::Register => (
            "Register".to_owned(),
            "Registration is not wired to any backend.".to_owned(),
        ),
        Route::Page { key, label } => (label, key),
        Route::NotFound => (
            "Not found".to_owned(),
            format!("Nothing lives at {}", state.router.location()),
        ),
    };

    let block = Block::default().title(title).borders(Borders::ALL);

    frame.render_widget(Paragraph::new(Text::raw(body)).block(block), rect);
}

///
fn method_color(method: &str) -> Color {
    match method.to_uppercase().as_str() {
        "GET" => Color::Green,
        "POST" => Color::Blue,
        "PUT" => Color::Yellow,
        "DELETE" => Color::Red,
        "PATCH" => Color::Magenta,
        "HEAD" => Color::Cyan,
        _ => Color::Gray,
    }
}

///
fn status_color(request: &NetworkRequest) -> Color {
    if request.error.is_some() {
        return Color::Red;
    }

    match request.status_class() {
        StatusClass::Unknown => Color::Gray,
        StatusClass::Success => Color::Green,
        StatusClass::Redirect => Color::Blue,
        StatusClass::ClientError => Color::Yellow,
        StatusClass::ServerError => Color::Red,
    }
}

/// Toolbar, request table and, once a row is opened, its detail tabs.
fn network_logs<B: Backend>(frame: &mut Frame<B>, state: &State, rect: Rect) {
    let logs = &state.network_logs;
    let visible = logs.visible();
    let detail = logs.selected_request();

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(4)];
    if detail.is_some() {
        constraints.push(Constraint::Percentage(55));
    }

    let mut chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(rect)
        .into_iter();

    if let Some(rect) = chunks.next() {
        let filter = logs.filter();
        let connection = if logs.is_connected() {
            Span::styled("● 已连接", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ 未连接", Style::default().fg(Color::Red))
        };

        let mut spans = vec![
            Span::raw(" "),
            connection,
            Span::raw(format!("   方法: {}", filter.method.unwrap_or("全部"))),
            Span::raw(format!("   状态: {}", filter.status.label())),
            Span::raw(format!("   过滤: {}", filter.text)),
        ];
        if state.current_page == Page::NetworkFilter {
            spans.push(Span::styled("_", Style::default().bg(Color::White)));
        }
        spans.push(Span::styled(
            format!("   {}/{}", visible.len(), logs.total()),
            Style::default().fg(Color::DarkGray),
        ));

        let toolbar = Block::default().title("网络日志").borders(Borders::ALL);
        frame.render_widget(Paragraph::new(Spans::from(spans)).block(toolbar), rect);
    }

    if let Some(rect) = chunks.next() {
        let header = Row::new(vec!["请求方式", "名称", "状态", "类型", "大小", "时间"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = visible
            .iter()
            .map(|request| {
                Row::new(vec![
                    Cell::from(request.method.to_uppercase())
                        .style(Style::default().fg(method_color(&request.method))),
                    Cell::from(request.url.clone()),
                    Cell::from(request.status_label())
                        .style(Style::default().fg(status_color(request))),
                    Cell::from(request.kind_label()),
                    Cell::from(format_size(request.response_size)),
                    Cell::from(format_duration(request.duration)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(10),
        ];

        let table = Table::new(rows)
            .header(header)
            .block(Block::default().title("Requests").borders(Borders::ALL))
            .widths(&widths)
            .highlight_symbol("> ")
            .highlight_style(highlight());

        let mut table_state = TableState::default();
        if matches!(state.current_page, Page::NetworkLogs | Page::NetworkFilter) && !visible.is_empty() {
            table_state.select(Some(logs.cursor()));
        }

        frame.render_stateful_widget(table, rect, &mut table_state);
    }

    if let (Some(rect), Some(request)) = (chunks.next(), detail) {
        let mut detail_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)].as_ref())
            .split(rect)
            .into_iter();

        if let Some(rect) = detail_chunks.next() {
            let titles = DetailTab::ALL
                .iter()
                .map(|tab| Spans::from(tab.label()))
                .collect();
            let title = format!("#{} {}", request.id, request.method.to_uppercase());

            let tabs = Tabs::new(titles)
                .block(Block::default().title(title).borders(Borders::ALL))
                .select(logs.tab().index())
                .highlight_style(highlight());

            frame.render_widget(tabs, rect);
        }

        if let Some(rect) = detail_chunks.next() {
            let body = Text::from(detail_lines(request, logs.tab()).join("\n"));
            let paragraph = Paragraph::new(body)
                .block(Block::default().borders(Borders::ALL))
                .wrap(Wrap { trim: false });

            frame.render_widget(paragraph, rect);
        }
    }
}

///
fn status<'status>(state: &State) -> Paragraph<'status> {
    let location = Block::default().title("Status").borders(Borders::ALL);

    let message = match state.status.message {
        StatusMessage::Ok(ref msg) => Text::from(Spans::from(Span::styled(
            format!("[Ok] {msg}"),
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Green),
        ))),
        StatusMessage::Warn(ref msg) => Text::from(Spans::from(Span::styled(
            format!("[Warning] {msg}"),
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Yellow),
        ))),
        StatusMessage::Err(ref msg) => Text::from(Spans::from(Span::styled(
            format!("[Error] {msg}"),
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Red),
        ))),
        StatusMessage::Empty => Text::raw(""),
    };

    Paragraph::new(message).block(location)
}

///
fn search<B: Backend>(frame: &mut Frame<B>, state: &State) {
    let mut chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(frame.size())
        .into_iter();

    if let Some(rect) = chunks.next() {
        let input = Block::default().title("Search").borders(Borders::ALL);
        let input_text = Spans::from(vec![
            Span::raw(" > "),
            Span::raw(state.nav_state.search_text().to_owned()),
            Span::styled("_", Style::default().bg(Color::White)),
        ]);
        let input_paragraph = Paragraph::new(input_text).block(input);
        frame.render_widget(input_paragraph, rect);
    }

    if let Some(rect) = chunks.next() {
        let results = state.nav_state.flat_results();
        let items: Vec<ListItem> = results
            .iter()
            .map(|hit| {
                let mut spans = vec![Span::raw(format!("{} ", glyph(hit.icon.as_deref())))];
                if let Some(ref parent) = hit.parent_label {
                    spans.push(Span::styled(
                        format!("{parent} / "),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                spans.push(Span::raw(hit.label.clone()));

                ListItem::new(Spans::from(spans))
            })
            .collect();

        let title = format!("Results ({})", items.len());
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_symbol("> ")
            .highlight_style(highlight());

        let mut list_state = ListState::default();
        if !results.is_empty() {
            list_state.select(Some(state.search_cursor));
        }

        frame.render_stateful_widget(list, rect, &mut list_state);
    }

    if let Some(rect) = chunks.next() {
        frame.render_widget(status(state), rect);
    }
}

///
fn user_menu<B: Backend>(frame: &mut Frame<B>, state: &State) {
    let entries = state.user_menu.entries();
    let height = u16::try_from(entries.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = frame.size();

    let popup = Rect::new(
        area.width.saturating_sub(SIDEBAR_WIDTH.saturating_add(2)),
        area.y.saturating_add(4),
        SIDEBAR_WIDTH.min(area.width),
        height.min(area.height),
    );

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| match *entry {
            MenuEntry::Leaf(ref leaf) => ListItem::new(format!(
                "{} {}",
                glyph(leaf.icon.as_deref()),
                leaf.label
            )),
            MenuEntry::Group(ref group) => ListItem::new(group.label.clone()),
            MenuEntry::Divider => ListItem::new("─".repeat(usize::from(SIDEBAR_WIDTH))),
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("User").borders(Borders::ALL))
        .highlight_symbol("> ")
        .highlight_style(highlight());

    let mut list_state = ListState::default();
    list_state.select(Some(state.user_menu_cursor));

    frame.render_widget(Clear, popup);
    frame.render_stateful_widget(list, popup, &mut list_state);
}
