use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Input bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_input_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Simulator => super::screens::simulator::render(f, area, app),
        Screen::Advisor => super::screens::advisor::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Editing => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
    };

    let sim_state = if app.reply_pending() {
        "advisor busy"
    } else if app.result.is_some() {
        "simulated"
    } else {
        "no simulation"
    };
    let info = format!(" {} | {sim_state}", app.screen);

    let right = match app.screen {
        Screen::Simulator => " j/k field | i edit | s simulate | ? help ",
        Screen::Advisor => " i type | Enter send | j/k scroll | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_input_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match (app.input_mode, app.screen) {
        (InputMode::Editing, Screen::Advisor) => (
            Line::from(vec![
                Span::styled("ask> ", Style::default().fg(theme::GREEN)),
                Span::styled(&app.chat_input, theme::input_bar_style()),
            ]),
            Some(5 + app.chat_input.chars().count() as u16),
        ),
        (InputMode::Editing, Screen::Simulator) => (
            Line::from(Span::styled(
                format!(" editing {} — Enter done, Esc cancel", app.selected_field().label()),
                theme::dim_style(),
            )),
            None,
        ),
        (InputMode::Normal, _) => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press 1/2 to switch screens, ? for help, Ctrl-q to quit",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::input_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::INPUT_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            " FinSim Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Navigation",
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  1/2              Switch screens        Tab        Cycle screens",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move / scroll         Ctrl-q, q  Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Simulator",
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  i or Enter      Edit selected field    s          Run simulation",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  (editing)       type digits, Enter done, Esc cancel",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Advisor",
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "  i               Type a question        Enter      Send",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Esc             Abandon a pending advisor request",
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Needs GROQ_API_KEY set for the advisor chat.",
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " Press any key to close ",
            Style::default().fg(theme::TEXT_DIM),
        )),
    ];

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
