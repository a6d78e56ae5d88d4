use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::{App, ChatRole};
use crate::ui::theme;
use crate::ui::util::wrap_text;

/// The conversation as wrapped, styled lines. Shared between rendering and
/// the scroll clamp in the event loop.
pub(crate) fn transcript_lines(app: &App) -> Vec<Line<'_>> {
    let width = app.chat_wrap_width.max(1);
    let mut lines: Vec<Line> = Vec::new();

    for entry in &app.messages {
        let (who, who_style) = match entry.role {
            ChatRole::User => (
                "You",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            ChatRole::Advisor => (
                "Advisor",
                Style::default()
                    .fg(theme::GREEN)
                    .add_modifier(Modifier::BOLD),
            ),
        };
        lines.push(Line::from(Span::styled(format!("{who}:"), who_style)));
        for wrapped in wrap_text(&entry.text, width) {
            lines.push(Line::from(Span::styled(
                format!("  {wrapped}"),
                theme::normal_style(),
            )));
        }
        lines.push(Line::from(""));
    }

    if app.reply_pending() {
        lines.push(Line::from(Span::styled(
            "Advisor is thinking…",
            theme::dim_style(),
        )));
    } else if app.messages.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask anything about your budget. Press i to type, Enter to send.",
            theme::dim_style(),
        )));
    }

    lines
}

/// Largest useful `chat_scroll` value for the current transcript.
pub(crate) fn max_scroll(app: &App) -> usize {
    let height = app.visible_rows.saturating_sub(2).max(1);
    transcript_lines(app).len().saturating_sub(height)
}

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Financial AI Advisor ", theme::title_style()));

    if app.input.is_none() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Run a simulation first so the advisor knows your figures.",
                theme::dim_style(),
            )),
            Line::from(Span::styled(
                "Press 1 for the simulator, then s to simulate.",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let lines = transcript_lines(app);

    // Keep the tail visible; chat_scroll walks back up from the bottom.
    let height = area.height.saturating_sub(2) as usize;
    let max_offset = lines.len().saturating_sub(height.max(1));
    let offset = max_offset.saturating_sub(app.chat_scroll.min(max_offset));

    let transcript = Paragraph::new(lines)
        .block(block)
        .scroll((offset as u16, 0));
    f.render_widget(transcript, area);
}
