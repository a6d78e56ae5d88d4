use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::engine::{self, BudgetResult, GoalOutlook};
use crate::ui::app::{App, FormField, InputMode};
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

const PROJECTION_MONTHS: u32 = 12;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(12),    // Form + results
            Constraint::Length(10), // Charts
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(chunks[0]);

    render_form(f, top[0], app);
    render_results(f, top[1], app);
    render_charts(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;
    let mut lines = vec![Line::from("")];

    for (i, field) in FormField::all().iter().enumerate() {
        let selected = i == app.field_index;
        let value = app.field_value(*field);
        let shown = if field.is_amount() && !value.trim().is_empty() {
            value.to_string()
        } else if field.is_amount() {
            "0".into()
        } else if value.is_empty() {
            "e.g. Buy a bike, Save ₹2L…".into()
        } else {
            value.to_string()
        };

        let label_style = if selected {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        let value_style = if selected && editing {
            theme::selected_style()
        } else if value.is_empty() && !field.is_amount() {
            theme::dim_style()
        } else {
            theme::normal_style()
        };

        // Long goal text would overflow the column; the full string still
        // reaches the engine and the advisor.
        let shown = if selected && editing {
            shown
        } else {
            truncate(&shown, 28)
        };

        let marker = if selected { "▸ " } else { "  " };
        let cursor = if selected && editing { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<24}", field.label()), label_style),
            Span::styled(format!("{shown}{cursor}"), value_style),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "  s simulate   i edit field   j/k move",
        theme::dim_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Your Financial Details ", theme::title_style()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Simulation Results ", theme::title_style()));

    let Some(result) = &app.result else {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No simulation yet. Fill in the form and press s.",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    };

    let balance_style = if result.monthly_balance < Decimal::ZERO {
        theme::negative_style()
    } else {
        theme::positive_style()
    };

    let mut lines = vec![
        Line::from(""),
        metric_line("Total Monthly Expenses", format_amount(result.total_expenses), theme::normal_style()),
        metric_line("Monthly Balance", format_amount(result.monthly_balance), balance_style),
        metric_line("Projected Yearly Savings", format_amount(result.yearly_savings), balance_style),
        metric_line(
            "Survival Without Income",
            format!("{} months", result.survival_months),
            theme::normal_style(),
        ),
        Line::from(""),
        goal_line(result),
    ];

    if !result.tips.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Smart Suggestions",
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        )));
        for tip in &result.tips {
            lines.push(Line::from(Span::styled(
                format!("  • {tip}"),
                theme::warning_style(),
            )));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn metric_line(label: &str, value: String, value_style: Style) -> Line<'_> {
    Line::from(vec![
        Span::styled(format!("  {label:<26}"), theme::dim_style()),
        Span::styled(value, value_style.add_modifier(Modifier::BOLD)),
    ])
}

fn goal_line(result: &BudgetResult) -> Line<'_> {
    match &result.goal {
        GoalOutlook::NoTarget => Line::from(Span::styled(
            "  No target amount in your goal",
            theme::dim_style(),
        )),
        GoalOutlook::Estimate { target, months } if *months > 0 => Line::from(Span::styled(
            format!(
                "  Goal of {} reachable in approx {months} months",
                format_amount(*target)
            ),
            theme::positive_style(),
        )),
        GoalOutlook::Estimate { target, .. } => Line::from(Span::styled(
            format!(
                "  Goal of {} is already within your savings",
                format_amount(*target)
            ),
            theme::positive_style(),
        )),
        GoalOutlook::NotReachable { target } => Line::from(Span::styled(
            format!(
                "  Goal of {} not reachable at this pace: nothing saved monthly",
                format_amount(*target)
            ),
            theme::negative_style(),
        )),
    }
}

fn render_charts(f: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_breakdown(f, halves[0], app);
    render_projection(f, halves[1], app);
}

/// Bar chart of the expense breakdown, the terminal stand-in for the old
/// pie chart. Negative balance contributes a zero-height savings bar.
fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Expense Breakdown ", theme::title_style()));

    let (Some(input), Some(result)) = (&app.input, &app.result) else {
        f.render_widget(block, area);
        return;
    };

    let savings = result.monthly_balance.max(Decimal::ZERO);
    let data = [
        ("Rent", input.rent),
        ("Groceries", input.groceries),
        ("Other", input.other_expenses),
        ("Savings", savings),
    ];

    let bars: Vec<Bar> = data
        .iter()
        .map(|(label, amt)| {
            Bar::default()
                .value(amt.floor().to_u64().unwrap_or(0))
                .label(Line::from(*label))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

/// Sparkline of projected savings over the next year. Months that dip
/// below zero flatten to the axis.
fn render_projection(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Projected Savings (12 months) ",
            theme::title_style(),
        ));

    let (Some(input), Some(result)) = (&app.input, &app.result) else {
        f.render_widget(block, area);
        return;
    };

    let data: Vec<u64> = engine::savings_projection(
        input.current_savings,
        result.monthly_balance,
        PROJECTION_MONTHS,
    )
    .iter()
    .map(|amt| amt.max(&Decimal::ZERO).floor().to_u64().unwrap_or(0))
    .collect();

    let sparkline = Sparkline::default()
        .block(block)
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}
