//! Frame rendering. Everything here reads [`App`] state and draws; no state
//! is mutated outside the selection cursor handed to the list widget.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use atlas_core::format;

use crate::app::{App, Focus, LocationStatus};
use crate::toast::ToastKind;

const HINTS: &str = "Enter busca • ←/→ raio • ↑/↓ resultados • Ctrl+L localização • Esc sai";

pub fn draw(frame: &mut Frame, app: &App) {
    let toast_h = if app.toast.visible().is_some() { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(toast_h),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_status(frame, rows[0], app);
    draw_search_bar(frame, rows[1], app);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[2]);
    draw_results(frame, panes[0], app);
    draw_history(frame, panes[1], app);

    if toast_h > 0 {
        draw_toast(frame, rows[3], app);
    }
    frame.render_widget(
        Paragraph::new(HINTS).style(Style::default().fg(Color::DarkGray)),
        rows[4],
    );
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let color = match app.location {
        LocationStatus::Pending => Color::Yellow,
        LocationStatus::Acquired(_) => Color::Green,
        LocationStatus::Failed(_) => Color::Red,
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled("📍 ", Style::default().fg(color)),
        Span::styled(app.location.text(), Style::default().fg(color)),
    ]))
    .block(
        Block::default()
            .title("🗺️ Localizador de Estabelecimentos")
            .borders(Borders::ALL),
    );
    frame.render_widget(status, area);
}

fn draw_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(16),
        ])
        .split(area);

    let input_style = if app.focus == Focus::Input {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    // A trailing block glyph stands in for the cursor.
    let query = Paragraph::new(Line::from(vec![
        Span::raw(app.query.as_str()),
        Span::styled("▏", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .title("Busca")
            .borders(Borders::ALL)
            .border_style(input_style),
    );
    frame.render_widget(query, cols[0]);

    let radius = Paragraph::new(format::radius_km_label(app.radius_m()))
        .block(Block::default().title("Raio").borders(Borders::ALL));
    frame.render_widget(radius, cols[1]);

    let (label, style) = if app.searching {
        ("🔍 Buscando...", Style::default().fg(Color::Yellow))
    } else {
        ("🔍 Buscar", Style::default().fg(Color::Green))
    };
    let trigger =
        Paragraph::new(Span::styled(label, style)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(trigger, cols[2]);
}

fn draw_results(frame: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Results {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let Some(results) = app.results.as_ref() else {
        // Hidden region: nothing rendered until a search produces results.
        let placeholder = Paragraph::new("Faça uma busca para ver estabelecimentos próximos")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Resultados").borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    };

    let items: Vec<ListItem> = results
        .cards
        .iter()
        .map(|card| {
            let mut lines = vec![Line::from(Span::styled(
                card.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            let mut meta = Vec::new();
            if let Some(rating) = &card.rating {
                meta.push(Span::styled(rating.clone(), Style::default().fg(Color::Yellow)));
            }
            if let Some(distance) = &card.distance {
                if !meta.is_empty() {
                    meta.push(Span::raw("  "));
                }
                meta.push(Span::styled(distance.clone(), Style::default().fg(Color::Cyan)));
            }
            if !meta.is_empty() {
                lines.push(Line::from(meta));
            }
            lines.push(Line::from(card.address.clone()));
            let phone_style = if card.phone_missing {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("📞 {}", card.phone),
                phone_style,
            )));
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Resultados ({})", results.count_label))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    state.select(Some(results.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_history(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title("📋 Buscas Recentes")
        .borders(Borders::ALL);

    if app.history.is_empty() {
        let empty = Paragraph::new("Nenhuma busca realizada ainda")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .history
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    item.query.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    item.meta.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_toast(frame: &mut Frame, area: Rect, app: &App) {
    let Some((message, kind)) = app.toast.visible() else {
        return;
    };
    let color = match kind {
        ToastKind::Info => Color::Blue,
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    };
    let toast = Paragraph::new(message)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(toast, area);
}
