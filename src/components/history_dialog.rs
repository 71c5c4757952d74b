//! Saved quotations overlay
//!
//! Left panel: list of saved quotes, newest first.
//! Right panel: resolved lines of the selected quote.

use crate::action::Action;
use crate::component::Component;
use crate::model::{format_money, QuoteHistoryEntry};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// History overlay component
#[derive(Default)]
pub struct HistoryDialog {
    pub selected_index: usize,
    pub list_state: ListState,
}

impl HistoryDialog {
    pub fn reset(&mut self) {
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    /// Draw the overlay with the current history entries
    pub fn draw_with_history(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        entries: &[QuoteHistoryEntry],
    ) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 2;
        let overlay_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(overlay_area);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[0]);

        // Left: list of saved quotes
        let items: Vec<ListItem> = entries
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.formatted_time(), Style::default().fg(Color::DarkGray)),
                    Span::raw("  "),
                    Span::styled(
                        format_money(entry.total),
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(
                        format!("  ({} filas)", entry.lines.len()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title(" Historial ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        self.list_state.select(if entries.is_empty() {
            None
        } else {
            Some(self.selected_index)
        });
        frame.render_stateful_widget(list, panels[0], &mut self.list_state);

        // Right: lines of the selected quote
        let detail_lines: Vec<Line> = match entries.get(self.selected_index) {
            Some(entry) => {
                let mut lines: Vec<Line> = entry
                    .lines
                    .iter()
                    .map(|line| {
                        Line::from(format!(
                            "{} × {}  {}  = {}",
                            line.quantity,
                            line.service,
                            format_money(line.unit_price),
                            format_money(line.subtotal),
                        ))
                    })
                    .collect();
                lines.push(Line::from(""));
                lines.push(Line::from(format!(
                    "Subtotal {}",
                    format_money(entry.subtotal)
                )));
                lines.push(Line::from(format!(
                    "Descuento {:.1}%",
                    entry.discount_percent
                )));
                lines.push(Line::from(Span::styled(
                    format!("Total {}", format_money(entry.total)),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )));
                lines
            }
            None => vec![Line::from(Span::styled(
                "Sin cotizaciones guardadas",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        let detail = Paragraph::new(detail_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Detalle ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(detail, panels[1]);

        // Help bar
        let help = Paragraph::new(Line::from(vec![
            Span::styled(
                " j/k ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Navegar  "),
            Span::styled(
                " Esc/q ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Cerrar"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(help, chunks[1]);
        Ok(())
    }
}

impl Component for HistoryDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('v') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ModalDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ModalUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ModalUp => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            Action::ModalDown => {
                // Upper bound is clamped by the caller, which knows the length
                self.selected_index = self.selected_index.saturating_add(1);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // This needs history data, so we use draw_with_history
        Ok(())
    }
}
