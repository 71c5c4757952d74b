//! Service picker dialog component
//!
//! Lists the catalog entries with price and description so a row's
//! service can be selected.

use crate::action::Action;
use crate::component::Component;
use crate::model::{format_money, Catalog, ServiceId};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Service picker dialog
pub struct ServiceSelectorDialog {
    pub selected_index: usize,
    pub list_state: ListState,
}

impl Default for ServiceSelectorDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceSelectorDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected_index: 0,
            list_state,
        }
    }

    /// Position the cursor on the row's current service (or the top)
    pub fn open_for(&mut self, catalog: &Catalog, current: Option<ServiceId>) {
        self.selected_index = current
            .and_then(|id| catalog.services.iter().position(|s| s.id == id))
            .unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    /// Id of the highlighted catalog entry
    pub fn get_selected_id(&self, catalog: &Catalog) -> Option<ServiceId> {
        catalog.services.get(self.selected_index).map(|s| s.id)
    }

    fn select_next(&mut self, catalog_len: usize) {
        if catalog_len == 0 {
            return;
        }
        if self.selected_index < catalog_len - 1 {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    /// Draw the dialog over the given area
    pub fn draw_with_catalog(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        catalog: &Catalog,
    ) -> Result<()> {
        let popup_width = 70u16.min(area.width.saturating_sub(4));
        let popup_height = 20u16.min(area.height.saturating_sub(4));
        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(popup_area);

        let items: Vec<ListItem> = catalog
            .services
            .iter()
            .map(|s| {
                let mut spans = vec![
                    Span::styled(s.name.clone(), Style::default().fg(Color::White)),
                    Span::styled(
                        format!("  {}", format_money(s.price)),
                        Style::default().fg(Color::Green),
                    ),
                ];
                if !s.description.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", s.description),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Seleccionar servicio ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(
                " ↑/↓ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Navegar  "),
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Seleccionar  "),
            Span::styled(
                " Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Cancelar"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(help, chunks[1]);
        Ok(())
    }

    /// Key handling needs the catalog length, so it lives outside the trait
    pub fn handle_key_event_with_catalog(
        &mut self,
        key: KeyEvent,
        catalog: &Catalog,
    ) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter if !catalog.is_empty() => Some(Action::ConfirmModal),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next(catalog.len());
                None
            }
            _ => None,
        };
        Ok(action)
    }
}

impl Component for ServiceSelectorDialog {
    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // This needs the catalog, so we use draw_with_catalog
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceEntry;

    fn catalog() -> Catalog {
        Catalog {
            services: vec![
                ServiceEntry {
                    id: 10,
                    name: "Baño".to_string(),
                    price: 150.0,
                    description: String::new(),
                },
                ServiceEntry {
                    id: 20,
                    name: "Consulta".to_string(),
                    price: 100.0,
                    description: String::new(),
                },
            ],
        }
    }

    #[test]
    fn test_open_for_positions_on_current_service() {
        let catalog = catalog();
        let mut dialog = ServiceSelectorDialog::new();

        dialog.open_for(&catalog, Some(20));
        assert_eq!(dialog.selected_index, 1);
        assert_eq!(dialog.get_selected_id(&catalog), Some(20));

        dialog.open_for(&catalog, None);
        assert_eq!(dialog.selected_index, 0);
    }

    #[test]
    fn test_selection_stops_at_bounds() {
        let catalog = catalog();
        let mut dialog = ServiceSelectorDialog::new();

        dialog.select_prev();
        assert_eq!(dialog.selected_index, 0);

        dialog.select_next(catalog.len());
        dialog.select_next(catalog.len());
        assert_eq!(dialog.selected_index, 1);
    }
}
