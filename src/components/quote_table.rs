//! Quote table component - the main quotation screen
//!
//! Renders the line-item table with resolved prices and subtotals, plus the
//! summary panel (subtotal, discount, grand total). Owns row selection and
//! converts key presses into quote actions. When the quote has no rows the
//! table region is replaced by an empty-state hint.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_quote_layout;
use crate::model::{format_money, Catalog, Quote};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Quote table component, owns row selection state
pub struct QuoteTable {
    pub list_state: ListState,
}

impl Default for QuoteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteTable {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }

    /// Currently selected row index
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Select next row, wrapping at the end
    pub fn next(&mut self, row_count: usize) {
        if row_count == 0 {
            self.list_state.select(None);
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < row_count => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    /// Select previous row, wrapping at the start
    pub fn previous(&mut self, row_count: usize) {
        if row_count == 0 {
            self.list_state.select(None);
            return;
        }
        let prev = match self.list_state.selected() {
            Some(0) | None => row_count - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(prev));
    }

    pub fn select_first(&mut self, row_count: usize) {
        if row_count == 0 {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self, row_count: usize) {
        if row_count == 0 {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(row_count - 1));
        }
    }

    /// Keep the selection inside the table after rows were removed
    pub fn clamp_selection(&mut self, row_count: usize) {
        match self.list_state.selected() {
            _ if row_count == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(i) if i >= row_count => self.list_state.select(Some(row_count - 1)),
            Some(_) => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw the full quote screen
    pub fn draw_with_quote(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        quote: &Quote,
        catalog: &Catalog,
        status_message: Option<&str>,
    ) -> Result<()> {
        let layout = calculate_quote_layout(area, status_message.is_some());

        self.draw_header(frame, layout.header, quote);

        if quote.visible() {
            self.draw_table(frame, layout.table, quote, catalog);
        } else {
            self.draw_empty_state(frame, layout.table);
        }

        self.draw_summary(frame, layout.summary, quote, catalog);

        if let (Some(status_area), Some(message)) = (layout.status, status_message) {
            let status = Paragraph::new(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Green),
            )));
            frame.render_widget(status, status_area);
        }

        self.draw_help_bar(frame, layout.help);

        Ok(())
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, quote: &Quote) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "Cotización de servicios",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("({} filas)", quote.items.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, area);
    }

    fn draw_empty_state(&mut self, frame: &mut Frame, area: Rect) {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Sin filas.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Presiona "),
                Span::styled(
                    "n",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" para generar filas o "),
                Span::styled(
                    "a",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" para agregar una."),
            ]),
        ])
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(hint, area);
    }

    fn draw_table(&mut self, frame: &mut Frame, area: Rect, quote: &Quote, catalog: &Catalog) {
        // Service column grows with the longest catalog name
        let service_width = catalog
            .services
            .iter()
            .map(|s| s.name.width())
            .chain(std::iter::once("Servicio".width()))
            .max()
            .unwrap_or(10)
            .min(30);

        let header = format!(
            " {:<service_width$} │ {:>4} │ {:>12} │ {:>12} │ Descripción ",
            "Servicio",
            "Cant",
            "Precio",
            "Subtotal",
            service_width = service_width
        );

        let items: Vec<ListItem> = quote
            .items
            .iter()
            .map(|item| {
                let name = if item.service.is_some() {
                    item.service_name(catalog).to_string()
                } else {
                    "(sin servicio)".to_string()
                };
                let truncated = if name.width() > service_width {
                    let cut: String = name.chars().take(service_width.saturating_sub(1)).collect();
                    format!("{}…", cut)
                } else {
                    name
                };

                ListItem::new(Line::from(format!(
                    " {:<service_width$} │ {:>4} │ {:>12} │ {:>12} │ {}",
                    truncated,
                    item.quantity,
                    format_money(item.unit_price(catalog)),
                    format_money(item.subtotal(catalog)),
                    item.description(catalog),
                    service_width = service_width
                )))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(header)
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

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_summary(&self, frame: &mut Frame, area: Rect, quote: &Quote, catalog: &Catalog) {
        let discount_line = if quote.discount.enabled {
            Line::from(vec![
                Span::raw("Descuento: "),
                Span::styled(
                    format!("[x] {:.1}%", quote.discount.effective_percent()),
                    Style::default().fg(Color::Yellow),
                ),
            ])
        } else {
            Line::from(vec![
                Span::raw("Descuento: "),
                Span::styled("[ ] deshabilitado", Style::default().fg(Color::DarkGray)),
            ])
        };

        let content = vec![
            Line::from(vec![
                Span::raw("Subtotal:  "),
                Span::raw(format_money(quote.subtotal(catalog))),
            ]),
            discount_line,
            Line::from(vec![
                Span::raw("Total:     "),
                Span::styled(
                    format_money(quote.total(catalog)),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        let summary = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Resumen ")
                .title_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(summary, area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &'static str| {
            Span::styled(
                format!(" {} ", k),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let help = Paragraph::new(Line::from(vec![
            key("n"),
            Span::raw("Generar"),
            key("a"),
            Span::raw("Agregar"),
            key("d"),
            Span::raw("Borrar"),
            key("Enter"),
            Span::raw("Servicio"),
            key("e"),
            Span::raw("Cantidad"),
            key("x"),
            Span::raw("Descuento"),
            key("?"),
            Span::raw("Ayuda"),
            key("q"),
            Span::raw("Salir"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

impl Component for QuoteTable {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),
            KeyCode::Char('n') => Some(Action::OpenRowCountInput),
            KeyCode::Char('a') => Some(Action::AddRow),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteRow),
            KeyCode::Char('c') => Some(Action::ClearAll),
            KeyCode::Enter | KeyCode::Char('s') => Some(Action::OpenServiceSelector),
            KeyCode::Char('e') => Some(Action::OpenQuantityInput),
            KeyCode::Char('x') => Some(Action::ToggleDiscount),
            KeyCode::Char('p') => Some(Action::OpenDiscountInput),
            KeyCode::Char('w') => Some(Action::SaveQuote),
            KeyCode::Char('o') => Some(Action::ExportCsv),
            KeyCode::Char('v') => Some(Action::OpenHistory),
            KeyCode::Char('r') => Some(Action::ReloadCatalog),
            KeyCode::Char('?') | KeyCode::Char('h') => Some(Action::OpenHelp),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // This needs the quote and catalog, so we use draw_with_quote
        Ok(())
    }
}
