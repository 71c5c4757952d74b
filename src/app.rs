//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that delegates event handling and rendering to child
//! components. All quote mutations funnel through `update`, so the
//! model invariants hold after every action.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    HelpDialog, HistoryDialog, QuitDialog, QuoteTable, ServiceSelectorDialog,
};
use crate::config::Config;
use crate::model::history::{QuoteHistory, QuoteHistoryEntry};
use crate::model::modal::{Modal, ModalStack};
use crate::model::quote::parse_row_count;
use crate::model::{Catalog, Quote};
use crate::services;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════════
// Error Message Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// User-friendly message for a catalog that could not be loaded
fn catalog_error_message(path: &std::path::Path, cause: &str) -> String {
    format!(
        "Could not load the service catalog:\n  {}\n\n\
         {}\n\n\
         The catalog is a JSON or YAML file with a `services` list, e.g.\n\
         {{\"services\": [{{\"id\": 1, \"name\": \"Consulta\", \"price\": 100.0}}]}}\n\n\
         Press 'r' to retry, or 'q' to quit.",
        path.display(),
        cause
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// The quotation being built
    pub quote: Quote,

    /// Read-only service catalog
    pub catalog: Catalog,

    /// Where the catalog was loaded from (for reloads)
    pub catalog_path: PathBuf,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Saved quotations, newest first
    pub history: Vec<QuoteHistoryEntry>,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display (replaces the quote screen)
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub quote_table: QuoteTable,
    pub service_selector: ServiceSelectorDialog,
    pub history_dialog: HistoryDialog,
    pub help_dialog: HelpDialog,
    pub quit_dialog: QuitDialog,
}

impl App {
    /// Create a new App instance
    ///
    /// `catalog_override` comes from the command line and takes priority
    /// over the configured catalog path; it is persisted for next time.
    pub fn new(catalog_override: Option<String>) -> App {
        let mut config = Config::load().unwrap_or_default();
        if let Some(path) = catalog_override {
            config.catalog_path = path;
            let _ = config.save();
        }

        let catalog_path = PathBuf::from(&config.catalog_path);

        let mut app = App {
            quote: Quote::new(),
            catalog: Catalog::default(),
            catalog_path,
            modals: ModalStack::new(),
            history: QuoteHistory::load(),
            should_quit: false,
            error: None,
            status_message: None,
            quote_table: QuoteTable::new(),
            service_selector: ServiceSelectorDialog::new(),
            history_dialog: HistoryDialog::default(),
            help_dialog: HelpDialog::default(),
            quit_dialog: QuitDialog,
        };

        app.reload_catalog();
        app
    }

    /// (Re)load the catalog file from disk
    fn reload_catalog(&mut self) {
        match services::load_catalog(&self.catalog_path) {
            Ok(catalog) => {
                self.error = None;
                self.status_message = Some(format!(
                    "Catálogo cargado: {} servicios",
                    catalog.len()
                ));
                self.catalog = catalog;
            }
            Err(cause) => {
                self.error = Some(catalog_error_message(&self.catalog_path, &cause));
            }
        }
    }

    /// Save the current quote to history, capped at 100 entries
    fn save_quote(&mut self) {
        if !self.quote.visible() {
            self.status_message = Some("Nada que guardar: la cotización está vacía".to_string());
            return;
        }

        let entry = QuoteHistoryEntry::from_quote(&self.quote, &self.catalog);
        let total = entry.total;
        QuoteHistory::push(&mut self.history, entry);

        match QuoteHistory::save(&self.history) {
            Ok(()) => {
                self.status_message = Some(format!(
                    "Cotización guardada ({})",
                    crate::model::format_money(total)
                ));
            }
            Err(e) => self.error = Some(e),
        }
    }

    /// Export the current quote as a CSV file in the working directory
    fn export_csv(&mut self) {
        if !self.quote.visible() {
            self.status_message = Some("Nada que exportar: la cotización está vacía".to_string());
            return;
        }

        let path = services::default_export_path();
        match services::export_quote(&path, &self.quote, &self.catalog) {
            Ok(()) => {
                self.status_message = Some(format!("Exportado a {}", path.display()));
            }
            Err(e) => self.error = Some(e),
        }
    }

    /// Handle key events when in error state (e.g., missing catalog)
    fn handle_error_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('r') => Ok(Some(Action::ReloadCatalog)),
            KeyCode::Char('q') | KeyCode::Esc => Ok(Some(Action::ForceQuit)),
            _ => Ok(None),
        }
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::ServiceSelector => self
                .service_selector
                .handle_key_event_with_catalog(key, &self.catalog),
            Modal::QuantityInput { buffer } => {
                let action = match key.code {
                    KeyCode::Esc => Some(Action::CloseModal),
                    KeyCode::Enter => Some(Action::SetQuantity(buffer.clone())),
                    KeyCode::Backspace => {
                        if let Some(Modal::QuantityInput { buffer }) = self.modals.top_mut() {
                            buffer.pop();
                        }
                        None
                    }
                    KeyCode::Char(c) => {
                        if let Some(Modal::QuantityInput { buffer }) = self.modals.top_mut() {
                            buffer.push(c);
                        }
                        None
                    }
                    _ => None,
                };
                Ok(action)
            }
            Modal::RowCountInput { buffer } => {
                let action = match key.code {
                    KeyCode::Esc => Some(Action::CloseModal),
                    KeyCode::Enter => Some(Action::GenerateRows(parse_row_count(buffer))),
                    KeyCode::Backspace => {
                        if let Some(Modal::RowCountInput { buffer }) = self.modals.top_mut() {
                            buffer.pop();
                        }
                        None
                    }
                    KeyCode::Char(c) => {
                        if let Some(Modal::RowCountInput { buffer }) = self.modals.top_mut() {
                            buffer.push(c);
                        }
                        None
                    }
                    _ => None,
                };
                Ok(action)
            }
            Modal::DiscountInput { buffer } => {
                let action = match key.code {
                    KeyCode::Esc => Some(Action::CloseModal),
                    KeyCode::Enter => Some(Action::SetDiscountPercent(buffer.clone())),
                    KeyCode::Backspace => {
                        if let Some(Modal::DiscountInput { buffer }) = self.modals.top_mut() {
                            buffer.pop();
                        }
                        None
                    }
                    KeyCode::Char(c) => {
                        if let Some(Modal::DiscountInput { buffer }) = self.modals.top_mut() {
                            buffer.push(c);
                        }
                        None
                    }
                    _ => None,
                };
                Ok(action)
            }
            Modal::History => self.history_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::ServiceSelector => {
                self.service_selector
                    .draw_with_catalog(frame, area, &self.catalog)?;
            }
            Modal::QuantityInput { buffer } => {
                self.draw_input_modal(frame, area, " Cantidad ", buffer)?;
            }
            Modal::RowCountInput { buffer } => {
                self.draw_input_modal(frame, area, " Número de filas ", buffer)?;
            }
            Modal::DiscountInput { buffer } => {
                self.draw_input_modal(frame, area, " Descuento % ", buffer)?;
            }
            Modal::History => {
                self.history_dialog
                    .draw_with_history(frame, area, &self.history)?;
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }

    /// Small single-line text input popup shared by the numeric modals
    fn draw_input_modal(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        buffer: &str,
    ) -> Result<()> {
        use crate::components::centered_popup;
        use ratatui::widgets::Clear;

        let popup_area = centered_popup(area, 40, 8);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("> {}_", buffer),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Aceptar  "),
                Span::styled(
                    " Esc ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancelar"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(title.to_string())
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }

    fn draw_error_screen(&self, frame: &mut Frame, area: Rect, message: &str) {
        let lines: Vec<Line> = message.lines().map(|l| Line::from(l.to_string())).collect();
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(paragraph, area);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Catalog errors replace the quote screen until resolved
        if self.error.is_some() && self.modals.is_empty() {
            return self.handle_error_key_event(key);
        }

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.quote_table.handle_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {}
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Row Navigation (delegate to QuoteTable)
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow => self.quote_table.next(self.quote.items.len()),
            Action::PrevRow => self.quote_table.previous(self.quote.items.len()),
            Action::FirstRow => self.quote_table.select_first(self.quote.items.len()),
            Action::LastRow => self.quote_table.select_last(self.quote.items.len()),

            // ─────────────────────────────────────────────────────────────────
            // Table Mutations
            // ─────────────────────────────────────────────────────────────────
            Action::GenerateRows(n) => {
                if matches!(self.modals.top(), Some(Modal::RowCountInput { .. })) {
                    self.modals.pop();
                }
                self.quote.generate_rows(n);
                self.quote_table.select_first(self.quote.items.len());
            }
            Action::AddRow => {
                let index = self.quote.add_row();
                self.quote_table.list_state.select(Some(index));
            }
            Action::DeleteRow => {
                if let Some(index) = self.quote_table.selected() {
                    self.quote.delete_row(index);
                    self.quote_table.clamp_selection(self.quote.items.len());
                }
            }
            Action::ClearAll => {
                self.quote.clear_all();
                self.quote_table.clamp_selection(0);
            }
            Action::SelectService(id) => {
                if let Some(index) = self.quote_table.selected() {
                    self.quote.set_service(index, id);
                }
            }
            Action::SetQuantity(raw) => {
                if matches!(self.modals.top(), Some(Modal::QuantityInput { .. })) {
                    self.modals.pop();
                }
                if let Some(index) = self.quote_table.selected() {
                    self.quote.set_quantity(index, &raw);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Discount
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleDiscount => {
                let enabled = !self.quote.discount.enabled;
                self.quote.set_discount_enabled(enabled);
            }
            Action::SetDiscountPercent(raw) => {
                if matches!(self.modals.top(), Some(Modal::DiscountInput { .. })) {
                    self.modals.pop();
                }
                self.quote.set_discount_percent(&raw);
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenServiceSelector => {
                if self.catalog.is_empty() {
                    self.status_message = Some("El catálogo no tiene servicios".to_string());
                } else if let Some(row) = self.quote_table.selected() {
                    let current = self.quote.items.get(row).and_then(|item| item.service);
                    self.service_selector.open_for(&self.catalog, current);
                    self.modals.push(Modal::ServiceSelector);
                }
            }
            Action::OpenQuantityInput => {
                if let Some(row) = self.quote_table.selected() {
                    let buffer = self
                        .quote
                        .items
                        .get(row)
                        .map(|item| item.quantity.to_string())
                        .unwrap_or_default();
                    self.modals.push(Modal::QuantityInput { buffer });
                }
            }
            Action::OpenRowCountInput => {
                self.modals.push(Modal::RowCountInput {
                    buffer: String::new(),
                });
            }
            Action::OpenDiscountInput => {
                // The percentage input is only active while the discount is on
                if self.quote.discount.enabled {
                    self.modals.push(Modal::DiscountInput {
                        buffer: String::new(),
                    });
                } else {
                    self.status_message =
                        Some("Habilita el descuento primero ('x')".to_string());
                }
            }
            Action::OpenHistory => {
                self.history_dialog.reset();
                self.modals.push(Modal::History);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => {
                if let Some(modal) = self.modals.top().cloned() {
                    match modal {
                        Modal::QuitConfirm => {
                            self.should_quit = true;
                        }
                        Modal::ServiceSelector => {
                            let selected = self.service_selector.get_selected_id(&self.catalog);
                            self.modals.pop();
                            if let Some(id) = selected {
                                return Ok(Some(Action::SelectService(id)));
                            }
                        }
                        _ => {}
                    }
                }
            }
            Action::ModalUp => {
                if matches!(self.modals.top(), Some(Modal::History)) {
                    self.history_dialog.update(Action::ModalUp)?;
                }
            }
            Action::ModalDown => {
                if matches!(self.modals.top(), Some(Modal::History)) {
                    // Clamp before incrementing
                    let max = self.history.len().saturating_sub(1);
                    if self.history_dialog.selected_index < max {
                        self.history_dialog.update(Action::ModalDown)?;
                    }
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Persistence
            // ─────────────────────────────────────────────────────────────────
            Action::SaveQuote => self.save_quote(),
            Action::ExportCsv => self.export_csv(),
            Action::ReloadCatalog => self.reload_catalog(),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        if let Some(message) = self.error.clone() {
            if self.modals.is_empty() {
                self.draw_error_screen(frame, area, &message);
                return Ok(());
            }
        }

        self.quote_table.draw_with_quote(
            frame,
            area,
            &self.quote,
            &self.catalog,
            self.status_message.as_deref(),
        )?;

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }

        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceEntry;

    fn test_app() -> App {
        App {
            quote: Quote::new(),
            catalog: Catalog {
                services: vec![
                    ServiceEntry {
                        id: 1,
                        name: "Consulta general".to_string(),
                        price: 100.0,
                        description: String::new(),
                    },
                    ServiceEntry {
                        id: 2,
                        name: "Cirugía menor".to_string(),
                        price: 250.0,
                        description: String::new(),
                    },
                ],
            },
            catalog_path: PathBuf::from("services.json"),
            modals: ModalStack::new(),
            history: Vec::new(),
            should_quit: false,
            error: None,
            status_message: None,
            quote_table: QuoteTable::new(),
            service_selector: ServiceSelectorDialog::new(),
            history_dialog: HistoryDialog::default(),
            help_dialog: HelpDialog::default(),
            quit_dialog: QuitDialog,
        }
    }

    /// Drive an action through the same loop as main, including follow-ups
    fn dispatch(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    #[test]
    fn test_generate_rows_selects_first_row() {
        let mut app = test_app();
        dispatch(&mut app, Action::GenerateRows(3));

        assert_eq!(app.quote.items.len(), 3);
        assert_eq!(app.quote_table.selected(), Some(0));
        assert!(app.quote.visible());
    }

    #[test]
    fn test_generate_zero_rows_hides_table() {
        let mut app = test_app();
        dispatch(&mut app, Action::GenerateRows(2));
        dispatch(&mut app, Action::GenerateRows(0));

        assert!(!app.quote.visible());
        assert_eq!(app.quote_table.selected(), None);
    }

    #[test]
    fn test_add_row_selects_new_row() {
        let mut app = test_app();
        dispatch(&mut app, Action::AddRow);
        dispatch(&mut app, Action::AddRow);

        assert_eq!(app.quote.items.len(), 2);
        assert_eq!(app.quote_table.selected(), Some(1));
    }

    #[test]
    fn test_delete_last_row_clears_selection_and_discount() {
        let mut app = test_app();
        dispatch(&mut app, Action::AddRow);
        dispatch(&mut app, Action::ToggleDiscount);
        dispatch(&mut app, Action::SetDiscountPercent("25".to_string()));

        dispatch(&mut app, Action::DeleteRow);

        assert!(!app.quote.visible());
        assert_eq!(app.quote_table.selected(), None);
        assert!(!app.quote.discount.enabled);
        assert_eq!(app.quote.discount.percent, 0.0);
    }

    #[test]
    fn test_service_selector_confirm_assigns_service() {
        let mut app = test_app();
        dispatch(&mut app, Action::AddRow);
        dispatch(&mut app, Action::OpenServiceSelector);
        assert_eq!(app.modals.top(), Some(&Modal::ServiceSelector));

        // Catalog is unsorted in the fixture; index 0 is "Consulta general"
        dispatch(&mut app, Action::ConfirmModal);

        assert!(app.modals.is_empty());
        assert_eq!(app.quote.items[0].service, Some(1));
    }

    #[test]
    fn test_set_quantity_normalizes_junk_input() {
        let mut app = test_app();
        dispatch(&mut app, Action::AddRow);
        dispatch(&mut app, Action::SetQuantity("-5".to_string()));
        assert_eq!(app.quote.items[0].quantity, 1);

        dispatch(&mut app, Action::SetQuantity("4".to_string()));
        assert_eq!(app.quote.items[0].quantity, 4);
    }

    #[test]
    fn test_discount_input_requires_enabled_discount() {
        let mut app = test_app();
        dispatch(&mut app, Action::AddRow);

        dispatch(&mut app, Action::OpenDiscountInput);
        assert!(app.modals.is_empty());
        assert!(app.status_message.is_some());

        dispatch(&mut app, Action::ToggleDiscount);
        dispatch(&mut app, Action::OpenDiscountInput);
        assert!(matches!(
            app.modals.top(),
            Some(Modal::DiscountInput { .. })
        ));
    }

    #[test]
    fn test_worked_example_total() {
        let mut app = test_app();
        dispatch(&mut app, Action::GenerateRows(2));
        dispatch(&mut app, Action::SelectService(1));
        dispatch(&mut app, Action::SetQuantity("2".to_string()));
        dispatch(&mut app, Action::NextRow);
        dispatch(&mut app, Action::SelectService(2));
        dispatch(&mut app, Action::ToggleDiscount);
        dispatch(&mut app, Action::SetDiscountPercent("10".to_string()));

        assert_eq!(app.quote.subtotal(&app.catalog), 450.0);
        assert_eq!(app.quote.total(&app.catalog), 405.0);
    }

    #[test]
    fn test_save_empty_quote_is_a_noop() {
        let mut app = test_app();
        dispatch(&mut app, Action::SaveQuote);

        assert!(app.history.is_empty());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_quit_dialog_flow() {
        let mut app = test_app();
        dispatch(&mut app, Action::OpenQuitDialog);
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));

        dispatch(&mut app, Action::CloseModal);
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);

        dispatch(&mut app, Action::OpenQuitDialog);
        dispatch(&mut app, Action::ConfirmModal);
        assert!(app.should_quit);
    }
}
