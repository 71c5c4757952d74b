//! Help dialog listing all keyboard shortcuts

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Help overlay with the full key map
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

const BINDINGS: &[(&str, &str)] = &[
    ("j/k, ↓/↑", "Mover selección de fila"),
    ("g / G", "Primera / última fila"),
    ("n", "Generar N filas (0 o vacío limpia la tabla)"),
    ("a", "Agregar una fila"),
    ("d / Supr", "Borrar la fila seleccionada"),
    ("c", "Limpiar todo"),
    ("Enter / s", "Elegir servicio para la fila"),
    ("e", "Editar cantidad de la fila"),
    ("x", "Habilitar / deshabilitar descuento"),
    ("p", "Editar porcentaje de descuento"),
    ("w", "Guardar cotización en el historial"),
    ("v", "Ver historial de cotizaciones"),
    ("o", "Exportar cotización a CSV"),
    ("r", "Recargar catálogo de servicios"),
    ("?", "Esta ayuda"),
    ("q / Esc", "Salir"),
];

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_width = 60u16.min(area.width.saturating_sub(4));
        let popup_height = (BINDINGS.len() as u16 + 4).min(area.height.saturating_sub(4));
        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(keys, description)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<12}", keys),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*description),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Atajos de teclado ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
