//! Quotation state - line items, discount, and derived totals
//!
//! This is the state the rest of the application observes. Every mutation
//! goes through the methods here so the two invariants hold after any
//! sequence of operations:
//! - the results region is visible exactly when at least one row exists
//!   (`visible()` is derived, so it cannot drift), and
//! - emptying the table also resets the discount.
//!
//! Totals are pure functions of the current state and are recomputed on
//! every render, so an edit can never leave a stale total on screen.

use super::catalog::{Catalog, ServiceId};

/// One row of the quotation: a selected service and a quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineItem {
    /// Selected catalog entry, if any. A row with no selection prices at 0.
    pub service: Option<ServiceId>,
    /// Always >= 1; enforced by `parse_quantity`
    pub quantity: u32,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            service: None,
            quantity: 1,
        }
    }
}

impl LineItem {
    /// Unit price resolved from the catalog; 0 when nothing is selected
    pub fn unit_price(&self, catalog: &Catalog) -> f64 {
        self.service
            .and_then(|id| catalog.get(id))
            .map(|s| s.price)
            .unwrap_or(0.0)
    }

    /// Description resolved from the catalog; empty when nothing is selected
    pub fn description<'a>(&self, catalog: &'a Catalog) -> &'a str {
        self.service
            .and_then(|id| catalog.get(id))
            .map(|s| s.description.as_str())
            .unwrap_or("")
    }

    /// Service name resolved from the catalog
    pub fn service_name<'a>(&self, catalog: &'a Catalog) -> &'a str {
        self.service
            .and_then(|id| catalog.get(id))
            .map(|s| s.name.as_str())
            .unwrap_or("")
    }

    pub fn subtotal(&self, catalog: &Catalog) -> f64 {
        self.unit_price(catalog) * f64::from(self.quantity)
    }
}

/// Discount configuration applied to the quote subtotal
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Discount {
    pub enabled: bool,
    pub percent: f64,
}

impl Discount {
    /// Percentage that actually applies: clamped to [0, 100], and 0
    /// whenever the discount is disabled
    pub fn effective_percent(&self) -> f64 {
        if self.enabled {
            self.percent.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// The quotation being built
#[derive(Debug, Default)]
pub struct Quote {
    pub items: Vec<LineItem>,
    pub discount: Discount,
}

impl Quote {
    pub fn new() -> Self {
        Self::default()
    }

    /// The results region is shown exactly when rows exist
    pub fn visible(&self) -> bool {
        !self.items.is_empty()
    }

    /// Empty the table and reset the discount
    pub fn clear_all(&mut self) {
        self.items.clear();
        self.discount = Discount::default();
    }

    /// Replace the table with `n` fresh rows. `n == 0` clears instead.
    pub fn generate_rows(&mut self, n: usize) {
        if n == 0 {
            self.clear_all();
            return;
        }
        self.items = vec![LineItem::default(); n];
    }

    /// Append one fresh row, returning its index
    pub fn add_row(&mut self) -> usize {
        self.items.push(LineItem::default());
        self.items.len() - 1
    }

    /// Remove a row. Emptying the table resets the discount as well.
    pub fn delete_row(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
        if self.items.is_empty() {
            self.clear_all();
        }
    }

    pub fn set_service(&mut self, index: usize, id: ServiceId) {
        if let Some(item) = self.items.get_mut(index) {
            item.service = Some(id);
        }
    }

    /// Set a row's quantity from raw user input (normalized, never fails)
    pub fn set_quantity(&mut self, index: usize, raw: &str) {
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = parse_quantity(raw);
        }
    }

    /// Enable or disable the discount. Disabling forces the stored
    /// percentage back to 0, matching the percentage input being cleared.
    pub fn set_discount_enabled(&mut self, enabled: bool) {
        self.discount.enabled = enabled;
        if !enabled {
            self.discount.percent = 0.0;
        }
    }

    /// Set the discount percentage from raw user input
    pub fn set_discount_percent(&mut self, raw: &str) {
        if self.discount.enabled {
            self.discount.percent = parse_percent(raw);
        }
    }

    /// Sum of all line subtotals
    pub fn subtotal(&self, catalog: &Catalog) -> f64 {
        self.items.iter().map(|item| item.subtotal(catalog)).sum()
    }

    /// Grand total with the effective discount applied, floored at 0
    pub fn total(&self, catalog: &Catalog) -> f64 {
        let subtotal = self.subtotal(catalog);
        let pct = self.discount.effective_percent();
        (subtotal - subtotal * pct / 100.0).max(0.0)
    }
}

/// Normalize a quantity input: non-numeric or < 1 coerces to 1
pub fn parse_quantity(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => n.min(i64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

/// Normalize a row-count input: non-numeric or < 1 means "clear all" (0)
pub fn parse_row_count(raw: &str) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => n as usize,
        _ => 0,
    }
}

/// Normalize a percentage input: non-numeric becomes 0, then clamped
pub fn parse_percent(raw: &str) -> f64 {
    let value = raw.trim().parse::<f64>().unwrap_or(0.0);
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::ServiceEntry;
    use crate::model::money::format_money;

    fn catalog() -> Catalog {
        Catalog {
            services: vec![
                ServiceEntry {
                    id: 1,
                    name: "Consulta general".to_string(),
                    price: 100.0,
                    description: "Revisión básica".to_string(),
                },
                ServiceEntry {
                    id: 2,
                    name: "Cirugía menor".to_string(),
                    price: 250.0,
                    description: "Procedimiento ambulatorio".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_generate_rows_creates_fresh_rows() {
        let mut quote = Quote::new();
        quote.generate_rows(3);

        assert_eq!(quote.items.len(), 3);
        for item in &quote.items {
            assert_eq!(item.quantity, 1);
            assert!(item.service.is_none());
        }
        assert!(quote.visible());
    }

    #[test]
    fn test_generate_rows_subtotal_equals_unit_price() {
        let catalog = catalog();
        let mut quote = Quote::new();
        quote.generate_rows(2);
        quote.set_service(0, 1);
        quote.set_service(1, 2);

        // Fresh rows have quantity 1, so each subtotal is the unit price
        assert_eq!(quote.items[0].subtotal(&catalog), 100.0);
        assert_eq!(quote.items[1].subtotal(&catalog), 250.0);
    }

    #[test]
    fn test_generate_zero_rows_clears() {
        let mut quote = Quote::new();
        quote.generate_rows(4);
        quote.set_discount_enabled(true);
        quote.set_discount_percent("15");

        quote.generate_rows(0);

        assert!(!quote.visible());
        assert!(quote.items.is_empty());
        assert_eq!(quote.discount, Discount::default());
    }

    #[test]
    fn test_generate_rows_replaces_existing() {
        let catalog = catalog();
        let mut quote = Quote::new();
        quote.generate_rows(2);
        quote.set_service(0, 2);
        quote.set_quantity(0, "5");

        quote.generate_rows(3);

        assert_eq!(quote.items.len(), 3);
        assert_eq!(quote.subtotal(&catalog), 0.0);
    }

    #[test]
    fn test_visible_tracks_row_count() {
        let mut quote = Quote::new();
        assert!(!quote.visible());

        quote.add_row();
        assert!(quote.visible());

        quote.add_row();
        quote.delete_row(0);
        assert!(quote.visible());

        quote.delete_row(0);
        assert!(!quote.visible());
    }

    #[test]
    fn test_total_without_discount_is_exact_sum() {
        let catalog = catalog();
        let mut quote = Quote::new();
        quote.generate_rows(2);
        quote.set_service(0, 1);
        quote.set_quantity(0, "2");
        quote.set_service(1, 2);

        assert_eq!(quote.subtotal(&catalog), 450.0);
        assert_eq!(quote.total(&catalog), 450.0);
    }

    #[test]
    fn test_total_with_discount() {
        let catalog = catalog();
        let mut quote = Quote::new();
        quote.generate_rows(2);
        quote.set_service(0, 1);
        quote.set_quantity(0, "2");
        quote.set_service(1, 2);
        quote.set_discount_enabled(true);
        quote.set_discount_percent("10");

        // 100*2 + 250*1 = 450, minus 10% = 405
        assert_eq!(quote.total(&catalog), 405.0);
        assert_eq!(format_money(quote.total(&catalog)), "$405.00");
    }

    #[test]
    fn test_discount_percent_clamped() {
        let catalog = catalog();
        let mut quote = Quote::new();
        quote.add_row();
        quote.set_service(0, 1);
        quote.set_discount_enabled(true);

        quote.set_discount_percent("150");
        assert_eq!(quote.discount.effective_percent(), 100.0);
        assert_eq!(quote.total(&catalog), 0.0);

        quote.set_discount_percent("-20");
        assert_eq!(quote.discount.effective_percent(), 0.0);
        assert_eq!(quote.total(&catalog), 100.0);
    }

    #[test]
    fn test_disabled_discount_has_no_effect() {
        let catalog = catalog();
        let mut quote = Quote::new();
        quote.add_row();
        quote.set_service(0, 2);
        quote.set_discount_enabled(true);
        quote.set_discount_percent("50");
        quote.set_discount_enabled(false);

        // Disabling also resets the stored percentage
        assert_eq!(quote.discount.percent, 0.0);
        assert_eq!(quote.total(&catalog), 250.0);
    }

    #[test]
    fn test_percent_ignored_while_disabled() {
        let mut quote = Quote::new();
        quote.add_row();
        quote.set_discount_percent("30");
        assert_eq!(quote.discount.percent, 0.0);
    }

    #[test]
    fn test_deleting_last_row_resets_discount() {
        let mut quote = Quote::new();
        quote.add_row();
        quote.set_discount_enabled(true);
        quote.set_discount_percent("25");

        quote.delete_row(0);

        assert!(!quote.visible());
        assert_eq!(quote.discount, Discount::default());
    }

    #[test]
    fn test_delete_out_of_range_is_ignored() {
        let mut quote = Quote::new();
        quote.generate_rows(2);
        quote.delete_row(5);
        assert_eq!(quote.items.len(), 2);
    }

    #[test]
    fn test_unselected_service_prices_at_zero() {
        let catalog = catalog();
        let mut quote = Quote::new();
        quote.add_row();
        quote.set_quantity(0, "7");

        assert_eq!(quote.items[0].unit_price(&catalog), 0.0);
        assert_eq!(quote.items[0].description(&catalog), "");
        assert_eq!(quote.total(&catalog), 0.0);
    }

    #[test]
    fn test_edit_updates_row_derived_fields() {
        let catalog = catalog();
        let mut quote = Quote::new();
        quote.add_row();
        quote.set_service(0, 2);
        quote.set_quantity(0, "3");

        let item = &quote.items[0];
        assert_eq!(item.unit_price(&catalog), 250.0);
        assert_eq!(item.description(&catalog), "Procedimiento ambulatorio");
        assert_eq!(item.subtotal(&catalog), 750.0);
    }

    #[test]
    fn test_parse_quantity_normalization() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" 12 "), 12);
        assert_eq!(parse_quantity("-5"), 1);
        assert_eq!(parse_quantity("0"), 1);
        assert_eq!(parse_quantity("abc"), 1);
        assert_eq!(parse_quantity(""), 1);
    }

    #[test]
    fn test_parse_row_count_normalization() {
        assert_eq!(parse_row_count("4"), 4);
        assert_eq!(parse_row_count("0"), 0);
        assert_eq!(parse_row_count("-2"), 0);
        assert_eq!(parse_row_count(""), 0);
        assert_eq!(parse_row_count("x"), 0);
    }

    #[test]
    fn test_parse_percent_normalization() {
        assert_eq!(parse_percent("10"), 10.0);
        assert_eq!(parse_percent("10.5"), 10.5);
        assert_eq!(parse_percent("120"), 100.0);
        assert_eq!(parse_percent("-3"), 0.0);
        assert_eq!(parse_percent("junk"), 0.0);
    }
}
