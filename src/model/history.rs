//! Saved quotation history persistence

use super::catalog::Catalog;
use super::quote::Quote;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// A resolved line of a saved quotation
///
/// The catalog can change between sessions, so saved entries carry the
/// resolved name and price instead of a service id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteLine {
    pub service: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// A single saved quotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteHistoryEntry {
    pub timestamp: DateTime<Local>,
    pub lines: Vec<QuoteLine>,
    pub subtotal: f64,
    pub discount_percent: f64,
    pub total: f64,
}

impl QuoteHistoryEntry {
    /// Snapshot the current quote with all derived fields resolved
    pub fn from_quote(quote: &Quote, catalog: &Catalog) -> Self {
        let lines = quote
            .items
            .iter()
            .map(|item| QuoteLine {
                service: item.service_name(catalog).to_string(),
                quantity: item.quantity,
                unit_price: item.unit_price(catalog),
                subtotal: item.subtotal(catalog),
            })
            .collect();

        Self {
            timestamp: Local::now(),
            lines,
            subtotal: quote.subtotal(catalog),
            discount_percent: quote.discount.effective_percent(),
            total: quote.total(catalog),
        }
    }

    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Wrapper for persisting quote history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteHistory {
    pub entries: Vec<QuoteHistoryEntry>,
}

impl QuoteHistory {
    /// Most recent entries kept; older ones fall off the end
    pub const MAX_ENTRIES: usize = 100;

    /// Insert an entry at the front, newest first, enforcing the cap
    pub fn push(entries: &mut Vec<QuoteHistoryEntry>, entry: QuoteHistoryEntry) {
        entries.insert(0, entry);
        entries.truncate(Self::MAX_ENTRIES);
    }

    fn history_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".cotiza-tui"))
    }

    fn history_path() -> Option<PathBuf> {
        Self::history_dir().map(|dir| dir.join("history.json"))
    }

    pub fn load() -> Vec<QuoteHistoryEntry> {
        let history_path = match Self::history_path() {
            Some(p) => p,
            None => return Vec::new(),
        };

        if !history_path.exists() {
            return Vec::new();
        }

        let contents = match fs::read_to_string(&history_path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str::<QuoteHistory>(&contents) {
            Ok(history) => history.entries,
            Err(_) => Vec::new(),
        }
    }

    pub fn save(entries: &[QuoteHistoryEntry]) -> Result<(), String> {
        let history_dir = Self::history_dir().ok_or("Could not determine home directory")?;

        if !history_dir.exists() {
            fs::create_dir_all(&history_dir)
                .map_err(|e| format!("Failed to create history directory: {}", e))?;
        }

        let history_path = Self::history_path().ok_or("Could not determine history path")?;

        let history = QuoteHistory {
            entries: entries.to_vec(),
        };

        let json = serde_json::to_string_pretty(&history)
            .map_err(|e| format!("Failed to serialize history: {}", e))?;

        fs::write(&history_path, json)
            .map_err(|e| format!("Failed to write history file: {}", e))?;

        Ok(())
    }
}
