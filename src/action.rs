//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state. Every quote mutation has its own named action,
//! so state logic stays decoupled from presentation.

use crate::model::ServiceId;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Row Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next row
    NextRow,
    /// Move to previous row
    PrevRow,
    /// Jump to first row
    FirstRow,
    /// Jump to last row
    LastRow,

    // ─────────────────────────────────────────────────────────────────────────
    // Table Mutations
    // ─────────────────────────────────────────────────────────────────────────
    /// Replace the table with n fresh rows (0 clears)
    GenerateRows(usize),
    /// Append one fresh row
    AddRow,
    /// Delete the selected row
    DeleteRow,
    /// Empty the table and reset the summary
    ClearAll,
    /// Assign a catalog service to the selected row
    SelectService(ServiceId),
    /// Set the selected row's quantity from raw input
    SetQuantity(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Discount
    // ─────────────────────────────────────────────────────────────────────────
    /// Flip the discount enable flag
    ToggleDiscount,
    /// Set the discount percentage from raw input
    SetDiscountPercent(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open the service picker for the selected row
    OpenServiceSelector,
    /// Open the quantity input for the selected row
    OpenQuantityInput,
    /// Open the row-count input
    OpenRowCountInput,
    /// Open the discount percentage input
    OpenDiscountInput,
    /// Open the saved quotations overlay
    OpenHistory,
    /// Open the keyboard shortcuts overlay
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
    /// Navigate up in modal
    ModalUp,
    /// Navigate down in modal
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────────────────
    /// Save the current quote to history
    SaveQuote,
    /// Export the current quote as a CSV file
    ExportCsv,
    /// Reload the catalog file from disk
    ReloadCatalog,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::GenerateRows(n) => write!(f, "GenerateRows({})", n),
            Action::AddRow => write!(f, "AddRow"),
            Action::DeleteRow => write!(f, "DeleteRow"),
            Action::ClearAll => write!(f, "ClearAll"),
            Action::SelectService(id) => write!(f, "SelectService({})", id),
            Action::SetQuantity(raw) => write!(f, "SetQuantity({})", raw),
            Action::ToggleDiscount => write!(f, "ToggleDiscount"),
            Action::SetDiscountPercent(raw) => write!(f, "SetDiscountPercent({})", raw),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenServiceSelector => write!(f, "OpenServiceSelector"),
            Action::OpenQuantityInput => write!(f, "OpenQuantityInput"),
            Action::OpenRowCountInput => write!(f, "OpenRowCountInput"),
            Action::OpenDiscountInput => write!(f, "OpenDiscountInput"),
            Action::OpenHistory => write!(f, "OpenHistory"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::SaveQuote => write!(f, "SaveQuote"),
            Action::ExportCsv => write!(f, "ExportCsv"),
            Action::ReloadCatalog => write!(f, "ReloadCatalog"),
        }
    }
}
