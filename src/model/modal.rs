//! Modal stack for managing overlays
//!
//! A single enum-based stack instead of one boolean flag per dialog.
//! Only the top modal receives input events.

/// Represents a modal overlay displayed on top of the quote screen
///
/// Text-input modals carry their edit buffer; dialogs with their own
/// navigation state (selection, scroll) own it in the component.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Catalog service picker for the selected row
    ServiceSelector,
    /// Quantity text input for the selected row
    QuantityInput { buffer: String },
    /// Row-count text input for regenerating the table
    RowCountInput { buffer: String },
    /// Discount percentage text input
    DiscountInput { buffer: String },
    /// Saved quotations overlay
    History,
    /// Keyboard shortcuts overlay
    Help,
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Help);

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_modal_stack_top_mut_edits_buffer() {
        let mut stack = ModalStack::new();
        stack.push(Modal::QuantityInput {
            buffer: String::new(),
        });

        if let Some(Modal::QuantityInput { buffer }) = stack.top_mut() {
            buffer.push('3');
        }

        assert_eq!(
            stack.top(),
            Some(&Modal::QuantityInput {
                buffer: "3".to_string()
            })
        );
    }
}
