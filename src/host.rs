//! Host state boundary
//!
//! The host application owns the widget's configuration and persisted value.
//! That binding is modeled as two narrow interfaces, a read port and a
//! write port, passed into the widget instead of a global binding, keeping
//! the synchronization logic testable with recording fakes.
//!
//! The widget is single-threaded (everything runs on the UI thread), so the
//! standard cell implementation is `Rc<RefCell<…>>` shared between the host
//! and the widget.

use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

// ─────────────────────────────────────────────────────────────────────────────
// Port Traits
// ─────────────────────────────────────────────────────────────────────────────

/// Read access to a host-owned string cell. `None` models an undefined value.
pub trait ReadPort {
    fn get(&self) -> Option<String>;
}

/// Write access to a host-owned string cell.
pub trait WritePort {
    fn set(&mut self, value: String);
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared Cell
// ─────────────────────────────────────────────────────────────────────────────

/// A host-owned state cell shared with the widget.
///
/// Clones are handles to the same underlying value; the host keeps one side
/// and hands the other to [`HostBindings`].
#[derive(Debug, Default)]
pub struct SharedCell<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for SharedCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone> SharedCell<T> {
    /// Create a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }

    /// Replace the current value.
    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
    }
}

impl ReadPort for SharedCell<Option<String>> {
    fn get(&self) -> Option<String> {
        self.inner.borrow().clone()
    }
}

impl WritePort for SharedCell<Option<String>> {
    fn set(&mut self, value: String) {
        debug!("host cell written ({} bytes)", value.len());
        *self.inner.borrow_mut() = Some(value);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host Bindings
// ─────────────────────────────────────────────────────────────────────────────

/// The three host state cells a `MarkdownPad` instance is bound to.
#[derive(Debug, Clone, Default)]
pub struct HostBindings {
    /// Seeds and reseeds the draft. Read-only to the widget.
    pub default_value: SharedCell<Option<String>>,
    /// The committed value. Written only by the debounced publisher.
    pub value: SharedCell<Option<String>>,
    /// Theme selector string, `"dark"` or anything else for light. Read-only
    /// to the widget, styling only.
    pub theme: SharedCell<Option<String>>,
}

impl HostBindings {
    /// Bindings with an initial committed value and default, for hosts that
    /// construct everything up front.
    pub fn with_values(value: Option<String>, default_value: Option<String>) -> Self {
        Self {
            default_value: SharedCell::new(default_value),
            value: SharedCell::new(value),
            theme: SharedCell::new(None),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
