//! Change notification between record editors and record lists.
//!
//! # Responsibility
//! - Let an editor tell any number of list views to refresh, without the
//!   views knowing about each other or about the editor.
//!
//! # Invariants
//! - Subscribers are notified in subscription order, exactly once per
//!   `notify_all`, before it returns.
//! - There is no unsubscribe; a notifier lives as long as one edit session.
//! - Everything here is single-threaded (`Rc`, `RefCell`).

use crate::dao::Dao;
use crate::service::entity_service::EntityService;
use log::{debug, warn};
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

/// Subscriber role of the change-notification protocol.
///
/// Implementations re-read their data (typically `find_all`) and replace
/// what they display. Calling it repeatedly must be harmless.
pub trait DataChangeListener {
    fn on_data_changed(&self);
}

/// Ordered subscriber list owned by one data producer.
#[derive(Default)]
pub struct ChangeNotifier<'a> {
    listeners: Vec<Rc<dyn DataChangeListener + 'a>>,
}

impl<'a> ChangeNotifier<'a> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Appends a subscriber; it is notified after all earlier ones.
    pub fn subscribe(&mut self, listener: Rc<dyn DataChangeListener + 'a>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Calls every subscriber once, in subscription order.
    pub fn notify_all(&self) {
        debug!(
            "event=data_changed module=notify status=start listeners={}",
            self.listeners.len()
        );
        for listener in &self.listeners {
            listener.on_data_changed();
        }
    }
}

/// List view state that refreshes itself from a service on notification.
pub struct RecordList<'a, D: Dao> {
    service: &'a EntityService<D>,
    rows: RefCell<Vec<D::Entity>>,
    last_error: RefCell<Option<String>>,
    refresh_count: Cell<usize>,
}

impl<'a, D: Dao> RecordList<'a, D> {
    /// Creates an empty list; call `refresh` to load it.
    pub fn new(service: &'a EntityService<D>) -> Self {
        Self {
            service,
            rows: RefCell::new(Vec::new()),
            last_error: RefCell::new(None),
            refresh_count: Cell::new(0),
        }
    }

    /// Replaces displayed rows with the current `find_all` result.
    ///
    /// On failure the previous rows stay displayed and the message is kept
    /// in `last_error`.
    pub fn refresh(&self) {
        self.refresh_count.set(self.refresh_count.get() + 1);
        match self.service.find_all() {
            Ok(rows) => {
                *self.rows.borrow_mut() = rows;
                *self.last_error.borrow_mut() = None;
            }
            Err(err) => {
                warn!("event=list_refresh module=notify status=error error={err}");
                *self.last_error.borrow_mut() = Some(err.to_string());
            }
        }
    }

    pub fn rows(&self) -> Ref<'_, Vec<D::Entity>> {
        self.rows.borrow()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    /// Number of refreshes performed, including failed ones.
    ///
    /// Diagnostic counter for collaborators that want to confirm a view
    /// reacted to a mutation (for example to show a "last updated" marker);
    /// it has no effect on the displayed rows.
    pub fn refresh_count(&self) -> usize {
        self.refresh_count.get()
    }
}

impl<D: Dao> DataChangeListener for RecordList<'_, D> {
    fn on_data_changed(&self) {
        self.refresh();
    }
}
