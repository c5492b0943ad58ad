use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::snapshot::Snapshot;

/// The store is shared between the view and the widgets on the UI thread.
pub type SharedStore = Rc<RefCell<Store>>;

/// The change topics a subscriber can observe. Every mutation notifies
/// exactly one topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTopic {
    /// The dataset snapshot was replaced.
    Data,
    /// The selected country changed.
    Country,
    /// The selected indicator changed.
    Indicator,
    /// The selected year changed.
    Year,
    /// The legend visibility flag changed.
    Legend,
}

/// A live subscription to one change topic.
///
/// The store raises the subscription's pending flag on every notification;
/// `take` drains it. Dropping the handle unsubscribes: the store keeps only
/// a weak reference and prunes dead subscribers on the next notification.
#[derive(Debug)]
pub struct Subscription {
    topic: ChangeTopic,
    pending: Rc<Cell<bool>>,
}

impl Subscription {
    pub fn topic(&self) -> ChangeTopic {
        self.topic
    }

    /// Returns whether a notification arrived since the last call, and
    /// clears the flag.
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }
}

/// Single source of truth for the dataset snapshot and the selection state.
///
/// All mutation goes through the action functions in [`crate::actions`];
/// views observe changes through [`Subscription`] handles.
#[derive(Debug, Default)]
pub struct Store {
    snapshot: Snapshot,
    selected_country: Option<String>,
    selected_indicator: String,
    selected_year: i32,
    legend_visible: bool,
    subscribers: Vec<(ChangeTopic, Weak<Cell<bool>>)>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            legend_visible: true,
            ..Self::default()
        }
    }

    pub fn subscribe(&mut self, topic: ChangeTopic) -> Subscription {
        let pending = Rc::new(Cell::new(false));
        self.subscribers.push((topic, Rc::downgrade(&pending)));
        Subscription { topic, pending }
    }

    pub(crate) fn notify(&mut self, topic: ChangeTopic) {
        self.subscribers.retain(|(subscribed, pending)| {
            match pending.upgrade() {
                Some(pending) => {
                    if *subscribed == topic {
                        pending.set(true);
                    }
                    true
                }
                None => false,
            }
        });
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn selected_country(&self) -> Option<&str> {
        self.selected_country.as_deref()
    }

    pub fn selected_indicator(&self) -> &str {
        &self.selected_indicator
    }

    pub fn selected_year(&self) -> i32 {
        self.selected_year
    }

    pub fn legend_status(&self) -> bool {
        self.legend_visible
    }

    pub(crate) fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
    }

    pub(crate) fn set_selected_country(&mut self, country: Option<String>) {
        self.selected_country = country;
    }

    pub(crate) fn set_selected_indicator(&mut self, indicator: String) {
        self.selected_indicator = indicator;
    }

    pub(crate) fn set_selected_year(&mut self, year: i32) {
        self.selected_year = year;
    }

    pub(crate) fn flip_legend(&mut self) {
        self.legend_visible = !self.legend_visible;
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_receives_its_topic_only() {
        let mut store = Store::new();
        let on_year = store.subscribe(ChangeTopic::Year);
        let on_country = store.subscribe(ChangeTopic::Country);

        store.notify(ChangeTopic::Year);

        assert!(on_year.take());
        assert!(!on_country.take());
        // Drained: a second take sees nothing.
        assert!(!on_year.take());
    }

    #[test]
    fn test_notify_coalesces_until_taken() {
        let mut store = Store::new();
        let on_data = store.subscribe(ChangeTopic::Data);

        store.notify(ChangeTopic::Data);
        store.notify(ChangeTopic::Data);

        assert!(on_data.take());
        assert!(!on_data.take());
    }

    #[test]
    fn test_dropped_subscription_is_pruned() {
        let mut store = Store::new();
        let on_data = store.subscribe(ChangeTopic::Data);
        let on_year = store.subscribe(ChangeTopic::Year);
        assert_eq!(store.subscriber_count(), 2);

        drop(on_year);
        store.notify(ChangeTopic::Data);

        assert_eq!(store.subscriber_count(), 1);
        assert!(on_data.take());
    }

    #[test]
    fn test_defaults() {
        let store = Store::new();
        assert!(store.legend_status());
        assert!(store.selected_country().is_none());
        assert!(store.selected_indicator().is_empty());
        assert!(store.snapshot().is_empty());
    }
}
