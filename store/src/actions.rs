//! Action dispatch over the shared store.
//!
//! Every mutation of the store goes through one of these functions, which
//! applies the change and notifies exactly one change topic.

use crate::snapshot::Snapshot;
use crate::store::{ChangeTopic, SharedStore};

/// Replaces the dataset snapshot and notifies `Data` subscribers.
pub fn load_snapshot(store: &SharedStore, snapshot: Snapshot) {
    let mut store = store.borrow_mut();
    store.set_snapshot(snapshot);
    store.notify(ChangeTopic::Data);
}

/// Selects a country and notifies `Country` subscribers.
pub fn change_selected_country(store: &SharedStore, country: &str) {
    let mut store = store.borrow_mut();
    store.set_selected_country(Some(country.to_string()));
    store.notify(ChangeTopic::Country);
}

/// Clears the country selection and notifies `Country` subscribers.
pub fn clear_selected_country(store: &SharedStore) {
    let mut store = store.borrow_mut();
    store.set_selected_country(None);
    store.notify(ChangeTopic::Country);
}

/// Selects an indicator and notifies `Indicator` subscribers.
pub fn change_indicator(store: &SharedStore, indicator: &str) {
    let mut store = store.borrow_mut();
    store.set_selected_indicator(indicator.to_string());
    store.notify(ChangeTopic::Indicator);
}

/// Selects a year and notifies `Year` subscribers.
pub fn change_year(store: &SharedStore, year: i32) {
    let mut store = store.borrow_mut();
    store.set_selected_year(year);
    store.notify(ChangeTopic::Year);
}

/// Flips the legend visibility flag and notifies `Legend` subscribers.
pub fn toggle_legend(store: &SharedStore) {
    let mut store = store.borrow_mut();
    store.flip_legend();
    store.notify(ChangeTopic::Legend);
}
