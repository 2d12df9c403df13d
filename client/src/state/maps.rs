//! Dashboard map-list state.
//!
//! DESIGN
//! ======
//! `items == None` means "still loading" so the page can tell a pending list
//! from an empty one. Deletes are confirmed by the backend before the entry
//! leaves the list; a failed delete keeps the entry and surfaces the error.

#[cfg(test)]
#[path = "maps_test.rs"]
mod maps_test;

use harita::api::{ApiError, MapSummary};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapsState {
    pub items: Option<Vec<MapSummary>>,
    pub error: Option<String>,
    /// Ids with a delete request in flight.
    pub deleting: Vec<String>,
}

impl MapsState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.items.is_none() && self.error.is_none()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.as_ref().is_some_and(Vec::is_empty)
    }

    pub fn loaded(&mut self, items: Vec<MapSummary>) {
        self.items = Some(items);
        self.error = None;
    }

    pub fn failed(&mut self, error: &ApiError) {
        self.error = Some(error.user_message());
    }

    /// Mark `id` as being deleted; `false` if a delete is already running.
    pub fn begin_delete(&mut self, id: &str) -> bool {
        if self.is_deleting(id) {
            return false;
        }
        self.deleting.push(id.to_owned());
        true
    }

    #[must_use]
    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.iter().any(|d| d == id)
    }

    pub fn delete_succeeded(&mut self, id: &str) {
        self.deleting.retain(|d| d != id);
        if let Some(items) = self.items.as_mut() {
            items.retain(|m| m.id != id);
        }
    }

    pub fn delete_failed(&mut self, id: &str, error: &ApiError) {
        self.deleting.retain(|d| d != id);
        self.error = Some(format!("Could not delete map: {}", error.user_message()));
    }
}
