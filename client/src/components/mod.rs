//! Reusable UI components composed by route-level pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render state owned by pages and report user intent back
//! through callbacks. Only `map_view` touches the map engine.

pub mod feature_properties;
pub mod map_card;
pub mod map_view;
