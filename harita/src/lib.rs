//! Shared map model for the Harita frontend, host, and CLI.
//!
//! This crate owns everything that is pure: deriving MapLibre style layers
//! from a tile source's manifest, merging source bounds, flattening rendered
//! features into property tables, the login/logout session state machine,
//! the backend wire schema, and PMTiles header/metadata decoding. The
//! `client` crate wires these into Leptos pages; the `cli` crate drives the
//! same model from a terminal.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`layers`] | Vector-layer descriptors and [`layers::derive_layers`] |
//! | [`bounds`] | [`bounds::BoundingBox`] and order-independent merging |
//! | [`source`] | [`source::TileSource`] lifecycle and [`source::merge_bounds`] |
//! | [`inspect`] | Rendered features and [`inspect::render_properties`] |
//! | [`session`] | Session tri-state, transition tracker, and change hub |
//! | [`api`] | Backend endpoints, request/response bodies, [`api::ApiError`] |
//! | [`pmtiles`] | PMTiles v3 header and metadata decoding |
//! | [`workflow`] | Map creation step sequence over [`workflow::MapBackend`] |
//! | [`color`] | Hex color normalization |

pub mod api;
pub mod bounds;
pub mod color;
pub mod inspect;
pub mod layers;
pub mod pmtiles;
pub mod session;
pub mod source;
pub mod workflow;

pub use bounds::BoundingBox;
pub use color::Color;
pub use layers::{GeometryKind, RenderRule, VectorLayer, derive_layers};
pub use source::{TileSource, merge_bounds};
