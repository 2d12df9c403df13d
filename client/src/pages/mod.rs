//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (session redirects, fetches
//! tied to a `CancelToken`) and delegates rendering details to
//! `components`.

pub mod dashboard;
pub mod landing;
pub mod new_map;
pub mod view_map;
