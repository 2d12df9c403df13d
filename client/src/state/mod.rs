//! Page-local view state.
//!
//! DESIGN
//! ======
//! Each struct is plain data with transition methods; pages wrap one in an
//! `RwSignal` for their own lifetime so nothing outlives the route.

pub mod inspector;
pub mod maps;
pub mod viewer;
pub mod wizard;
