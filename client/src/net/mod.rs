//! Networking modules for the backend, identity, storage, and tile hosts.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to the map backend, `auth` to Supabase GoTrue, `storage` to
//! Supabase Storage signed uploads, and `tiles` reads PMTiles archives.
//! `backend` ties `api` and `storage` into the creation workflow.

pub mod api;
pub mod auth;
pub mod backend;
pub mod storage;
pub mod tiles;
