//! Domain types and client logic for the exhibition visitor app.
//!
//! Everything here is platform neutral: the browser app plugs in local
//! storage and HTTP through the `cache::KeyValueStore` and `gateway` traits,
//! tests plug in `cache::MemoryStore` and scripted gateways.

pub mod cache;
pub mod catalog;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod feedback;
pub mod gateway;
pub mod identity;
pub mod mirror;
pub mod model;
pub mod qr;
pub mod reconcile;
pub mod requests;
pub mod visit;
