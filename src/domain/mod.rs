//! Domain Layer
//!
//! Pure model and rules for building monitoring configuration.
//!
//! ## Structure
//!
//! - `entities/` - Deployment, document, object collections, artifacts
//! - `value_objects/` - Content hashes and the directory layout
//! - `services/` - Config rendering, resolver registry, local host cache
//! - `ports/` - Interfaces to sources, resolvers, transformer and disk

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
