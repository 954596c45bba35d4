//! Procedure matcher.
//!
//! This crate compiles the HTTP bindings of a [`Router`](procapi_core::Router)
//! into a read-only table that resolves an inbound method and path to a
//! procedure.
//!
//! # Features
//!
//! - Brace-style path templates (`/widget/{id}`)
//! - Segment-wise matching, first registered route wins
//! - Path parameter extraction in template order
//! - Allow-list lookup for 405 responses
//! - Shared snapshots with atomic table swaps

#![forbid(unsafe_code)]

mod r#match;
mod shared;
mod table;
mod template;

pub use r#match::{AllowedMethods, ProcedureMatch, RouteLookup};
pub use shared::SharedMatcher;
pub use table::{MatchTable, RouteEntry};
pub use template::{PathTemplate, Segment, is_valid_identifier, normalize_path};
