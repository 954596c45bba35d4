//! Core types for procapi.
//!
//! This crate provides the fundamental building blocks shared by document
//! generation and route matching:
//!
//! - [`ProcedureDefinition`] and [`HttpBinding`], collected in a [`Router`]
//! - [`SchemaNode`] validator trees and their introspection
//! - [`Method`], [`ContentType`] and friends
//! - [`SchemaError`] / [`ConfigurationError`] and the attributed
//!   [`GenerateError`]
//!
//! # Design Principles
//!
//! - Definitions are immutable once registered
//! - No runtime reflection: validator trees are a closed enum
//! - All types are `Send + Sync`
//! - Failures are values, propagated with `?`

#![forbid(unsafe_code)]

pub mod error;
mod method;
mod procedure;
mod router;
pub mod schema;

pub use error::{BuildError, ConfigurationError, GenerateError, ParserRole, SchemaError};
pub use method::{Method, ParseMethodError};
pub use procedure::{
    ContentType, HeaderParameter, HttpBinding, ParseKindError, Parser, ProcedureDefinition,
    ProcedureKind,
};
pub use router::Router;
pub use schema::{CoreKind, CoreSchema, ObjectShape, SchemaCapabilities, SchemaKind, SchemaNode};
