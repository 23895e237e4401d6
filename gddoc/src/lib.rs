//! gddoc — Godot class reference generator for GDExtension classes.
//!
//! Doxygen-style comments attached to exported declarations are lexed into a
//! [`comment::Comment`] tree, classified into a [`Documentation`] record and
//! rendered as Godot BBCode inside the engine's class reference XML.

pub mod class;
pub mod classify;
pub mod comment;
pub mod error;
pub mod expand;
pub mod manifest;
pub mod model;
pub mod render;

pub use class::{ClassBuilder, ClassDoc};
pub use error::{Error, Result};
pub use manifest::Manifest;
pub use model::Documentation;
