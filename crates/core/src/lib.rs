//! Domain types shared by every shapeassist crate.
//!
//! - [`interactor`]: remote shape-suggestion models and their lookup.
//! - [`label`]: annotation categories.
//! - [`geometry`]: canvas shape payloads and point pairing.
//! - [`annotation`]: the polygon objects stored in the host collection.

pub mod annotation;
pub mod error;
pub mod geometry;
pub mod interactor;
pub mod label;
pub mod types;
