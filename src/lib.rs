//! notebridge: turn whiteboard sticky notes into issue tracker drafts.
//!
//! A board export is parsed into a typed tree ([`document`]), its sticky notes are pulled out
//! together with the section each sits in and a normalised fill color ([`extract`], [`color`]),
//! narrowed by section and color ([`filter`]), and the chosen notes become editable issue drafts
//! ([`draft`]). [`session`] ties those steps together as one owned piece of state, and
//! [`tracker`] shapes finished drafts into create-issue requests.
#![allow(clippy::multiple_crate_versions)]

pub mod color;
pub mod config;
pub mod debounce;
pub mod document;
pub mod draft;
pub mod error;
pub mod extract;
pub mod filter;
pub mod note;
pub mod session;
pub mod tracker;

pub use error::{BridgeError, Result};
