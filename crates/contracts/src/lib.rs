//! Platform-independent state contracts shared by the browser bindings.
//!
//! Nothing in this crate touches the DOM: the browser crate implements the
//! [`shared::storage::KeyValueStore`] and [`shared::form::FormSurface`]
//! traits over `web-sys` types and drives the logic defined here.

pub mod shared;
