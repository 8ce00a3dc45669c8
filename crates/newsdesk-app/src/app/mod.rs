//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the article web view, the renderer manager and the
//! content cache.

mod bounds;
mod bridge_handlers;
mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;

pub use core::NewsdeskApp;
