//! Terminal frontend — ratatui presentation layer over the controller.
//!
//! ## Architecture (TEA)
//!
//! Model (`TuiApp`) + Update (message handler) + View (render).
//! Immediate mode: the view reads the controller's display state each
//! frame and holds nothing across frames.

pub mod app;
pub mod event;
pub mod input;
pub mod layout;
pub mod runner;
