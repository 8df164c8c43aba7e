//! lobpick — line-of-business → application → package picker.
//!
//! A cascading selection over three JSON lookup tables, with the last
//! choice persisted locally and a ratatui frontend on top.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod source;
pub mod store;
pub mod tui;
