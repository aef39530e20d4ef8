//! Library catalog backend: books, patrons and the borrow/return workflow.

pub mod adapters;
pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
