//! Blogdesk: administrative console for a blogging API.
//!
//! The library holds the screen logic (entity editors, the post browser, the
//! creation and sign-in forms) independent of any front end. The
//! `blogdesk-cli` binary drives the same state machines from the terminal.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;

pub use blogdesk_api_types as api_types;
