//! Core types for the Solute app hub.
//!
//! This crate is free of HTTP and database dependencies: the app registry,
//! forms and prompt templates, session workspaces, the MindGames sequencer,
//! and the traits the storage and generative backends implement.

// Native `async fn` in traits; the futures' `Send` bounds are spelled out in
// the signatures.
#![allow(async_fn_in_trait)]

pub mod apps;
pub mod backend;
pub mod catalog;
pub mod error;
pub mod form;
pub mod game;
pub mod prompt;
pub mod score;
pub mod workspace;

pub use error::{Error, Result};
