//! # Core Application Logic
//!
//! This module contains the word-review business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (session)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • WordStore (files)    │
//!                    │  • DefinitionLookup     │
//!                    └───────────┬─────────────┘
//!                                │
//!                         ┌──────┴─────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`store`]: Word lists and their JSON files
//! - [`lookup`]: Prompt, fence stripping, and parsing of definitions
//! - [`config`]: Layered settings

pub mod action;
pub mod config;
pub mod lookup;
pub mod state;
pub mod store;
