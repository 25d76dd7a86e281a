//! # Core Types
//!
//! This crate defines the fundamental types shared by every Tilepane service.
//!
//! ## Philosophy
//!
//! Core types are designed with these principles:
//! - **Explicit over implicit**: Panel and tab identifiers are distinct types and cannot be confused.
//! - **Type safety first**: Grid coordinates never go negative; stepping off the grid is an `Option`.
//! - **No ambient state**: Identifiers are values, not handles into a global store.
//!
//! ## Key Types
//!
//! - [`PanelId`]: Unique identifier for a panel (one tile of the grid)
//! - [`TabId`]: Unique identifier for a tab within a panel
//! - [`GridPosition`]: Integer `(row, column)` cell of the panel grid
//! - [`Direction`]: One step up, down, left or right on the grid

pub mod grid;
pub mod ids;

pub use grid::{Direction, GridPosition};
pub use ids::{PanelId, TabId};
