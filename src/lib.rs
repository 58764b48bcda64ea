//! Placement engine for free-floating data tiles.
//!
//! This crate owns the spatial side of a tile board: tiles are dragged as a
//! group, snapped to a grid, evicted when they leave the valid region, and
//! layered above or below sibling content depending on where they sit
//! relative to fixed header and footer bands. A wheel-style pulse scans
//! along a vertical line to promote or demote the nearest tile.
//!
//! Rendering, data storage, and the widgets hosting the board stay outside
//! the crate. The host feeds pointer and pulse events into
//! [`canvas::Canvas`] and drains the resulting [`canvas::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`canvas`] | Aggregate root and outbound actions |
//! | [`drag`] | Group-drag session state machine |
//! | [`scan`] | Pulse-driven activation scanner |
//! | [`store`] | Insertion-ordered tile store and the movable set |
//! | [`tile`] | Tile and satellite types |
//! | [`grid`] | Grid snapping |
//! | [`bounds`] | Placement region and boundary validation |
//! | [`layer`] | Header/footer layering rule |
//! | [`geom`] | Integer points and rectangles |
//! | [`source`] | Data-source contract and an in-memory implementation |
//! | [`config`] | Tunables with defaults and environment overrides |
//! | [`error`] | Error types |
//! | [`consts`] | Default constants |

pub mod bounds;
pub mod canvas;
pub mod config;
pub mod consts;
pub mod drag;
pub mod error;
pub mod geom;
pub mod grid;
pub mod layer;
pub mod scan;
pub mod source;
pub mod store;
pub mod tile;
