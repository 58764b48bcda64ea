//! Shared numeric constants for the placement engine.

// ── Grid ────────────────────────────────────────────────────────

/// Grid unit used when none is configured.
pub const DEFAULT_GRID_UNIT: i32 = 8;

// ── Canvas ──────────────────────────────────────────────────────

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: i32 = 800;

/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: i32 = 600;

/// Default height of the header band, measured from the canvas top.
pub const DEFAULT_HEADER_BAND_HEIGHT: i32 = 40;

/// Default top edge of the footer band.
pub const DEFAULT_FOOTER_BAND_TOP: i32 = 560;

// ── Tiles ───────────────────────────────────────────────────────

/// Width of a freshly created tile.
pub const DEFAULT_TILE_WIDTH: i32 = 120;

/// Height of a freshly created tile.
pub const DEFAULT_TILE_HEIGHT: i32 = 48;

/// Left edge of the column filter-materialised tiles are stacked in.
pub const DEFAULT_STACK_X: i32 = 16;

/// Vertical gap between stacked tiles.
pub const DEFAULT_STACK_GAP: i32 = 8;

// ── Boundary ────────────────────────────────────────────────────

/// How far a tile may hang off an edge before eviction, in thousandths of
/// its own extent along that axis.
pub const DEFAULT_TOLERANCE_PER_MILLE: i32 = 500;

// ── Scanner ─────────────────────────────────────────────────────

/// Distance between consecutive scan points, in pixels.
pub const DEFAULT_SCAN_STEP: i32 = 5;

/// Overshoot past the origin (forward) or canvas bottom (backward).
pub const DEFAULT_SCAN_OFFSET: i32 = 30;

/// Shift applied to pulses forwarded by the enclosing container.
pub const DEFAULT_PARENT_PULSE_OFFSET: i32 = 25;
