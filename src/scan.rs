//! Pulse-driven activation scanner.
//!
//! One notch of a wheel gesture promotes or demotes a single tile. The scanner
//! walks a vertical line through the pulse origin in fixed steps and
//! hit-tests every tile at each step:
//!
//! - `Forward` starts at the origin (clamped to the canvas height) and walks
//!   up past it by the scan offset, looking for the first movable tile to
//!   demote.
//! - `Backward` starts at the origin and walks down past the canvas bottom by
//!   the scan offset, looking for the first fixed tile to promote.
//!
//! Tiles that are hit but not eligible are skipped. When several tiles overlap
//! one scan point, the earliest inserted wins.
//!
//! A single physical gesture may be delivered twice: once by the scroll region
//! enclosing the canvas and once by the canvas itself. The dispatcher creates
//! one [`Gesture`] per notch and passes the same value to both; whichever
//! handler runs first consumes it.

#[cfg(test)]
#[path = "scan_test.rs"]
mod scan_test;

use crate::config::ScanConfig;
use crate::geom::Point;
use crate::store::TileStore;
use crate::tile::Tile;

/// Direction of a pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Demote the nearest movable tile at or above the origin.
    Forward,
    /// Promote the nearest fixed tile at or below the origin.
    Backward,
}

/// Who delivered the pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PulseSource {
    /// The canvas itself; the origin is in canvas coordinates.
    #[default]
    Canvas,
    /// The enclosing container; the origin is shifted by the parent offset.
    Parent,
}

/// One wheel notch, shared by every handler that sees it.
#[derive(Debug, Clone)]
pub struct Gesture {
    pub point: Point,
    pub polarity: Polarity,
    pub source: PulseSource,
    consumed: bool,
}

impl Gesture {
    #[must_use]
    pub fn new(point: Point, polarity: Polarity, source: PulseSource) -> Self {
        Self { point, polarity, source, consumed: false }
    }

    /// Whether some handler has already acted on this gesture.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Mark the gesture as handled. Later deliveries become no-ops.
    pub fn consume(&mut self) {
        self.consumed = true;
    }
}

/// A tile selected by the scanner and the movability it should switch to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHit {
    pub name: String,
    pub movable: bool,
}

/// First point, last point (inclusive) and signed stride of a pulse's scan.
#[derive(Debug, Clone, Copy)]
struct ScanRange {
    first: i32,
    last: i32,
    stride: i32,
}

impl ScanRange {
    fn of(gesture: &Gesture, canvas_height: i32, cfg: &ScanConfig) -> Self {
        let step = cfg.step.max(1);
        let origin_y = gesture.point.y;
        match gesture.polarity {
            Polarity::Forward => Self {
                first: canvas_height.min(origin_y),
                last: origin_y.saturating_sub(cfg.offset),
                stride: -step,
            },
            Polarity::Backward => Self {
                first: match gesture.source {
                    PulseSource::Canvas => origin_y,
                    PulseSource::Parent => origin_y.saturating_sub(cfg.parent_offset),
                },
                last: canvas_height.saturating_add(cfg.offset),
                stride: step,
            },
        }
    }

    fn within(&self, y: i32) -> bool {
        if self.stride > 0 { y <= self.last } else { y >= self.last }
    }

    /// Move `first` forward by whole strides until it reaches `target`.
    /// `None` when that point lies past the end of the range.
    fn skip_to(self, target: i32) -> Option<Self> {
        let dir = i64::from(self.stride.signum());
        let gap = (i64::from(target) - i64::from(self.first)) * dir;
        if gap <= 0 {
            return Some(self);
        }
        let step = i64::from(self.stride).abs();
        let jumps = (gap + step - 1) / step;
        match i32::try_from(i64::from(self.first) + jumps * i64::from(self.stride)) {
            Ok(first) if self.within(first) => Some(Self { first, ..self }),
            _ => None,
        }
    }

    fn points(self) -> impl Iterator<Item = i32> {
        std::iter::successors(Some(self.first), move |y| y.checked_add(self.stride))
            .take_while(move |y| self.within(*y))
    }
}

/// Y coordinates visited for a pulse, in scan order.
pub fn scan_points(gesture: &Gesture, canvas_height: i32, cfg: &ScanConfig) -> impl Iterator<Item = i32> + use<> {
    ScanRange::of(gesture, canvas_height, cfg).points()
}

/// Find the tile a pulse should flip, without mutating anything.
///
/// Only the stretch of the scan line covered by an eligible tile is walked.
#[must_use]
pub fn find_target(store: &TileStore, gesture: &Gesture, canvas_height: i32, cfg: &ScanConfig) -> Option<ScanHit> {
    let want_movable = match gesture.polarity {
        Polarity::Forward => true,
        Polarity::Backward => false,
    };
    let x = gesture.point.x;
    let candidates: Vec<&Tile> = store
        .iter()
        .filter(|t| t.is_movable() == want_movable && t.rect().left() <= x && x < t.rect().right())
        .collect();
    let top = candidates.iter().map(|t| t.rect().top()).min()?;
    let bottom = candidates.iter().map(|t| t.rect().bottom()).max()?;

    let range = ScanRange::of(gesture, canvas_height, cfg);
    let range = if range.stride > 0 { range.skip_to(top)? } else { range.skip_to(bottom.saturating_sub(1))? };
    for y in range.points() {
        if (range.stride > 0 && y >= bottom) || (range.stride < 0 && y < top) {
            break;
        }
        let pt = Point::new(x, y);
        if let Some(tile) = candidates.iter().find(|t| t.rect().contains(pt)) {
            return Some(ScanHit { name: tile.name().to_string(), movable: !want_movable });
        }
    }
    None
}
