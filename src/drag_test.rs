use super::*;

// =============================================================
// Helpers
// =============================================================

fn rules(unit: i32) -> PlacementRules {
    PlacementRules {
        grid_unit: unit,
        bounds: Bounds { width: 800, height: 600, header_band_height: 40, footer_band_top: 560 },
        tolerance_per_mille: 500,
    }
}

fn store_with(tiles: &[(&str, Rect, bool)]) -> TileStore {
    let mut store = TileStore::new();
    for (name, rect, movable) in tiles {
        store.insert(Tile::new(*name, *rect)).unwrap();
        store.set_movable(name, *movable);
    }
    store
}

fn three_movable() -> TileStore {
    store_with(&[
        ("a", Rect::new(100, 100, 100, 40), true),
        ("b", Rect::new(100, 200, 100, 40), true),
        ("c", Rect::new(300, 300, 100, 40), true),
    ])
}

fn x_of(store: &TileStore, name: &str) -> i32 {
    store.get(name).unwrap().rect().x
}

fn y_of(store: &TileStore, name: &str) -> i32 {
    store.get(name).unwrap().rect().y
}

// =============================================================
// PlacementRules
// =============================================================

#[test]
fn commit_snaps_then_registers() {
    let r = rules(8);
    assert_eq!(r.commit(Rect::new(101, 99, 100, 40)), Commit::Register(Rect::new(104, 96, 100, 40)));
}

#[test]
fn commit_evicts_when_snapped_rect_is_out() {
    let r = rules(5);
    assert_eq!(r.commit(Rect::new(-55, 100, 100, 40)), Commit::Evict(Rect::new(-55, 100, 100, 40)));
}

#[test]
fn commit_judges_snapped_not_raw_rect() {
    // Raw -52 is out; snapped to a grid of 8 it becomes -48, which is in.
    let r = rules(8);
    assert!(r.validate(Rect::new(-52, 100, 100, 40)));
    assert_eq!(r.commit(Rect::new(-52, 100, 100, 40)), Commit::Register(Rect::new(-48, 104, 100, 40)));
}

// =============================================================
// Session lifecycle
// =============================================================

#[test]
fn new_session_is_idle() {
    let session = DragSession::new();
    assert!(!session.is_active());
    assert!(session.origin().is_none());
}

#[test]
fn begin_records_origin() {
    let store = three_movable();
    let mut session = DragSession::new();
    assert!(session.begin(Point::new(10, 20), &store));
    assert!(session.is_active());
    assert_eq!(session.origin(), Some(Point::new(10, 20)));
}

#[test]
fn begin_while_dragging_is_rejected() {
    let store = three_movable();
    let mut session = DragSession::new();
    session.begin(Point::new(10, 20), &store);
    assert!(!session.begin(Point::new(99, 99), &store));
    assert_eq!(session.origin(), Some(Point::new(10, 20)));
}

#[test]
fn move_while_idle_is_noop() {
    let mut store = three_movable();
    let mut session = DragSession::new();
    let moved = session.apply_move(Point::new(50, 50), &mut store, &rules(4));
    assert!(moved.is_empty());
    assert_eq!(x_of(&store, "a"), 100);
}

#[test]
fn finish_while_idle_is_noop() {
    let mut store = three_movable();
    let mut session = DragSession::new();
    let outcome = session.finish(&mut store, &rules(4));
    assert!(outcome.registered.is_empty());
    assert!(outcome.evicted.is_empty());
    assert!(!store.get("a").unwrap().is_registered());
}

// =============================================================
// Group movement
// =============================================================

#[test]
fn group_moves_by_quantised_delta() {
    let mut store = three_movable();
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    let moved = session.apply_move(Point::new(12, 0), &mut store, &rules(4));
    assert_eq!(moved.len(), 3);
    assert_eq!(x_of(&store, "a"), 112);
    assert_eq!(x_of(&store, "b"), 112);
    assert_eq!(x_of(&store, "c"), 312);
    assert_eq!(y_of(&store, "a"), 100);
    assert_eq!(y_of(&store, "b"), 200);
    assert_eq!(y_of(&store, "c"), 300);
}

#[test]
fn raw_pointer_jitter_is_quantised() {
    let mut store = three_movable();
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.apply_move(Point::new(13, 1), &mut store, &rules(4));
    assert_eq!(x_of(&store, "a"), 112);
    assert_eq!(y_of(&store, "a"), 100);
}

#[test]
fn successive_moves_do_not_accumulate() {
    let mut store = three_movable();
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.apply_move(Point::new(8, 0), &mut store, &rules(4));
    session.apply_move(Point::new(12, 0), &mut store, &rules(4));
    session.apply_move(Point::new(16, 8), &mut store, &rules(4));
    assert_eq!(x_of(&store, "a"), 116);
    assert_eq!(y_of(&store, "a"), 108);
}

#[test]
fn fixed_tiles_stay_put() {
    let mut store = store_with(&[
        ("m", Rect::new(100, 100, 100, 40), true),
        ("f", Rect::new(300, 100, 100, 40), false),
    ]);
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.apply_move(Point::new(40, 40), &mut store, &rules(4));
    assert_eq!(x_of(&store, "f"), 300);
    assert_eq!(x_of(&store, "m"), 140);
}

#[test]
fn tile_promoted_mid_drag_joins_at_current_position() {
    let mut store = store_with(&[
        ("m", Rect::new(100, 100, 100, 40), true),
        ("late", Rect::new(300, 100, 100, 40), false),
    ]);
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.apply_move(Point::new(20, 0), &mut store, &rules(4));
    store.set_movable("late", true);
    session.apply_move(Point::new(20, 0), &mut store, &rules(4));
    assert_eq!(x_of(&store, "late"), 300);
    session.apply_move(Point::new(28, 0), &mut store, &rules(4));
    assert_eq!(x_of(&store, "late"), 308);
    assert_eq!(x_of(&store, "m"), 128);
}

#[test]
fn move_marks_without_evicting() {
    let mut store = store_with(&[("a", Rect::new(0, 100, 100, 40), true)]);
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.apply_move(Point::new(-55, 0), &mut store, &rules(5));
    let tile = store.get("a").unwrap();
    assert!(tile.is_pending_removal());
    assert_eq!(store.len(), 1);

    session.apply_move(Point::new(-40, 0), &mut store, &rules(5));
    assert!(!store.get("a").unwrap().is_pending_removal());
}

#[test]
fn move_relayers_each_step() {
    let mut store = store_with(&[("a", Rect::new(100, 100, 100, 40), true)]);
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.apply_move(Point::new(0, 8), &mut store, &rules(4));
    assert!(store.get("a").unwrap().is_on_top());
    session.apply_move(Point::new(0, 440), &mut store, &rules(4));
    assert!(!store.get("a").unwrap().is_on_top());
}

// =============================================================
// Commit on release
// =============================================================

#[test]
fn release_registers_surviving_tiles() {
    let mut store = three_movable();
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.apply_move(Point::new(12, 0), &mut store, &rules(4));
    let outcome = session.finish(&mut store, &rules(4));
    assert!(!session.is_active());
    assert_eq!(outcome.registered, vec!["a", "b", "c"]);
    assert!(outcome.evicted.is_empty());
    assert!(store.iter().all(Tile::is_registered));
    assert!(store.is_consistent());
}

#[test]
fn release_evicts_out_of_bounds_tile() {
    let mut store = store_with(&[
        ("gone", Rect::new(0, 100, 100, 40), true),
        ("kept", Rect::new(200, 100, 100, 40), true),
    ]);
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.apply_move(Point::new(-55, 0), &mut store, &rules(5));
    let outcome = session.finish(&mut store, &rules(5));
    assert_eq!(outcome.evicted.len(), 1);
    assert_eq!(outcome.evicted[0].name(), "gone");
    assert_eq!(outcome.registered, vec!["kept"]);
    assert!(store.get("gone").is_none());
    assert!(store.is_consistent());
}

#[test]
fn release_within_tolerance_keeps_tile() {
    let mut store = store_with(&[("a", Rect::new(0, 100, 100, 40), true)]);
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.apply_move(Point::new(-40, 0), &mut store, &rules(5));
    let outcome = session.finish(&mut store, &rules(5));
    assert!(outcome.evicted.is_empty());
    assert_eq!(x_of(&store, "a"), -40);
}

#[test]
fn release_resnaps_absolute_position() {
    // Tile starts off-grid; the delta keeps it off-grid, the commit aligns it.
    let mut store = store_with(&[("a", Rect::new(101, 101, 100, 40), true)]);
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.apply_move(Point::new(8, 0), &mut store, &rules(8));
    assert_eq!(x_of(&store, "a"), 109);
    session.finish(&mut store, &rules(8));
    assert_eq!(x_of(&store, "a"), 112);
    assert_eq!(y_of(&store, "a"), 104);
}

#[test]
fn release_keeps_tiles_movable() {
    let mut store = three_movable();
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.finish(&mut store, &rules(4));
    assert_eq!(store.movable_len(), 3);
}

// =============================================================
// Detach and extreme pointers
// =============================================================

#[test]
fn detached_tile_rejoins_at_its_new_position() {
    let mut store = store_with(&[
        ("a", Rect::new(100, 100, 100, 40), true),
        ("b", Rect::new(101, 200, 100, 40), true),
    ]);
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);
    session.apply_move(Point::new(20, 0), &mut store, &rules(4));
    assert_eq!(x_of(&store, "b"), 121);

    store.set_movable("b", false);
    session.detach("b");
    store.get_mut("b").unwrap().move_to(124, 200);
    store.set_movable("b", true);

    session.apply_move(Point::new(28, 0), &mut store, &rules(4));
    assert_eq!(x_of(&store, "b"), 132);
    assert_eq!(x_of(&store, "a"), 128);
}

#[test]
fn pointer_at_the_limits_saturates() {
    let mut store = store_with(&[("a", Rect::new(100, 100, 100, 40), true)]);
    let mut session = DragSession::new();
    session.begin(Point::new(0, 0), &store);

    session.apply_move(Point::new(i32::MAX, i32::MIN), &mut store, &rules(4));
    assert_eq!(x_of(&store, "a"), i32::MAX);
    assert_eq!(y_of(&store, "a"), i32::MIN + 100);
    assert!(store.get("a").unwrap().is_pending_removal());

    let outcome = session.finish(&mut store, &rules(4));
    assert_eq!(outcome.evicted.len(), 1);
    assert!(store.is_empty());
}
