use river_run::entities::*;

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_edges() {
    let r = Rect::new(10, 20, 30, 40);
    assert_eq!(r.left(), 10);
    assert_eq!(r.right(), 40);
    assert_eq!(r.top(), 20);
    assert_eq!(r.bottom(), 60);
}

#[test]
fn rect_overlap_needs_shared_area() {
    let a = Rect::new(0, 0, 30, 30);
    assert!(a.intersects(&Rect::new(29, 29, 30, 30)));
    // touching edges only
    assert!(!a.intersects(&Rect::new(30, 0, 30, 30)));
    assert!(!a.intersects(&Rect::new(0, 30, 30, 30)));
    assert!(!a.intersects(&Rect::new(-30, 0, 30, 30)));
}

#[test]
fn rect_overlap_is_symmetric() {
    let a = Rect::new(5, 5, 10, 10);
    let b = Rect::new(12, 0, 4, 7);
    assert_eq!(a.intersects(&b), b.intersects(&a));
    assert!(a.intersects(&b));
}

#[test]
fn rect_contains_smaller_rect() {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = Rect::new(40, 40, 5, 5);
    assert!(outer.intersects(&inner));
    assert!(inner.intersects(&outer));
}

#[test]
fn translated_keeps_size() {
    let r = Rect::new(1, 2, 3, 4).translated(10, -20);
    assert_eq!(r, Rect::new(11, -18, 3, 4));
}

// ── EntityKind ────────────────────────────────────────────────────────────────

#[test]
fn kind_indices_are_dense() {
    for (i, kind) in EntityKind::ALL.iter().enumerate() {
        assert_eq!(kind.index(), i);
    }
    assert_eq!(EntityKind::ALL.len(), EntityKind::COUNT);
}

#[test]
fn spawn_order_starts_with_bomb_boat_fuel() {
    assert_eq!(
        &EntityKind::ALL[..3],
        &[EntityKind::Bomb, EntityKind::Boat, EntityKind::Fuel]
    );
}

#[test]
fn only_boats_patrol() {
    for kind in EntityKind::ALL {
        let expected = if kind == EntityKind::Boat {
            Behavior::Patrol { speed: 1 }
        } else {
            Behavior::Stationary
        };
        assert_eq!(kind.behavior(), expected, "{}", kind.label());
    }
}

#[test]
fn fuel_is_the_only_collectible() {
    assert!(!EntityKind::Fuel.is_hazard());
    assert!(EntityKind::Bomb.is_hazard());
    assert!(EntityKind::Boat.is_hazard());
}

#[test]
fn kind_sizes() {
    assert_eq!(EntityKind::Bomb.size(), (30, 30));
    assert_eq!(EntityKind::Boat.size(), (50, 30));
    assert_eq!(EntityKind::Fuel.size(), (30, 60));
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[test]
fn bullet_off_screen_once_bottom_reaches_top() {
    let gone = Bullet { rect: Rect::new(0, -14, 14, 14), speed: 5 };
    let still_visible = Bullet { rect: Rect::new(0, -13, 14, 14), speed: 5 };
    assert!(gone.off_screen());
    assert!(!still_visible.off_screen());
}
