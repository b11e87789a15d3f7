//! Property-based invariant tests for geometry primitives.
//!
//! 1. Intersection is commutative and fits within both inputs.
//! 2. `expand` always contains the original rectangle.
//! 3. `inner` never grows a rectangle.
//! 4. `center` lies inside any non-empty rectangle.

use zip_core::geometry::{Rect, Sides};
use proptest::prelude::*;

fn small_rect_strategy() -> impl Strategy<Value = Rect> {
    (0u16..=500, 0u16..=500, 0u16..=500, 0u16..=500).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn intersection_commutative_and_contained(a in small_rect_strategy(), b in small_rect_strategy()) {
        let ab = a.intersection(&b);
        prop_assert_eq!(ab, b.intersection(&a));
        if !ab.is_empty() {
            prop_assert!(ab.x >= a.x && ab.right() <= a.right());
            prop_assert!(ab.y >= b.y && ab.bottom() <= b.bottom());
        }
    }

    #[test]
    fn expand_contains_original(r in small_rect_strategy(), pad in 0u16..=64) {
        let grown = r.expand(pad);
        prop_assert!(grown.x <= r.x && grown.y <= r.y);
        prop_assert!(grown.right() >= r.right() && grown.bottom() >= r.bottom());
        prop_assert!(grown.width >= r.width && grown.height >= r.height);
    }

    #[test]
    fn inner_never_grows(r in small_rect_strategy(), m in 0u16..=100) {
        let inner = r.inner(Sides::all(m));
        prop_assert!(inner.width <= r.width);
        prop_assert!(inner.height <= r.height);
    }

    #[test]
    fn center_is_inside(r in small_rect_strategy()) {
        prop_assume!(!r.is_empty());
        let (cx, cy) = r.center();
        prop_assert!(r.contains(cx, cy));
    }
}
