#![forbid(unsafe_code)]

//! Property tests for tooltip placement.
//!
//! 1. With room for the tooltip plus margins, a directional placement keeps
//!    the tooltip inside the viewport by at least the margin.
//! 2. Centered placement never produces a spotlight or an arrow.
//! 3. The spotlight stays inside the viewport and covers the visible part
//!    of the anchor.
//!
//! Anchors range over the whole `u16` plane, including ones far outside
//! the viewport or running past `u16::MAX`.
//! 4. The arrow sits on the tooltip's border.

use proptest::prelude::*;
use zip_core::geometry::{Rect, Size};
use zip_tour::positioner::{PlacementMetrics, place};
use zip_tour::step::Placement;

fn placement_strategy() -> impl Strategy<Value = Placement> {
    prop_oneof![
        Just(Placement::Top),
        Just(Placement::Bottom),
        Just(Placement::Left),
        Just(Placement::Right),
    ]
}

fn anchor_strategy() -> impl Strategy<Value = Rect> {
    (any::<u16>(), any::<u16>(), 1u16..=400, 1u16..=200).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

/// Viewport at least tooltip + 2 * margin in both directions, anywhere in
/// the first few thousand cells.
fn scene() -> impl Strategy<Value = (Rect, Size, Rect)> {
    (
        (100u16..=600, 60u16..=400, 32u16..=1600, 32u16..=1000),
        (0u16..=2000, 0u16..=2000),
    )
        .prop_flat_map(|((tw, th, extra_w, extra_h), (vx, vy))| {
            let vw = tw + extra_w;
            let vh = th + extra_h;
            let viewport = Rect::new(vx, vy, vw, vh);
            let inside = (vx..vx + vw, vy..vy + vh, 1u16..=400, 1u16..=200)
                .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h));
            (
                Just(viewport),
                Just(Size::new(tw, th)),
                prop_oneof![inside, anchor_strategy()],
            )
        })
}

proptest! {
    #[test]
    fn directional_tooltip_stays_inside((viewport, tip, anchor) in scene(), placement in placement_strategy()) {
        let metrics = PlacementMetrics::PIXELS;
        let layout = place(Some(anchor), placement, tip, viewport, metrics);
        prop_assert_eq!(layout.placement, placement);
        prop_assert_eq!(layout.area.size(), tip);
        prop_assert!(layout.area.x >= viewport.x + metrics.margin);
        prop_assert!(layout.area.y >= viewport.y + metrics.margin);
        prop_assert!(layout.area.right() + metrics.margin <= viewport.right());
        prop_assert!(layout.area.bottom() + metrics.margin <= viewport.bottom());
    }

    #[test]
    fn center_has_no_spotlight((viewport, tip, anchor) in scene()) {
        let layout = place(Some(anchor), Placement::Center, tip, viewport, PlacementMetrics::PIXELS);
        prop_assert_eq!(layout.placement, Placement::Center);
        prop_assert!(layout.spotlight.is_none());
        prop_assert!(layout.arrow.is_none());
    }

    #[test]
    fn spotlight_within_viewport((viewport, tip, anchor) in scene(), placement in placement_strategy()) {
        let layout = place(Some(anchor), placement, tip, viewport, PlacementMetrics::PIXELS);
        match (layout.spotlight, anchor.intersection_opt(&viewport)) {
            (Some(spot), visible) => {
                prop_assert_eq!(spot.intersection(&viewport), spot);
                if let Some(visible) = visible {
                    prop_assert_eq!(spot.intersection(&visible), visible);
                }
            }
            (None, visible) => prop_assert!(visible.is_none()),
        }
    }

    #[test]
    fn arrow_on_border((viewport, tip, anchor) in scene(), placement in placement_strategy()) {
        let layout = place(Some(anchor), placement, tip, viewport, PlacementMetrics::PIXELS);
        let arrow = layout.arrow.unwrap();
        let area = layout.area;
        prop_assert!(area.contains(arrow.x, arrow.y));
        let on_edge = arrow.x == area.x
            || arrow.x == area.right() - 1
            || arrow.y == area.y
            || arrow.y == area.bottom() - 1;
        prop_assert!(on_edge);
    }
}
