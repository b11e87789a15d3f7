#![forbid(unsafe_code)]

//! Tooltip placement.
//!
//! # Invariants
//!
//! 1. For directional placements the tooltip origin is clamped into
//!    `[margin, viewport - tooltip - margin]` on both axes (relative to the
//!    viewport origin).
//! 2. Centered placement ignores the anchor.
//! 3. A spotlight exists only for directional placements with an anchor,
//!    and never extends past the viewport.
//!
//! All arithmetic is done in `i32` so anchors near the origin and tooltips
//! larger than the viewport never wrap.

use zip_core::geometry::{Rect, Size};

use crate::step::Placement;

/// Spacing used by [`place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementMetrics {
    /// Distance between anchor and tooltip along the main axis.
    pub gap: u16,
    /// Minimum distance between tooltip and viewport edge.
    pub margin: u16,
    /// Growth of the spotlight around the anchor.
    pub spotlight_padding: u16,
}

impl PlacementMetrics {
    /// Browser pixel metrics.
    pub const PIXELS: Self = Self {
        gap: 16,
        margin: 16,
        spotlight_padding: 8,
    };

    /// Terminal cell metrics.
    pub const CELLS: Self = Self {
        gap: 1,
        margin: 1,
        spotlight_padding: 1,
    };
}

impl Default for PlacementMetrics {
    fn default() -> Self {
        Self::PIXELS
    }
}

/// Arrow glyph drawn on the tooltip edge facing the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub x: u16,
    pub y: u16,
    pub glyph: char,
}

/// Result of [`place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipLayout {
    pub area: Rect,
    /// Placement actually used; directional requests without an anchor
    /// fall back to `Center`.
    pub placement: Placement,
    pub spotlight: Option<Rect>,
    pub arrow: Option<Arrow>,
}

fn clamp_axis(pos: i32, origin: i32, extent: i32, size: i32, margin: i32) -> i32 {
    let lo = origin + margin;
    let hi = origin + extent - size - margin;
    pos.min(hi).max(lo)
}

fn to_u16(v: i32) -> u16 {
    v.clamp(0, i32::from(u16::MAX)) as u16
}

/// Compute the tooltip rectangle, spotlight, and arrow.
pub fn place(
    anchor: Option<Rect>,
    placement: Placement,
    tooltip: Size,
    viewport: Rect,
    metrics: PlacementMetrics,
) -> TooltipLayout {
    let (vx, vy) = (i32::from(viewport.x), i32::from(viewport.y));
    let (vw, vh) = (i32::from(viewport.width), i32::from(viewport.height));
    let (tw, th) = (i32::from(tooltip.width), i32::from(tooltip.height));

    let anchor = anchor.filter(|_| !placement.is_center());
    let Some(target) = anchor else {
        let x = vx + ((vw - tw) / 2).max(0);
        let y = vy + ((vh - th) / 2).max(0);
        return TooltipLayout {
            area: Rect::new(to_u16(x), to_u16(y), tooltip.width, tooltip.height),
            placement: Placement::Center,
            spotlight: None,
            arrow: None,
        };
    };

    let (ax, ay) = (i32::from(target.x), i32::from(target.y));
    let (aw, ah) = (i32::from(target.width), i32::from(target.height));
    let gap = i32::from(metrics.gap);

    let (x, y) = match placement {
        Placement::Top => (ax + (aw - tw) / 2, ay - th - gap),
        Placement::Bottom => (ax + (aw - tw) / 2, ay + ah + gap),
        Placement::Left => (ax - tw - gap, ay + (ah - th) / 2),
        Placement::Right => (ax + aw + gap, ay + (ah - th) / 2),
        Placement::Center => unreachable!("center placement returns early"),
    };

    let margin = i32::from(metrics.margin);
    let x = clamp_axis(x, vx, vw, tw, margin);
    let y = clamp_axis(y, vy, vh, th, margin);
    let area = Rect::new(to_u16(x), to_u16(y), tooltip.width, tooltip.height);

    let spotlight = target
        .expand(metrics.spotlight_padding)
        .intersection_opt(&viewport);

    TooltipLayout {
        area,
        placement,
        spotlight,
        arrow: arrow_for(area, target, placement),
    }
}

fn arrow_for(area: Rect, target: Rect, placement: Placement) -> Option<Arrow> {
    if area.width < 3 || area.height < 3 {
        return None;
    }
    let (cx, cy) = target.center();
    let (left, top) = (area.x.saturating_add(1), area.y.saturating_add(1));
    let x = cx.clamp(left, area.right().saturating_sub(2).max(left));
    let y = cy.clamp(top, area.bottom().saturating_sub(2).max(top));
    let arrow = match placement {
        Placement::Bottom => Arrow {
            x,
            y: area.y,
            glyph: '▲',
        },
        Placement::Top => Arrow {
            x,
            y: area.bottom() - 1,
            glyph: '▼',
        },
        Placement::Left => Arrow {
            x: area.right() - 1,
            y,
            glyph: '▶',
        },
        Placement::Right => Arrow {
            x: area.x,
            y,
            glyph: '◀',
        },
        Placement::Center => return None,
    };
    Some(arrow)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0, 0, 1280, 800);
    const TIP: Size = Size::new(320, 200);

    fn at(anchor: Rect, placement: Placement) -> TooltipLayout {
        place(Some(anchor), placement, TIP, VIEWPORT, PlacementMetrics::PIXELS)
    }

    #[test]
    fn center_ignores_anchor() {
        let layout = at(Rect::new(10, 10, 50, 20), Placement::Center);
        assert_eq!(layout.area, Rect::new(480, 300, 320, 200));
        assert_eq!(layout.spotlight, None);
        assert_eq!(layout.arrow, None);
    }

    #[test]
    fn bottom_centers_on_anchor() {
        let layout = at(Rect::new(500, 100, 200, 40), Placement::Bottom);
        assert_eq!(layout.area.x, 440);
        assert_eq!(layout.area.y, 156);
        assert_eq!(layout.spotlight, Some(Rect::new(492, 92, 216, 56)));
    }

    #[test]
    fn top_left_right_offsets() {
        let anchor = Rect::new(500, 400, 200, 40);
        let top = at(anchor, Placement::Top).area;
        assert_eq!((top.x, top.y), (440, 184));
        let left = at(anchor, Placement::Left).area;
        assert_eq!((left.x, left.y), (164, 320));
        let right = at(anchor, Placement::Right).area;
        assert_eq!((right.x, right.y), (716, 320));
    }

    #[test]
    fn clamps_near_origin() {
        let layout = at(Rect::new(0, 0, 40, 20), Placement::Top);
        assert_eq!((layout.area.x, layout.area.y), (16, 16));
    }

    #[test]
    fn clamps_near_far_edge() {
        let layout = at(Rect::new(1260, 780, 20, 20), Placement::Bottom);
        assert_eq!((layout.area.x, layout.area.y), (1280 - 320 - 16, 800 - 200 - 16));
    }

    #[test]
    fn spotlight_is_clipped_to_viewport() {
        let layout = at(Rect::new(0, 0, 100, 30), Placement::Bottom);
        assert_eq!(layout.spotlight, Some(Rect::new(0, 0, 108, 38)));
    }

    #[test]
    fn missing_anchor_falls_back_to_center() {
        let layout = place(None, Placement::Bottom, TIP, VIEWPORT, PlacementMetrics::PIXELS);
        assert_eq!(layout.placement, Placement::Center);
        assert_eq!(layout.area, Rect::new(480, 300, 320, 200));
        assert_eq!(layout.spotlight, None);
    }

    #[test]
    fn oversized_tooltip_stays_on_screen() {
        let viewport = Rect::new(0, 0, 20, 10);
        let layout = place(None, Placement::Center, Size::new(40, 20), viewport, PlacementMetrics::CELLS);
        assert_eq!((layout.area.x, layout.area.y), (0, 0));
        let layout = place(
            Some(Rect::new(5, 5, 2, 1)),
            Placement::Bottom,
            Size::new(40, 20),
            viewport,
            PlacementMetrics::CELLS,
        );
        assert_eq!((layout.area.x, layout.area.y), (1, 1));
    }

    #[test]
    fn viewport_offset_is_respected() {
        let viewport = Rect::new(10, 5, 100, 40);
        let layout = place(
            Some(Rect::new(10, 5, 4, 2)),
            Placement::Top,
            Size::new(20, 6),
            viewport,
            PlacementMetrics::CELLS,
        );
        assert_eq!((layout.area.x, layout.area.y), (11, 6));
    }

    #[test]
    fn anchor_at_u16_limit_is_clamped() {
        let layout = at(Rect::new(u16::MAX, 10, 4, 4), Placement::Bottom);
        assert_eq!(layout.area, Rect::new(1280 - 320 - 16, 30, 320, 200));
        assert_eq!(layout.spotlight, None);
        assert_eq!(
            layout.arrow,
            Some(Arrow { x: layout.area.right() - 2, y: 30, glyph: '▲' })
        );
    }

    #[test]
    fn arrow_faces_anchor() {
        let metrics = PlacementMetrics::CELLS;
        let viewport = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(30, 2, 10, 1);
        let tip = Size::new(20, 6);

        let below = place(Some(anchor), Placement::Bottom, tip, viewport, metrics);
        assert_eq!(below.arrow, Some(Arrow { x: 35, y: below.area.y, glyph: '▲' }));

        let above = place(Some(Rect::new(30, 15, 10, 1)), Placement::Top, tip, viewport, metrics);
        assert_eq!(above.arrow.map(|a| (a.y, a.glyph)), Some((above.area.bottom() - 1, '▼')));

        let left = place(Some(Rect::new(50, 10, 4, 2)), Placement::Left, tip, viewport, metrics);
        assert_eq!(left.arrow.map(|a| (a.x, a.glyph)), Some((left.area.right() - 1, '▶')));

        let right = place(Some(Rect::new(5, 10, 4, 2)), Placement::Right, tip, viewport, metrics);
        assert_eq!(right.arrow.map(|a| (a.x, a.glyph)), Some((right.area.x, '◀')));
    }
}
