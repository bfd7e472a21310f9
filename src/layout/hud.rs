use crate::foundation::core::{Canvas, Point, Rect};

pub(crate) const HUD_WIDTH: i64 = 520;
pub(crate) const HUD_HEIGHT: i64 = 60;
pub(crate) const HUD_MARGIN_TOP: i64 = 5;

/// Edge length of every square chip.
pub const CHIP_SIZE: i64 = 42;
pub(crate) const CHIP_GAP: i64 = 8;
pub(crate) const CHIP_GAP_WIDE: i64 = 14;
/// Keeps anti-aliased outlines of neighbouring elements from touching.
pub(crate) const CHIP_CLEARANCE: i64 = 2;

pub(crate) const SPEED_BLOCK_HALF_W: i64 = 60;
pub(crate) const SPEED_BLOCK_HALF_H: i64 = 28;
pub(crate) const SPEED_BLOCK_RAISE: i64 = 2;

const CHIPS_PER_GROUP: i64 = 3;

/// Which signal a chip shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChipKind {
    /// Left turn signal arrow.
    LeftBlinker,
    /// Gear letter.
    Gear,
    /// Brake pedal.
    Brake,
    /// Steering wheel.
    Wheel,
    /// Accelerator pedal.
    Throttle,
    /// Right turn signal arrow.
    RightBlinker,
}

/// Left-to-right draw order of the chips.
pub const CHIP_ORDER: [ChipKind; 6] = [
    ChipKind::LeftBlinker,
    ChipKind::Gear,
    ChipKind::Brake,
    ChipKind::Wheel,
    ChipKind::Throttle,
    ChipKind::RightBlinker,
];

/// A positioned chip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChipSlot {
    /// Signal shown in the slot.
    pub kind: ChipKind,
    /// Pixel-aligned chip box.
    pub rect: Rect,
}

/// Pixel positions of every HUD element for one canvas size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudLayout {
    /// Centre of the speed block.
    pub speed_center: Point,
    /// Speed block box.
    pub speed_box: Rect,
    /// Chips in [`CHIP_ORDER`].
    pub chips: [ChipSlot; 6],
}

impl HudLayout {
    /// Compute the layout. Depends only on the canvas size.
    pub fn compute(canvas: Canvas) -> Self {
        let hud_x = (i64::from(canvas.width) - HUD_WIDTH).div_euclid(2);
        let hud_y = HUD_MARGIN_TOP;

        let chip_y = hud_y + (HUD_HEIGHT - CHIP_SIZE).div_euclid(2);
        let speed_x = hud_x + HUD_WIDTH / 2;
        let speed_y = hud_y + HUD_HEIGHT / 2 - SPEED_BLOCK_RAISE;
        let speed_box = px_rect(
            speed_x - SPEED_BLOCK_HALF_W,
            speed_y - SPEED_BLOCK_HALF_H,
            speed_x + SPEED_BLOCK_HALF_W,
            speed_y + SPEED_BLOCK_HALF_H,
        );

        let group_w = CHIPS_PER_GROUP * CHIP_SIZE + (CHIPS_PER_GROUP - 1) * CHIP_GAP;
        let left_end = speed_box.x0 as i64 - CHIP_GAP_WIDE - CHIP_CLEARANCE;
        let left_start = left_end - group_w;
        let right_start = speed_box.x1 as i64 + CHIP_GAP_WIDE + CHIP_CLEARANCE;

        let chips = CHIP_ORDER.map(|kind| {
            let (group_start, idx) = match kind {
                ChipKind::LeftBlinker => (left_start, 0),
                ChipKind::Gear => (left_start, 1),
                ChipKind::Brake => (left_start, 2),
                ChipKind::Wheel => (right_start, 0),
                ChipKind::Throttle => (right_start, 1),
                ChipKind::RightBlinker => (right_start, 2),
            };
            let x = group_start + idx * (CHIP_SIZE + CHIP_GAP);
            ChipSlot {
                kind,
                rect: px_rect(x, chip_y, x + CHIP_SIZE, chip_y + CHIP_SIZE),
            }
        });

        Self {
            speed_center: Point::new(speed_x as f64, speed_y as f64),
            speed_box,
            chips,
        }
    }

    /// Slot for one chip kind.
    pub fn chip(&self, kind: ChipKind) -> ChipSlot {
        self.chips
            .iter()
            .copied()
            .find(|c| c.kind == kind)
            .unwrap_or(self.chips[0])
    }
}

fn px_rect(x0: i64, y0: i64, x1: i64, y1: i64) -> Rect {
    Rect::new(x0 as f64, y0 as f64, x1 as f64, y1 as f64)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/hud.rs"]
mod tests;
