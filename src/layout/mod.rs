pub(crate) mod hud;

pub use hud::{CHIP_ORDER, CHIP_SIZE, ChipKind, ChipSlot, HudLayout};
