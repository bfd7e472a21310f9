pub(crate) mod chips;
pub(crate) mod frame;
pub(crate) mod icons;
pub(crate) mod location;
pub(crate) mod shapes;
pub(crate) mod supersample;
pub(crate) mod text;

pub use frame::FrameRGBA;
pub use location::LocationOverlay;
pub use text::{
    FONT_CANDIDATES, FONT_SIZE_GEAR, FONT_SIZE_LOCATION, FONT_SIZE_SPEED, FONT_SIZE_UNIT,
    FontSource, ParleyText, TextExtent, TextPainter,
};
