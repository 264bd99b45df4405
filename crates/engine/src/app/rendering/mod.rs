mod font;
mod recording;
mod surface;

pub use recording::{RecordingSurface, SurfaceOp};
pub use surface::{PixelSurface, Surface, CLEAR_COLOR, INK_COLOR};
