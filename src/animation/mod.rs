pub mod tick_timer;
pub mod trailing_offset;

pub use tick_timer::{TickTimer, DEFAULT_TICK_PERIOD};
pub use trailing_offset::{TrailingOffset, DEFAULT_SMOOTHING};
