mod frame_clock;

pub use frame_clock::{clamp_timestep, FrameClock};
