mod animator;
mod scale_state;

pub use animator::{AnimatorController, FrameScheduler};
pub use scale_state::{mirror_value, scale_factor, update_scale, Phase, ScaleState};
