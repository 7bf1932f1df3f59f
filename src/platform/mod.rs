pub mod headless;
mod input;

pub use headless::{CalloopScheduler, RedrawTarget, RunSummary};
pub use input::{Event, EventResponse, MouseButton};

pub use calloop::channel::{channel as input_channel, Channel, Sender};
