/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input delivered by the host. Only a primary press does anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Pointer moved
    MouseMove { x: f32, y: f32 },
    /// Button pressed (touch down maps to `Left`)
    MouseDown { x: f32, y: f32, button: MouseButton },
    /// Button released
    MouseUp { x: f32, y: f32, button: MouseButton },
    /// Pointer left the surface
    MouseLeave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    Handled,
}

impl Event {
    /// A primary press at the given position.
    pub fn tap(x: f32, y: f32) -> Self {
        Event::MouseDown {
            x,
            y,
            button: MouseButton::Left,
        }
    }
}
