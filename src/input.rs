//! Translates terminal mouse events into pointer updates for the engine.

use crate::engine::SimulationEngine;
use crate::error::Result;
use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};

/// Pointer state change carried by a terminal event, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Moved { x: f32, y: f32 },
    Up,
}

impl PointerEvent {
    /// Returns `None` for events that do not concern the pointer.
    pub fn from_event(event: &Event) -> Option<Self> {
        let Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) = event
        else {
            return None;
        };

        // Half-block rendering: one terminal row is two surface pixels.
        let x = *column as f32;
        let y = *row as f32 * 2.0;

        match kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Self::Down { x, y }),
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                Some(Self::Moved { x, y })
            }
            MouseEventKind::Up(MouseButton::Left) => Some(Self::Up),
            _ => None,
        }
    }

    pub fn apply(self, engine: &mut SimulationEngine) -> Result<()> {
        match self {
            Self::Down { x, y } => engine.pointer_down(x, y),
            Self::Moved { x, y } => engine.pointer_moved(x, y),
            Self::Up => {
                engine.pointer_up();
                Ok(())
            }
        }
    }
}
