//! Pointer/keyboard dispatch onto the editing model.
//!
//! [`Controller`] owns the state of the gesture in progress (which vertex is
//! being dragged, which handle is hovered, whether the delete modifier is held)
//! and maps each [`InputEvent`] onto at most one editor operation. The polygon
//! itself is passed in by the caller on every dispatch.

use derive_more::Display;
use log::debug;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    editor::Polygon,
    error::Result,
    geometry::{distance::squared_distance, r2::R2},
};

/// Radius of a drawn vertex handle, in editor units.
pub const HANDLE_RADIUS: f64 = 3.0;

pub const TINT_IDLE: u32 = 0xffffff;
pub const TINT_HOVER: u32 = 0x00ff00;
pub const TINT_DELETE: u32 = 0xff0000;

/// Input events, already translated into editor coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(tag = "type")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerUpOutside,
    /// Delete modifier (ctrl) pressed or released.
    Modifier { held: bool },
}

/// The editor operation an event resulted in.
#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(tag = "type")]
pub enum Action {
    #[display(fmt = "inserted vertex at {}", index)]
    Inserted { index: usize },
    #[display(fmt = "removed vertex at {}", index)]
    Removed { index: usize },
    #[display(fmt = "moved vertex at {}", index)]
    Moved { index: usize },
    #[display(fmt = "started dragging {}", index)]
    DragStarted { index: usize },
    #[display(fmt = "stopped dragging")]
    DragEnded,
    #[display(fmt = "hover {:?}", index)]
    Hover { index: Option<usize> },
    #[display(fmt = "none")]
    None,
}

/// Result of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub action: Action,
    /// Vertex count changed: offsets shifted and handles must be regenerated.
    pub rebuild_handles: bool,
    /// The points should be written back to storage.
    pub persist: bool,
}

impl Outcome {
    fn new(action: Action) -> Self {
        let rebuild_handles = matches!(action, Action::Inserted { .. } | Action::Removed { .. });
        let persist = rebuild_handles || action == Action::DragEnded;
        Outcome { action, rebuild_handles, persist }
    }
}

/// Gesture state for one polygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Controller {
    pub drag: Option<usize>,
    pub hover: Option<usize>,
    pub modifier: bool,
}

/// Offset of the topmost vertex handle containing `(x, y)`.
///
/// Handles are drawn in offset order, so where they overlap the one with the
/// highest offset is on top and takes the pointer.
pub fn hit_test(polygon: &Polygon, x: f64, y: f64) -> Option<usize> {
    let p = R2::new(x, y);
    let r2 = HANDLE_RADIUS * HANDLE_RADIUS;
    polygon
        .offsets()
        .zip(polygon.vertices())
        .filter(|(_, v)| squared_distance(&p, v) <= r2)
        .last()
        .map(|(i, _)| i)
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, polygon: &mut Polygon, event: InputEvent) -> Result<Outcome> {
        let action = match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(polygon, x, y)?,
            InputEvent::PointerMove { x, y } => self.pointer_move(polygon, x, y)?,
            InputEvent::PointerUp | InputEvent::PointerUpOutside => self.pointer_up(),
            InputEvent::Modifier { held } => {
                self.modifier = held;
                Action::None
            }
        };
        debug!("{:?} -> {}", event, action);
        Ok(Outcome::new(action))
    }

    fn pointer_down(&mut self, polygon: &mut Polygon, x: f64, y: f64) -> Result<Action> {
        if let Some(index) = hit_test(polygon, x, y) {
            if self.modifier {
                polygon.remove_vertex(index)?;
                // Offsets after `index` moved; stale hover/drag would point at the wrong vertex
                self.hover = None;
                self.drag = None;
                return Ok(Action::Removed { index });
            }
            self.drag = Some(index);
            return Ok(Action::DragStarted { index });
        }
        let index = polygon.insert_vertex(x, y);
        self.drag = Some(index);
        self.hover = None;
        Ok(Action::Inserted { index })
    }

    fn pointer_move(&mut self, polygon: &mut Polygon, x: f64, y: f64) -> Result<Action> {
        match self.drag {
            Some(index) => {
                polygon.move_vertex(index, x, y)?;
                Ok(Action::Moved { index })
            }
            None => {
                let hover = hit_test(polygon, x, y);
                if hover == self.hover {
                    return Ok(Action::None);
                }
                self.hover = hover;
                Ok(Action::Hover { index: hover })
            }
        }
    }

    fn pointer_up(&mut self) -> Action {
        match self.drag.take() {
            Some(_) => Action::DragEnded,
            None => Action::None,
        }
    }

    /// Tint for the handle at `index`: red while hovered with the delete
    /// modifier held, green while hovered otherwise.
    pub fn handle_tint(&self, index: usize) -> u32 {
        match (self.hover == Some(index), self.modifier) {
            (true, true) => TINT_DELETE,
            (true, false) => TINT_HOVER,
            _ => TINT_IDLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn square() -> Polygon {
        Polygon::try_from(vec![0., 0., 10., 0., 10., 10., 0., 10.]).unwrap()
    }

    #[test]
    fn test_click_inserts_and_drags() {
        let mut polygon = square();
        let mut c = Controller::new();

        let outcome = c.dispatch(&mut polygon, InputEvent::PointerDown { x: 5., y: -0.5 }).unwrap();
        assert_eq!(outcome, Outcome { action: Action::Inserted { index: 2 }, rebuild_handles: true, persist: true });
        assert_eq!(c.drag, Some(2));

        let outcome = c.dispatch(&mut polygon, InputEvent::PointerMove { x: 5., y: -4. }).unwrap();
        assert_eq!(outcome.action, Action::Moved { index: 2 });
        assert!(!outcome.rebuild_handles);
        assert!(!outcome.persist);
        assert_eq!(polygon.vertex(2).unwrap(), R2::new(5., -4.));

        let outcome = c.dispatch(&mut polygon, InputEvent::PointerUp).unwrap();
        assert_eq!(outcome.action, Action::DragEnded);
        assert!(outcome.persist);
        assert_eq!(c.drag, None);

        assert_eq!(polygon.points(), &[0., 0., 5., -4., 10., 0., 10., 10., 0., 10.]);
    }

    #[test]
    fn test_drag_existing_vertex() {
        let mut polygon = square();
        let mut c = Controller::new();

        let outcome = c.dispatch(&mut polygon, InputEvent::PointerDown { x: 9., y: 11. }).unwrap();
        assert_eq!(outcome.action, Action::DragStarted { index: 4 });
        assert!(!outcome.rebuild_handles);

        c.dispatch(&mut polygon, InputEvent::PointerMove { x: 20., y: 20. }).unwrap();
        c.dispatch(&mut polygon, InputEvent::PointerUpOutside).unwrap();
        assert_eq!(polygon.points(), &[0., 0., 10., 0., 20., 20., 0., 10.]);
        assert_eq!(c.drag, None);
    }

    #[test]
    fn test_modifier_click_removes() {
        let mut polygon = square();
        let mut c = Controller::new();

        c.dispatch(&mut polygon, InputEvent::Modifier { held: true }).unwrap();
        let outcome = c.dispatch(&mut polygon, InputEvent::PointerDown { x: 10., y: 1. }).unwrap();
        assert_eq!(outcome, Outcome { action: Action::Removed { index: 2 }, rebuild_handles: true, persist: true });
        assert_eq!(polygon.points(), &[0., 0., 10., 10., 0., 10.]);
        assert_eq!(c.drag, None);

        // Away from any handle, a modified click still inserts
        let outcome = c.dispatch(&mut polygon, InputEvent::PointerDown { x: 5., y: 12. }).unwrap();
        assert_eq!(outcome.action, Action::Inserted { index: 4 });
    }

    #[test]
    fn test_hover_and_tint() {
        let mut polygon = square();
        let mut c = Controller::new();

        let outcome = c.dispatch(&mut polygon, InputEvent::PointerMove { x: 1., y: 1. }).unwrap();
        assert_eq!(outcome.action, Action::Hover { index: Some(0) });
        assert_eq!(c.handle_tint(0), TINT_HOVER);
        assert_eq!(c.handle_tint(2), TINT_IDLE);

        // Unchanged hover is not reported again
        let outcome = c.dispatch(&mut polygon, InputEvent::PointerMove { x: 0.5, y: 0. }).unwrap();
        assert_eq!(outcome.action, Action::None);

        c.dispatch(&mut polygon, InputEvent::Modifier { held: true }).unwrap();
        assert_eq!(c.handle_tint(0), TINT_DELETE);

        let outcome = c.dispatch(&mut polygon, InputEvent::PointerMove { x: 5., y: 5. }).unwrap();
        assert_eq!(outcome.action, Action::Hover { index: None });
        assert_eq!(c.handle_tint(0), TINT_IDLE);
    }

    #[test]
    fn test_first_click_on_empty() {
        let mut polygon = Polygon::new();
        let mut c = Controller::new();
        let outcome = c.dispatch(&mut polygon, InputEvent::PointerDown { x: 3., y: 4. }).unwrap();
        assert_eq!(outcome.action, Action::Inserted { index: 0 });
        c.dispatch(&mut polygon, InputEvent::PointerUp).unwrap();

        // Clicking the same spot again grabs the existing handle
        let outcome = c.dispatch(&mut polygon, InputEvent::PointerDown { x: 4., y: 4. }).unwrap();
        assert_eq!(outcome.action, Action::DragStarted { index: 0 });
        assert_eq!(polygon.points(), &[3., 4.]);
    }

    #[test]
    fn test_overlapping_handles_pick_topmost() {
        let mut polygon = Polygon::try_from(vec![0., 0., 2., 0., 50., 50.]).unwrap();
        assert_eq!(hit_test(&polygon, 1., 0.), Some(2));
        assert_eq!(hit_test(&polygon, -2., 0.), Some(0));
        assert_eq!(hit_test(&polygon, 25., 25.), None);

        let mut c = Controller::new();
        let outcome = c.dispatch(&mut polygon, InputEvent::PointerDown { x: 1., y: 0. }).unwrap();
        assert_eq!(outcome.action, Action::DragStarted { index: 2 });

        c.dispatch(&mut polygon, InputEvent::Modifier { held: true }).unwrap();
        c.dispatch(&mut polygon, InputEvent::PointerUp).unwrap();
        let outcome = c.dispatch(&mut polygon, InputEvent::PointerDown { x: 1., y: 0. }).unwrap();
        assert_eq!(outcome.action, Action::Removed { index: 2 });
        assert_eq!(polygon.points(), &[0., 0., 50., 50.]);
    }

    #[test]
    fn test_stale_drag_is_rejected() {
        let mut polygon = square();
        let mut c = Controller { drag: Some(8), ..Controller::default() };
        assert!(c.dispatch(&mut polygon, InputEvent::PointerMove { x: 1., y: 1. }).is_err());
        assert_eq!(polygon, square());
    }

    #[test]
    fn test_event_json() {
        let event: InputEvent = serde_json::from_str(r#"{"type": "PointerDown", "x": 1, "y": 2}"#).unwrap();
        assert_eq!(event, InputEvent::PointerDown { x: 1., y: 2. });
        let event: InputEvent = serde_json::from_str(r#"{"type": "Modifier", "held": true}"#).unwrap();
        assert_eq!(event, InputEvent::Modifier { held: true });
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Inserted { index: 4 }.to_string(), "inserted vertex at 4");
        assert_eq!(Action::DragEnded.to_string(), "stopped dragging");
    }
}
