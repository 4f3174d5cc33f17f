// Copyright 2025 the Scout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-versus-drag detection for the primary pointer button.
//!
//! The same button both rotates the camera and picks, so a plain press only
//! picks once it is released without having moved. A press with the append
//! modifier picks immediately and swallows its release.

use kurbo::Point;

/// Primary-button pointer input, in screen pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    /// Button pressed.
    Down {
        /// Pointer position.
        at: Point,
        /// The append-selection modifier is held.
        append: bool,
    },
    /// Pointer moved.
    Move {
        /// Pointer position.
        at: Point,
    },
    /// Button released.
    Up {
        /// Pointer position.
        at: Point,
    },
}

/// A pick the gesture tracker wants performed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickRequest {
    /// Where to pick.
    pub at: Point,
    /// Whether to append to the selection.
    pub append: bool,
}

/// Tracks one press/release cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ClickGesture {
    /// Press position of a plain press that has not moved yet.
    armed: Option<Point>,
    inhibit_release: bool,
    drag_threshold: f64,
}

impl ClickGesture {
    /// A tracker that treats travel beyond `drag_threshold` pixels as a drag.
    pub fn new(drag_threshold: f64) -> Self {
        Self {
            drag_threshold,
            ..Self::default()
        }
    }

    /// True while a plain press waits for its release.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Feed an event; returns the pick to perform, if any.
    pub fn on_event(&mut self, event: PointerEvent) -> Option<PickRequest> {
        match event {
            PointerEvent::Down { at, append: true } => {
                self.armed = None;
                self.inhibit_release = true;
                Some(PickRequest { at, append: true })
            }
            PointerEvent::Down { at, append: false } => {
                self.armed = Some(at);
                self.inhibit_release = false;
                None
            }
            PointerEvent::Move { at } => {
                if let Some(origin) = self.armed
                    && origin.distance(at) > self.drag_threshold
                {
                    log::trace!("gesture: press became a drag");
                    self.armed = None;
                }
                None
            }
            PointerEvent::Up { at } => {
                if core::mem::take(&mut self.inhibit_release) {
                    self.armed = None;
                    return None;
                }
                self.armed
                    .take()
                    .map(|_| PickRequest { at, append: false })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Point = Point::new(10.0, 20.0);

    #[test]
    fn click_picks_on_release() {
        let mut g = ClickGesture::new(0.0);
        assert_eq!(g.on_event(PointerEvent::Down { at: P, append: false }), None);
        assert!(g.is_armed());
        assert_eq!(
            g.on_event(PointerEvent::Up { at: P }),
            Some(PickRequest {
                at: P,
                append: false
            })
        );
        assert!(!g.is_armed());
    }

    #[test]
    fn drag_cancels_the_pick() {
        let mut g = ClickGesture::new(0.0);
        g.on_event(PointerEvent::Down { at: P, append: false });
        g.on_event(PointerEvent::Move {
            at: Point::new(11.0, 20.0),
        });
        assert_eq!(g.on_event(PointerEvent::Up { at: P }), None);
    }

    #[test]
    fn jitter_below_threshold_still_clicks() {
        let mut g = ClickGesture::new(3.0);
        g.on_event(PointerEvent::Down { at: P, append: false });
        g.on_event(PointerEvent::Move {
            at: Point::new(12.0, 21.0),
        });
        assert!(g.on_event(PointerEvent::Up { at: P }).is_some());
    }

    #[test]
    fn modifier_press_picks_at_once_and_swallows_release() {
        let mut g = ClickGesture::new(0.0);
        assert_eq!(
            g.on_event(PointerEvent::Down { at: P, append: true }),
            Some(PickRequest { at: P, append: true })
        );
        assert_eq!(g.on_event(PointerEvent::Up { at: P }), None);
        // The next plain click works again.
        g.on_event(PointerEvent::Down { at: P, append: false });
        assert!(g.on_event(PointerEvent::Up { at: P }).is_some());
    }

    #[test]
    fn stray_release_does_nothing() {
        let mut g = ClickGesture::default();
        assert_eq!(g.on_event(PointerEvent::Up { at: P }), None);
    }
}
