// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/crop/gesture.rs
//
// Gesture translator: editor pointer, wheel and touch input to crop commands.

use serde::{Deserialize, Serialize};

use crate::constant::WHEEL_ZOOM_STEP;
use crate::domain::document::operations::crop::{CropCommand, CropModel, clamp_zoom};

/// A position in editor viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Raw input on the editor viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditorEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    /// Negative scrolls up and zooms in.
    Wheel { delta_y: f64 },
    /// `touches` lists every point currently on the surface.
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd { touches: Vec<Point> },
}

/// Whether the editor consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// Default action prevented, not propagated to ancestors.
    Captured,
    Ignored,
}

/// Crop commands produced by one editor event.
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    pub commands: Vec<CropCommand>,
    pub status: EventStatus,
}

impl Gesture {
    fn captured(commands: Vec<CropCommand>) -> Self {
        Self {
            commands,
            status: EventStatus::Captured,
        }
    }

    fn ignored() -> Self {
        Self {
            commands: Vec::new(),
            status: EventStatus::Ignored,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pinch {
    start_distance: f64,
    start_zoom: f64,
    last_mid: Point,
}

#[derive(Debug, Clone, Default)]
pub struct GestureTranslator {
    drag_anchor: Option<Point>,
    pinch: Option<Pinch>,
}

impl GestureTranslator {
    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Drop any gesture in progress.
    pub fn cancel(&mut self) {
        self.drag_anchor = None;
        self.pinch = None;
    }

    /// Translate one editor event. `draw_size` is the edge length of the
    /// crop preview inside the viewport.
    pub fn translate(&mut self, event: &EditorEvent, crop: &CropModel, draw_size: u32) -> Gesture {
        match event {
            EditorEvent::PointerDown { x, y } => {
                self.drag_anchor = Some(Point::new(*x, *y));
                Gesture::captured(Vec::new())
            }
            EditorEvent::PointerMove { x, y } => self.drag_to(Point::new(*x, *y), crop, draw_size),
            EditorEvent::PointerUp => {
                if self.drag_anchor.take().is_some() {
                    Gesture::captured(Vec::new())
                } else {
                    Gesture::ignored()
                }
            }
            EditorEvent::Wheel { delta_y } => Gesture::captured(wheel_zoom(*delta_y, crop)),
            EditorEvent::TouchStart { touches } => {
                match touches.as_slice() {
                    [] => {}
                    [only] => self.drag_anchor = Some(*only),
                    [first, second, ..] => {
                        self.pinch = Some(Pinch {
                            start_distance: first.distance(*second),
                            start_zoom: crop.zoom(),
                            last_mid: first.midpoint(*second),
                        });
                    }
                }
                Gesture::captured(Vec::new())
            }
            EditorEvent::TouchMove { touches } => match touches.as_slice() {
                [first, second, ..] if self.pinch.is_some() => {
                    self.pinch_to(*first, *second, crop, draw_size)
                }
                [only] => {
                    let mut gesture = self.drag_to(*only, crop, draw_size);
                    gesture.status = EventStatus::Captured;
                    gesture
                }
                _ => Gesture::captured(Vec::new()),
            },
            EditorEvent::TouchEnd { touches } => {
                if self.pinch.take().is_some() {
                    // Re-seat the drag on a finger left behind.
                    self.drag_anchor = match touches.as_slice() {
                        [only] => Some(*only),
                        _ => None,
                    };
                } else {
                    self.drag_anchor = None;
                }
                Gesture::captured(Vec::new())
            }
        }
    }

    /// Single-pointer drag. The delta is added to the center as is, so
    /// dragging right moves the crop window right.
    fn drag_to(&mut self, point: Point, crop: &CropModel, draw_size: u32) -> Gesture {
        let Some(last) = self.drag_anchor.replace(point) else {
            return Gesture::ignored();
        };
        if !crop.is_initialized() {
            return Gesture::captured(Vec::new());
        }

        let dx = crop.viewport_to_source(point.x - last.x, draw_size);
        let dy = crop.viewport_to_source(point.y - last.y, draw_size);
        Gesture::captured(vec![CropCommand::Pan { dx, dy }])
    }

    fn pinch_to(&mut self, first: Point, second: Point, crop: &CropModel, draw_size: u32) -> Gesture {
        let Some(pinch) = self.pinch.as_mut() else {
            return Gesture::captured(Vec::new());
        };

        let distance = first.distance(second);
        let start = if pinch.start_distance > 0.0 {
            pinch.start_distance
        } else {
            1.0
        };
        let zoom = clamp_zoom(pinch.start_zoom * distance / start).unwrap_or(pinch.start_zoom);

        let mid = first.midpoint(second);
        let (mdx, mdy) = (mid.x - pinch.last_mid.x, mid.y - pinch.last_mid.y);
        pinch.last_mid = mid;

        if !crop.is_initialized() {
            return Gesture::captured(Vec::new());
        }

        // Pan uses the zoom this frame has just set.
        let dx = crop.viewport_to_source_at(mdx, draw_size, zoom);
        let dy = crop.viewport_to_source_at(mdy, draw_size, zoom);
        Gesture::captured(vec![
            CropCommand::SetZoom { zoom },
            CropCommand::Pan { dx, dy },
        ])
    }
}

/// One wheel tick zooms by a fixed step about the current center.
fn wheel_zoom(delta_y: f64, crop: &CropModel) -> Vec<CropCommand> {
    // A purely horizontal scroll arrives with delta_y == 0 and must not zoom out.
    if delta_y == 0.0 || !delta_y.is_finite() || !crop.is_initialized() {
        return Vec::new();
    }
    let factor = if delta_y < 0.0 {
        1.0 + WHEEL_ZOOM_STEP
    } else {
        1.0 - WHEEL_ZOOM_STEP
    };
    vec![CropCommand::ScaleZoom { factor }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::operations::crop::FillMode;

    const DRAW: u32 = 352;

    fn crop() -> CropModel {
        let mut crop = CropModel::default();
        crop.init(800, 600, 100, FillMode::Cover);
        crop
    }

    fn pan_of(gesture: &Gesture) -> (f64, f64) {
        gesture
            .commands
            .iter()
            .find_map(|c| match c {
                CropCommand::Pan { dx, dy } => Some((*dx, *dy)),
                _ => None,
            })
            .expect("pan command")
    }

    #[test]
    fn drag_adds_delta_in_source_pixels() {
        let crop = crop();
        let mut gestures = GestureTranslator::default();

        gestures.translate(&EditorEvent::PointerDown { x: 10.0, y: 10.0 }, &crop, DRAW);
        let gesture =
            gestures.translate(&EditorEvent::PointerMove { x: 45.2, y: 10.0 }, &crop, DRAW);

        // 35.2 viewport px × 100/352 / (1/6) = 60 source px, same sign as the drag.
        let (dx, dy) = pan_of(&gesture);
        assert!((dx - 60.0).abs() < 1e-9, "dx = {dx}");
        assert_eq!(dy, 0.0);
        assert_eq!(gesture.status, EventStatus::Captured);
    }

    #[test]
    fn drag_deltas_are_incremental() {
        let crop = crop();
        let mut gestures = GestureTranslator::default();

        gestures.translate(&EditorEvent::PointerDown { x: 0.0, y: 0.0 }, &crop, DRAW);
        gestures.translate(&EditorEvent::PointerMove { x: 5.0, y: 0.0 }, &crop, DRAW);
        let second = gestures.translate(&EditorEvent::PointerMove { x: 6.0, y: 0.0 }, &crop, DRAW);

        let expected = crop.viewport_to_source(1.0, DRAW);
        assert!((pan_of(&second).0 - expected).abs() < 1e-12);
    }

    #[test]
    fn hover_without_press_is_ignored() {
        let crop = crop();
        let mut gestures = GestureTranslator::default();

        let gesture = gestures.translate(&EditorEvent::PointerMove { x: 1.0, y: 1.0 }, &crop, DRAW);

        assert_eq!(gesture.status, EventStatus::Ignored);
        assert!(gesture.commands.is_empty());

        gestures.translate(&EditorEvent::PointerDown { x: 0.0, y: 0.0 }, &crop, DRAW);
        gestures.translate(&EditorEvent::PointerUp, &crop, DRAW);
        let after = gestures.translate(&EditorEvent::PointerMove { x: 9.0, y: 9.0 }, &crop, DRAW);
        assert!(after.commands.is_empty());
    }

    #[test]
    fn wheel_steps_zoom_by_six_percent() {
        let crop = crop();
        let mut gestures = GestureTranslator::default();

        let zoom_in = gestures.translate(&EditorEvent::Wheel { delta_y: -120.0 }, &crop, DRAW);
        let zoom_out = gestures.translate(&EditorEvent::Wheel { delta_y: 3.0 }, &crop, DRAW);
        let sideways = gestures.translate(&EditorEvent::Wheel { delta_y: 0.0 }, &crop, DRAW);

        assert_eq!(
            zoom_in.commands,
            vec![CropCommand::ScaleZoom { factor: 1.0 + WHEEL_ZOOM_STEP }]
        );
        assert_eq!(
            zoom_out.commands,
            vec![CropCommand::ScaleZoom { factor: 1.0 - WHEEL_ZOOM_STEP }]
        );
        assert!(sideways.commands.is_empty());
        assert_eq!(sideways.status, EventStatus::Captured);
    }

    #[test]
    fn pinch_scales_zoom_by_distance_ratio() {
        let crop = crop();
        let mut gestures = GestureTranslator::default();

        gestures.translate(
            &EditorEvent::TouchStart {
                touches: vec![Point::new(100.0, 100.0), Point::new(200.0, 100.0)],
            },
            &crop,
            DRAW,
        );
        let gesture = gestures.translate(
            &EditorEvent::TouchMove {
                touches: vec![Point::new(50.0, 100.0), Point::new(250.0, 100.0)],
            },
            &crop,
            DRAW,
        );

        assert_eq!(gesture.commands[0], CropCommand::SetZoom { zoom: 2.0 });
        // Midpoint did not move.
        assert_eq!(pan_of(&gesture), (0.0, 0.0));
    }

    #[test]
    fn pinch_zoom_is_clamped() {
        let crop = crop();
        let mut gestures = GestureTranslator::default();

        gestures.translate(
            &EditorEvent::TouchStart {
                touches: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            },
            &crop,
            DRAW,
        );
        let gesture = gestures.translate(
            &EditorEvent::TouchMove {
                touches: vec![Point::new(0.0, 0.0), Point::new(1000.0, 0.0)],
            },
            &crop,
            DRAW,
        );

        assert_eq!(gesture.commands[0], CropCommand::SetZoom { zoom: 5.0 });
    }

    #[test]
    fn pinch_midpoint_pans_frame_to_frame_at_new_zoom() {
        let crop = crop();
        let mut gestures = GestureTranslator::default();
        let start = vec![Point::new(100.0, 100.0), Point::new(200.0, 100.0)];
        let shifted = vec![Point::new(110.0, 100.0), Point::new(210.0, 100.0)];
        let shifted_again = vec![Point::new(130.0, 100.0), Point::new(230.0, 100.0)];

        gestures.translate(&EditorEvent::TouchStart { touches: start }, &crop, DRAW);
        let first = gestures.translate(&EditorEvent::TouchMove { touches: shifted }, &crop, DRAW);
        let second =
            gestures.translate(&EditorEvent::TouchMove { touches: shifted_again }, &crop, DRAW);

        assert!((pan_of(&first).0 - crop.viewport_to_source_at(10.0, DRAW, 1.0)).abs() < 1e-12);
        assert!((pan_of(&second).0 - crop.viewport_to_source_at(20.0, DRAW, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn lifting_one_pinch_finger_reseats_drag() {
        let crop = crop();
        let mut gestures = GestureTranslator::default();

        gestures.translate(
            &EditorEvent::TouchStart {
                touches: vec![Point::new(0.0, 0.0)],
            },
            &crop,
            DRAW,
        );
        gestures.translate(
            &EditorEvent::TouchStart {
                touches: vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
            },
            &crop,
            DRAW,
        );
        gestures.translate(
            &EditorEvent::TouchEnd {
                touches: vec![Point::new(100.0, 0.0)],
            },
            &crop,
            DRAW,
        );
        assert!(!gestures.is_pinching());

        let gesture = gestures.translate(
            &EditorEvent::TouchMove {
                touches: vec![Point::new(101.0, 0.0)],
            },
            &crop,
            DRAW,
        );

        let expected = crop.viewport_to_source(1.0, DRAW);
        assert!((pan_of(&gesture).0 - expected).abs() < 1e-12);
    }

    #[test]
    fn events_before_image_load_produce_nothing() {
        let crop = CropModel::default();
        let mut gestures = GestureTranslator::default();

        gestures.translate(&EditorEvent::PointerDown { x: 0.0, y: 0.0 }, &crop, DRAW);
        let drag = gestures.translate(&EditorEvent::PointerMove { x: 9.0, y: 0.0 }, &crop, DRAW);
        let wheel = gestures.translate(&EditorEvent::Wheel { delta_y: -1.0 }, &crop, DRAW);

        assert!(drag.commands.is_empty());
        assert_eq!(drag.status, EventStatus::Captured);
        assert!(wheel.commands.is_empty());
    }

    #[test]
    fn events_deserialize_from_replay_json() {
        let events: Vec<EditorEvent> = serde_json::from_str(
            r#"[
                {"kind": "pointer_down", "x": 1, "y": 2},
                {"kind": "wheel", "delta_y": -120},
                {"kind": "touch_move", "touches": [{"x": 0, "y": 0}, {"x": 4, "y": 3}]},
                {"kind": "pointer_up"}
            ]"#,
        )
        .unwrap();

        assert_eq!(events[0], EditorEvent::PointerDown { x: 1.0, y: 2.0 });
        assert_eq!(events[3], EditorEvent::PointerUp);
    }
}
