/// Before/after comparison slider
///
/// Renders the original and the enhanced photo as two perfectly aligned
/// layers; the enhanced layer is clipped to the region left of a draggable
/// vertical boundary. The boundary position is a percentage of the widget
/// width, recomputed from live geometry on every move so window resizes
/// never cause jumps. Dragging keeps tracking the pointer after it leaves
/// the widget, and the drag ends wherever the button or finger is released.

use iced::mouse::{self, Cursor};
use iced::touch;
use iced::widget::canvas::{self, Program};
use iced::widget::image;
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use crate::state::app::RESET_POSITION;
use crate::Message;

/// The comparison slider canvas program
pub struct CompareSlider {
    pub original: image::Handle,
    pub enhanced: image::Handle,
    /// Clip boundary as a percentage of the widget width, in [0, 100]
    pub position: f32,
}

/// Per-widget interaction state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    pub dragging: bool,
    /// The finger that started the drag; contacts from any other finger
    /// are ignored
    pub finger: Option<touch::Finger>,
}

/// Convert a horizontal pointer coordinate into a boundary percentage.
/// The offset is clamped to the widget edges before being expressed as a
/// percentage, so any coordinate maps into [0, 100].
pub fn position_from_x(x: f32, bounds: &Rectangle) -> f32 {
    if bounds.width <= 0.0 {
        return RESET_POSITION;
    }

    let offset = (x - bounds.x).clamp(0.0, bounds.width);
    offset / bounds.width * 100.0
}

impl Program<Message> for CompareSlider {
    type State = DragState;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            // Mouse press inside the widget starts dragging and moves the
            // boundary straight to the pointer
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_over(bounds) {
                    state.dragging = true;
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::SliderMoved(position_from_x(position.x, &bounds))),
                    );
                }
            }

            // While dragging, follow the cursor even outside the widget
            canvas::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if state.dragging {
                    if let Some(position) = cursor.position() {
                        return (
                            canvas::event::Status::Captured,
                            Some(Message::SliderMoved(position_from_x(position.x, &bounds))),
                        );
                    }
                }
            }

            // Release anywhere ends the drag; the boundary stays put
            canvas::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if state.dragging {
                    state.dragging = false;
                    return (canvas::event::Status::Captured, None);
                }
            }

            canvas::Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if state.finger.is_none() && bounds.contains(position) {
                    state.finger = Some(id);
                    state.dragging = true;
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::SliderMoved(position_from_x(position.x, &bounds))),
                    );
                }
            }

            canvas::Event::Touch(touch::Event::FingerMoved { id, position }) => {
                if state.finger == Some(id) {
                    return (
                        canvas::event::Status::Captured,
                        Some(Message::SliderMoved(position_from_x(position.x, &bounds))),
                    );
                }
            }

            canvas::Event::Touch(touch::Event::FingerLifted { id, .. })
            | canvas::Event::Touch(touch::Event::FingerLost { id, .. }) => {
                if state.finger == Some(id) {
                    state.finger = None;
                    state.dragging = false;
                    return (canvas::event::Status::Captured, None);
                }
            }

            _ => {}
        }

        (canvas::event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let full = Rectangle::with_size(bounds.size());

        // Original underneath, always fully drawn
        frame.draw_image(full, canvas::Image::new(self.original.clone()));

        // Enhanced on top, clipped to the region left of the boundary
        let split = bounds.width * (self.position / 100.0);
        if split > 0.0 {
            frame.with_clip(
                Rectangle::new(Point::ORIGIN, Size::new(split, bounds.height)),
                |frame| {
                    frame.draw_image(full, canvas::Image::new(self.enhanced.clone()));
                },
            );
        }

        // Boundary line with a round drag handle
        frame.fill_rectangle(
            Point::new(split - 1.0, 0.0),
            Size::new(2.0, bounds.height),
            Color::from_rgba(1.0, 1.0, 1.0, 0.75),
        );
        let handle = canvas::Path::circle(Point::new(split, bounds.height / 2.0), 14.0);
        frame.fill(&handle, Color::WHITE);

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if state.dragging || cursor.is_over(bounds) {
            mouse::Interaction::ResizingHorizontally
        } else {
            mouse::Interaction::default()
        }
    }
}
