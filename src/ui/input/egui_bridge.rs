//! Translation of one egui frame's input into timeline events.

use egui::{Event, InputState, MouseWheelUnit, PointerButton, Pos2, Rect};

use super::TimelineEvent;

/// Collects the timeline events of this frame, in widget coordinates.
///
/// Presses outside `widget` are ignored; releases and moves are always
/// forwarded so a captured gesture can finish outside the widget. Wheel
/// input is only taken while the pointer hovers the widget.
pub fn collect_events(input: &InputState, widget: Rect) -> Vec<TimelineEvent> {
    let to_local = |pos: Pos2| pos - widget.min.to_vec2();
    let hovered = input
        .pointer
        .hover_pos()
        .is_some_and(|pos| widget.contains(pos));
    let mut events = Vec::new();

    for event in &input.events {
        match event {
            Event::PointerButton {
                pos,
                button,
                pressed,
                modifiers,
                ..
            } => {
                if *pressed {
                    if widget.contains(*pos) {
                        events.push(TimelineEvent::PointerDown {
                            pos: to_local(*pos),
                            button: *button,
                            modifiers: *modifiers,
                        });
                    }
                } else {
                    events.push(TimelineEvent::PointerUp {
                        pos: to_local(*pos),
                        button: *button,
                        modifiers: *modifiers,
                    });
                }
            }
            Event::PointerMoved(pos) => events.push(TimelineEvent::PointerMove {
                pos: to_local(*pos),
                modifiers: input.modifiers,
            }),
            Event::PointerGone => events.push(TimelineEvent::PointerLeave),
            Event::MouseWheel {
                unit,
                delta,
                modifiers,
                ..
            } if hovered => {
                // egui reports wheel-up as positive, the timeline scrolls
                // towards later frames on positive deltas
                events.push(TimelineEvent::Wheel {
                    delta: -*delta,
                    precise: matches!(unit, MouseWheelUnit::Point),
                    modifiers: *modifiers,
                });
            }
            Event::Key {
                key,
                pressed,
                repeat: false,
                modifiers,
                ..
            } => {
                let event = if *pressed {
                    TimelineEvent::KeyDown {
                        key: *key,
                        modifiers: *modifiers,
                    }
                } else {
                    TimelineEvent::KeyUp {
                        key: *key,
                        modifiers: *modifiers,
                    }
                };
                events.push(event);
            }
            Event::Zoom(factor) if hovered => events.push(TimelineEvent::TouchMagnify {
                magnification: factor - 1.0,
            }),
            Event::WindowFocused(false) => events.push(TimelineEvent::CaptureLost),
            _ => {}
        }
    }

    for button in [PointerButton::Primary, PointerButton::Secondary] {
        if !input.pointer.button_double_clicked(button) {
            continue;
        }
        if let Some(pos) = input.pointer.interact_pos().filter(|pos| widget.contains(*pos)) {
            events.push(TimelineEvent::DoubleClick {
                pos: to_local(pos),
                button,
                modifiers: input.modifiers,
            });
        }
    }
    events
}
