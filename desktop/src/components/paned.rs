use dioxus::document;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;

/// Thickness of the draggable divider in pixels (matches `.paned-handle` in main.css)
pub const HANDLE_SIZE: f64 = 6.0;

/// Axis along which a [`Paned`] splits its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// First child on the left, second on the right
    Horizontal,
    /// First child on top, second below
    Vertical,
}

impl Orientation {
    fn class(self) -> &'static str {
        match self {
            Self::Horizontal => "paned-horizontal",
            Self::Vertical => "paned-vertical",
        }
    }

    /// Mouse event coordinate that moves the divider
    fn page_axis(self) -> &'static str {
        match self {
            Self::Horizontal => "pageX",
            Self::Vertical => "pageY",
        }
    }

    /// Bounding rect dimension the divider moves within
    fn extent_property(self) -> &'static str {
        match self {
            Self::Horizontal => "width",
            Self::Vertical => "height",
        }
    }

    fn pick(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Horizontal => x,
            Self::Vertical => y,
        }
    }
}

/// Keep both children at least `min_child` pixels along an axis of `extent`.
///
/// When the container is too small for both minimums the first child wins.
pub fn clamp_position(position: f64, extent: f64, min_child: f64) -> f64 {
    let upper = (extent - HANDLE_SIZE - min_child).max(min_child);
    if position.is_nan() {
        return min_child;
    }
    position.clamp(min_child, upper)
}

/// Only the primary button moves the divider
fn starts_drag(button: Option<MouseButton>) -> bool {
    button == Some(MouseButton::Primary)
}

#[derive(serde::Deserialize)]
struct DragMessage {
    r#type: String,
    coordinate: Option<f64>,
    extent: Option<f64>,
}

fn measure_script(id: &str, orientation: Orientation) -> String {
    let dimension = orientation.extent_property();
    indoc::formatdoc! {r#"
        const paned = document.getElementById("{id}");
        return paned ? paned.getBoundingClientRect().{dimension} : null;
    "#}
}

fn drag_script(id: &str, orientation: Orientation) -> String {
    let axis = orientation.page_axis();
    let dimension = orientation.extent_property();
    indoc::formatdoc! {r#"
        new Promise((resolve) => {{
            const paned = document.getElementById("{id}");
            const handleMouseMove = (e) => {{
                const extent = paned ? paned.getBoundingClientRect().{dimension} : null;
                dioxus.send({{ type: 'move', coordinate: e.{axis}, extent }});
            }};
            const handleMouseUp = () => {{
                document.removeEventListener('mousemove', handleMouseMove);
                document.removeEventListener('mouseup', handleMouseUp);
                dioxus.send({{ type: 'end' }});
                resolve();
            }};
            document.addEventListener('mousemove', handleMouseMove);
            document.addEventListener('mouseup', handleMouseUp);
        }})
    "#}
}

/// Split container with a draggable divider.
///
/// `position` is the extent of the first child in pixels. It is updated live
/// while dragging and `on_moved` fires with the final value on mouse release.
#[component]
pub fn Paned(
    id: String,
    orientation: Orientation,
    position: Signal<f64>,
    min_child_extent: f64,
    on_moved: EventHandler<f64>,
    first: Element,
    second: Element,
) -> Element {
    let mut position = position;
    let mut is_resizing = use_signal(|| false);

    let measure = measure_script(&id, orientation);
    let drag = drag_script(&id, orientation);

    // Clamp the restored position to the real container extent on mount
    use_effect(move || {
        let measure = measure.clone();
        spawn(async move {
            let extent = document::eval(&measure)
                .await
                .ok()
                .and_then(|v| v.as_f64());

            if let Some(extent) = extent {
                let current = *position.peek();
                let clamped = clamp_position(current, extent, min_child_extent);
                if clamped != current {
                    tracing::debug!(current, clamped, extent, "Clamping divider to container");
                    position.set(clamped);
                }
            }
        });
    });

    let basis = *position.read();
    let orientation_class = orientation.class();

    rsx! {
        div {
            id: "{id}",
            class: "paned {orientation_class}",
            class: if is_resizing() { "resizing" },

            div {
                class: "paned-child paned-first",
                style: "flex-basis: {basis}px;",
                {first}
            }

            div {
                class: "paned-handle",
                onmousedown: move |evt| {
                    if !starts_drag(evt.data().trigger_button()) {
                        return;
                    }
                    evt.prevent_default();
                    is_resizing.set(true);
                    let coordinates = evt.page_coordinates();
                    let start = orientation.pick(coordinates.x, coordinates.y);
                    let start_position = *position.read();
                    let drag = drag.clone();

                    spawn(async move {
                        let mut eval = document::eval(&drag);

                        while let Ok(msg) = eval.recv::<DragMessage>().await {
                            match msg.r#type.as_str() {
                                "move" => {
                                    if let (Some(coordinate), Some(extent)) = (msg.coordinate, msg.extent) {
                                        let delta = coordinate - start;
                                        position.set(clamp_position(
                                            start_position + delta,
                                            extent,
                                            min_child_extent,
                                        ));
                                    }
                                }
                                "end" => {
                                    is_resizing.set(false);
                                    on_moved.call(*position.read());
                                    break;
                                }
                                _ => {}
                            }
                        }
                    });
                }
            }

            div {
                class: "paned-child paned-second",
                {second}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_position_within_bounds() {
        assert_eq!(clamp_position(300.0, 1000.0, 50.0), 300.0);
    }

    #[test]
    fn test_clamp_position_keeps_minimum_for_first_child() {
        assert_eq!(clamp_position(10.0, 1000.0, 50.0), 50.0);
        assert_eq!(clamp_position(-40.0, 1000.0, 50.0), 50.0);
    }

    #[test]
    fn test_clamp_position_keeps_minimum_for_second_child() {
        assert_eq!(clamp_position(990.0, 1000.0, 50.0), 1000.0 - HANDLE_SIZE - 50.0);
    }

    #[test]
    fn test_clamp_position_tiny_container() {
        assert_eq!(clamp_position(30.0, 60.0, 50.0), 50.0);
        assert_eq!(clamp_position(f64::NAN, 600.0, 50.0), 50.0);
    }

    #[test]
    fn test_only_primary_button_starts_drag() {
        assert!(starts_drag(Some(MouseButton::Primary)));
        assert!(!starts_drag(Some(MouseButton::Secondary)));
        assert!(!starts_drag(Some(MouseButton::Auxiliary)));
        assert!(!starts_drag(None));
    }

    #[test]
    fn test_scripts_target_container_axis() {
        let script = drag_script("horizontal-paned", Orientation::Horizontal);
        assert!(script.contains(r#"getElementById("horizontal-paned")"#));
        assert!(script.contains("e.pageX"));
        assert!(script.contains(".width"));

        let script = measure_script("vertical-paned", Orientation::Vertical);
        assert!(script.contains(".height"));
        assert!(script.starts_with("const paned"));
    }
}
