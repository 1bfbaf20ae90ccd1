// Canvas pointer handling: drag to orbit, wheel to change the camera depth.

use crate::constants::WHEEL_ZOOM_STEP;
use crate::dom;
use crate::effects::Runtime;
use crate::input::{self, DragState};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use typeloop_core::{Control, ControlEvent};
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub canvas: web::HtmlCanvasElement,
    pub drag: Rc<RefCell<DragState>>,
    pub runtime: Runtime,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

#[inline]
fn pointer_css_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

fn wire_pointerdown(w: &PointerWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_listener(&target, "pointerdown", move |ev| {
        let Ok(ev) = ev.dyn_into::<web::PointerEvent>() else {
            return;
        };
        // primary button only
        if ev.button() != 0 {
            return;
        }
        let pos = pointer_css_px(&ev, &w.canvas);
        w.drag.borrow_mut().begin(ev.pointer_id(), pos);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    });
}

fn wire_pointermove(w: &PointerWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let w = w.clone();
    dom::add_listener(&window, "pointermove", move |ev| {
        let Ok(ev) = ev.dyn_into::<web::PointerEvent>() else {
            return;
        };
        let pos = pointer_css_px(&ev, &w.canvas);
        w.drag.borrow_mut().move_to(ev.pointer_id(), pos);
    });
}

fn wire_pointerup(w: &PointerWiring) {
    let Some(window) = web::window() else {
        return;
    };
    for name in ["pointerup", "pointercancel"] {
        let w = w.clone();
        dom::add_listener(&window, name, move |ev| {
            let Ok(ev) = ev.dyn_into::<web::PointerEvent>() else {
                return;
            };
            let was_dragging = w.drag.borrow().active;
            w.drag.borrow_mut().end(ev.pointer_id());
            if was_dragging {
                _ = w.canvas.release_pointer_capture(ev.pointer_id());
            }
        });
    }
}

fn wire_wheel(w: &PointerWiring) {
    let w = w.clone();
    let target = w.canvas.clone();
    dom::add_listener(&target, "wheel", move |ev| {
        let Ok(ev) = ev.dyn_into::<web::WheelEvent>() else {
            return;
        };
        let z = input::wheel_zoom(w.runtime.camera_depth(), ev.delta_y(), WHEEL_ZOOM_STEP);
        // same path as the slider, so the URL and the panel follow
        w.runtime
            .dispatch(ControlEvent::Input(Control::CameraDepth, z.to_string()));
        ev.prevent_default();
    });
}
