// Settings panel: one DOM control per parameter plus the "Update" and
// "Copy link" buttons. Controls only report raw values; the bindings in
// typeloop_core decide when they apply.

use typeloop_core::constants::{
    MESSAGE_MAX_CHARS, NB_TEXT_MAX, NB_TEXT_MIN, Z_CAMERA_MAX, Z_CAMERA_MIN, Z_SPEED_MAX,
    Z_SPEED_MIN,
};
use typeloop_core::{Control, ControlEvent, Parameters};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{CAMERA_STEP, PANEL_ID, SPEED_STEP};
use crate::dom::{self, js_err};
use crate::effects::Runtime;

struct Field {
    control: Control,
    label: &'static str,
    kind: &'static str,
    /// min, max, step
    range: Option<(f32, f32, f32)>,
}

const FIELDS: [Field; 6] = [
    Field {
        control: Control::BackgroundColor,
        label: "Background",
        kind: "color",
        range: None,
    },
    Field {
        control: Control::TextColor,
        label: "Text",
        kind: "color",
        range: None,
    },
    Field {
        control: Control::CameraDepth,
        label: "Camera z",
        kind: "range",
        range: Some((Z_CAMERA_MIN, Z_CAMERA_MAX, CAMERA_STEP)),
    },
    Field {
        control: Control::Speed,
        label: "Speed",
        kind: "range",
        range: Some((Z_SPEED_MIN, Z_SPEED_MAX, SPEED_STEP)),
    },
    Field {
        control: Control::NbText,
        label: "Copies",
        kind: "number",
        range: Some((NB_TEXT_MIN as f32, NB_TEXT_MAX as f32, 1.0)),
    },
    Field {
        control: Control::Message,
        label: "Message",
        kind: "text",
        range: None,
    },
];

/// Build the panel inside `#panel` (created if the page lacks one).
pub fn build(
    document: &web::Document,
    runtime: &Runtime,
    params: &Parameters,
) -> anyhow::Result<()> {
    let panel = match document.get_element_by_id(PANEL_ID) {
        Some(el) => el,
        None => {
            let el = document.create_element("div").map_err(js_err)?;
            el.set_id(PANEL_ID);
            let body = document
                .body()
                .ok_or_else(|| anyhow::anyhow!("no body"))?;
            body.append_child(&el).map_err(js_err)?;
            el
        }
    };
    panel.set_inner_html("");

    for field in &FIELDS {
        let row = document.create_element("label").map_err(js_err)?;
        row.set_class_name("panel-row");
        let caption = document.create_element("span").map_err(js_err)?;
        caption.set_text_content(Some(field.label));
        row.append_child(&caption).map_err(js_err)?;

        let input = document
            .create_element("input")
            .map_err(js_err)?
            .dyn_into::<web::HtmlInputElement>()
            .map_err(|_| anyhow::anyhow!("input element has the wrong type"))?;
        input.set_id(&field_id(field.control));
        input.set_type(field.kind);
        if let Some((min, max, step)) = field.range {
            input.set_min(&min.to_string());
            input.set_max(&max.to_string());
            input.set_step(&step.to_string());
        }
        if field.control == Control::Message {
            input.set_max_length(MESSAGE_MAX_CHARS as i32);
        }
        input.set_value(&field.control.widget_value(params));
        wire_field(&input, field.control, runtime);
        if field.control == Control::Message {
            wire_enter_confirms(&input, runtime);
        }
        row.append_child(&input).map_err(js_err)?;
        panel.append_child(&row).map_err(js_err)?;
    }

    let actions = document.create_element("div").map_err(js_err)?;
    actions.set_class_name("panel-actions");
    for (label, event) in [
        ("Update", ControlEvent::Confirm),
        ("Copy link", ControlEvent::CopyLink),
    ] {
        let button = document.create_element("button").map_err(js_err)?;
        button.set_text_content(Some(label));
        let rt = runtime.clone();
        dom::add_click_listener(&button, move || rt.dispatch(event.clone()));
        actions.append_child(&button).map_err(js_err)?;
    }
    panel.append_child(&actions).map_err(js_err)?;
    log::info!("[panel] built {} controls", FIELDS.len());
    Ok(())
}

#[inline]
fn field_id(control: Control) -> String {
    format!("{}-{}", PANEL_ID, control.key().as_str())
}

/// Show the value the scene settled on (clamped, sanitized) in its widget.
/// Untouched when it already matches, so the caret and an in-progress drag
/// are left alone.
pub fn sync_field(control: Control, params: &Parameters) {
    let Some(input) = dom::window_document()
        .and_then(|d| d.get_element_by_id(&field_id(control)))
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    else {
        return;
    };
    let value = control.widget_value(params);
    if input.value() != value {
        input.set_value(&value);
    }
}

fn wire_field(input: &web::HtmlInputElement, control: Control, runtime: &Runtime) {
    let events: [(&str, fn(Control, String) -> ControlEvent); 2] = [
        ("input", ControlEvent::Input),
        ("change", ControlEvent::Change),
    ];
    for (name, make) in events {
        let rt = runtime.clone();
        let el = input.clone();
        dom::add_listener(input, name, move |_| rt.dispatch(make(control, el.value())));
    }
}

fn wire_enter_confirms(input: &web::HtmlInputElement, runtime: &Runtime) {
    let rt = runtime.clone();
    let el = input.clone();
    dom::add_listener(input, "keydown", move |ev| {
        let Ok(ev) = ev.dyn_into::<web::KeyboardEvent>() else {
            return;
        };
        if ev.key() == "Enter" {
            // make sure the latest text is drafted before confirming
            rt.dispatch(ControlEvent::Change(Control::Message, el.value()));
            rt.dispatch(ControlEvent::Confirm);
        }
    });
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(PANEL_ID)
        .map(|el| el.class_list().contains("hidden"))
        .unwrap_or(false)
}

pub fn toggle(document: &web::Document) {
    let Some(el) = document.get_element_by_id(PANEL_ID) else {
        return;
    };
    let cl = el.class_list();
    if is_hidden(document) {
        _ = cl.remove_1("hidden");
    } else {
        _ = cl.add_1("hidden");
    }
}

/// `h` shows/hides the panel, except while typing into one of its fields.
pub fn wire_toggle_h(document: &web::Document) {
    let Some(window) = web::window() else {
        return;
    };
    let doc = document.clone();
    dom::add_listener(&window, "keydown", move |ev| {
        let Ok(ev) = ev.dyn_into::<web::KeyboardEvent>() else {
            return;
        };
        let typing = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
            .is_some_and(|input| input.type_() == "text");
        if typing || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
            return;
        }
        let key = ev.key();
        if key == "h" || key == "H" {
            toggle(&doc);
            ev.prevent_default();
        }
    });
}
