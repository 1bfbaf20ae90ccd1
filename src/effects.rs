// Carries out the effects the scene controller asks for.

use std::cell::RefCell;
use std::rc::Rc;
use typeloop_core::{
    Control, ControlEvent, Effect, Effects, FontGeometry, GeometryProvider, RelayoutRequest,
    SceneController,
};

use crate::{dom, panel};

/// Shared handle used by every DOM listener.
#[derive(Clone)]
pub struct Runtime {
    scene: Rc<RefCell<SceneController>>,
    font: Rc<RefCell<Option<FontGeometry>>>,
}

impl Runtime {
    pub fn new(scene: Rc<RefCell<SceneController>>) -> Self {
        Self {
            scene,
            font: Rc::new(RefCell::new(None)),
        }
    }

    pub fn dispatch(&self, event: ControlEvent) {
        let effects = self.scene.borrow_mut().dispatch(event);
        self.run(effects);
    }

    pub fn camera_depth(&self) -> f32 {
        self.scene.borrow().params().z_camera
    }

    fn run(&self, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::BackgroundChanged(color) => dom::set_page_background(color),
                // picked up by the renderer on the next frame
                Effect::TextColorChanged(color) => log::debug!("[fx] text color #{:06x}", color),
                Effect::CameraMoved(z) => log::debug!("[fx] camera z={}", z),
                Effect::QueryUpdated { key, value } => {
                    dom::replace_query_key(key, &value);
                    panel::sync_field(Control::for_key(key), self.scene.borrow().params());
                }
                Effect::BuildGeometry(req) => self.build(req),
                Effect::ShareLink(query) => share(&query),
            }
        }
    }

    fn build(&self, req: RelayoutRequest) {
        let font = self.font.borrow();
        let Some(font) = font.as_ref() else {
            log::info!(
                "[fx] font still loading; relayout {} deferred",
                req.generation
            );
            return;
        };
        let shape = font.text_shape(&req.message);
        if let Err(e) = self.scene.borrow_mut().finish_relayout(req.generation, shape) {
            log::error!("[fx] relayout failed: {:?}", e);
        }
    }

    /// Install the loaded font and build whatever layout is pending.
    pub fn font_ready(&self, font: FontGeometry) -> anyhow::Result<()> {
        *self.font.borrow_mut() = Some(font);
        let font = self.font.borrow();
        if let Some(font) = font.as_ref() {
            self.scene.borrow_mut().rebuild(font)?;
        }
        Ok(())
    }
}

fn share(query: &str) {
    let Some(link) = dom::share_url(query) else {
        return;
    };
    match dom::copy_to_clipboard(&link) {
        Ok(()) => log::info!("[fx] copied {}", link),
        Err(e) => log::warn!("[fx] clipboard unavailable ({:?}); link: {}", e, link),
    }
}
