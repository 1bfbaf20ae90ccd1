use crate::constants::{CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR, MAX_FRAME_DT_SEC};
use crate::input::DragState;
use crate::render;
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use typeloop_core::{Camera, InstanceRaw, SceneController};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Rc<RefCell<SceneController>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub camera: Camera,
    pub drag: Rc<RefCell<DragState>>,
    pub instances: Vec<InstanceRaw>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(
        scene: Rc<RefCell<SceneController>>,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState>,
        drag: Rc<RefCell<DragState>>,
    ) -> Self {
        let z = scene.borrow().params().z_camera;
        Self {
            scene,
            canvas,
            gpu,
            camera: Camera::new(
                z,
                CAMERA_FOVY_DEG.to_radians(),
                CAMERA_ZNEAR,
                CAMERA_ZFAR,
            ),
            drag,
            instances: Vec::new(),
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let mut scene = self.scene.borrow_mut();
        scene.advance(dt_sec);
        scene.write_instances(&mut self.instances);

        let (w, h) = (self.canvas.width(), self.canvas.height());
        let params = scene.params();
        self.camera.set_z(params.z_camera);
        let delta = self.drag.borrow_mut().take_delta();
        if delta != Vec2::ZERO {
            self.camera
                .orbit_by_pixels(delta.x, delta.y, self.canvas.client_height() as f32);
        }
        self.camera.set_viewport(w, h);

        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(w, h);
        g.set_colors(params.background_color, params.text_color);
        g.sync_mesh(scene.mesh_generation(), scene.shape());
        drop(scene);
        match g.render(&self.camera, &self.instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
