//! Scene controller: the one owner of parameters, instances and the current
//! text shape.
//!
//! The host feeds it `ControlEvent`s (or `Command`s directly), elapsed time,
//! and finished geometry. It answers with `Effect`s the host must carry out
//! and exposes per-instance transforms for rendering.

use crate::animation::{advance, InstanceId, InstanceRaw, TextInstance};
use crate::bindings::{Bindings, ControlEvent};
use crate::constants::RECYCLE_DEPTH;
use crate::geometry::{GeometryError, GeometryProvider, TextShape};
use crate::layout::{layout_with_depth, LayoutError};
use crate::params::*;
use crate::query;
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SetBackgroundColor(u32),
    SetTextColor(u32),
    SetSpeed(f32),
    SetCameraDepth(f32),
    /// Tear down every instance and lay the scene out again.
    Relayout { message: String, nb_text: i64 },
    ShareLink,
}

/// Geometry the host must build before the scene can be laid out.
#[derive(Clone, Debug, PartialEq)]
pub struct RelayoutRequest {
    pub generation: u64,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    BackgroundChanged(u32),
    TextColorChanged(u32),
    CameraMoved(f32),
    /// Replace exactly this key in the page URL.
    QueryUpdated { key: ParamKey, value: String },
    BuildGeometry(RelayoutRequest),
    /// Full encoded parameter set, without a leading `?`.
    ShareLink(String),
}

pub type Effects = SmallVec<[Effect; 4]>;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("text geometry for {message:?} failed")]
    Geometry {
        message: String,
        #[source]
        source: GeometryError,
    },
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

pub struct SceneController {
    params: Parameters,
    bindings: Bindings,
    instances: Vec<TextInstance>,
    shape: Option<TextShape>,
    depth: f32,
    generation: u64,
    pending: Option<RelayoutRequest>,
    mesh_generation: u64,
    next_id: u64,
}

impl SceneController {
    /// The first layout is requested immediately; see [`Self::pending_relayout`].
    pub fn new(params: Parameters) -> Self {
        let pending = RelayoutRequest {
            generation: 1,
            message: params.message.clone(),
        };
        Self {
            params,
            bindings: Bindings::new(),
            instances: Vec::new(),
            shape: None,
            depth: RECYCLE_DEPTH,
            generation: 1,
            pending: Some(pending),
            mesh_generation: 0,
            next_id: 0,
        }
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn instances(&self) -> &[TextInstance] {
        &self.instances
    }

    pub fn shape(&self) -> Option<&TextShape> {
        self.shape.as_ref()
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Generation of the shape currently laid out; 0 before the first layout.
    pub fn mesh_generation(&self) -> u64 {
        self.mesh_generation
    }

    pub fn pending_relayout(&self) -> Option<&RelayoutRequest> {
        self.pending.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.pending.is_none() && self.shape.is_some()
    }

    /// Route a UI event through the bindings and apply whatever it produces.
    pub fn dispatch(&mut self, event: ControlEvent) -> Effects {
        let effects = match self.bindings.handle(event, &self.params) {
            Some(cmd) => self.apply(cmd),
            None => Effects::new(),
        };
        self.bindings.settle();
        effects
    }

    pub fn apply(&mut self, cmd: Command) -> Effects {
        let mut fx = Effects::new();
        match cmd {
            Command::SetBackgroundColor(c) => {
                self.params.background_color = c & 0xff_ffff;
                fx.push(Effect::BackgroundChanged(self.params.background_color));
                fx.push(self.query_update(ParamKey::BackgroundColor));
            }
            Command::SetTextColor(c) => {
                self.params.text_color = c & 0xff_ffff;
                fx.push(Effect::TextColorChanged(self.params.text_color));
                fx.push(self.query_update(ParamKey::TextColor));
            }
            Command::SetSpeed(v) => {
                self.params.z_speed = clamp_z_speed(v);
                log::debug!("[scene] z-speed={}", self.params.z_speed);
                fx.push(self.query_update(ParamKey::ZSpeed));
            }
            Command::SetCameraDepth(v) => {
                self.params.z_camera = clamp_z_camera(v);
                fx.push(Effect::CameraMoved(self.params.z_camera));
                fx.push(self.query_update(ParamKey::ZCamera));
            }
            Command::Relayout { message, nb_text } => {
                self.params.message = sanitize_message(&message);
                self.params.nb_text = clamp_nb_text(nb_text);
                fx.push(self.query_update(ParamKey::Message));
                fx.push(self.query_update(ParamKey::NbText));
                fx.push(Effect::BuildGeometry(self.begin_relayout()));
            }
            Command::ShareLink => fx.push(Effect::ShareLink(query::encode(&self.params))),
        }
        fx
    }

    fn query_update(&self, key: ParamKey) -> Effect {
        Effect::QueryUpdated {
            key,
            value: self.params.value_of(key),
        }
    }

    /// Drop every instance and supersede any relayout still in flight.
    fn begin_relayout(&mut self) -> RelayoutRequest {
        self.instances.clear();
        self.shape = None;
        self.generation += 1;
        let req = RelayoutRequest {
            generation: self.generation,
            message: self.params.message.clone(),
        };
        self.pending = Some(req.clone());
        req
    }

    /// Complete a relayout with the geometry built for `generation`.
    ///
    /// Returns `Ok(false)` when a newer relayout superseded this one and the
    /// result was discarded.
    pub fn finish_relayout(
        &mut self,
        generation: u64,
        shape: Result<TextShape, GeometryError>,
    ) -> Result<bool, SceneError> {
        let req = match self.pending.take() {
            Some(req) if req.generation == generation => req,
            other => {
                self.pending = other;
                log::warn!(
                    "[scene] discarding stale geometry (generation {}, current {})",
                    generation,
                    self.generation
                );
                return Ok(false);
            }
        };
        let shape = shape.map_err(|source| SceneError::Geometry {
            message: req.message,
            source,
        })?;
        let placements = layout_with_depth(self.params.nb_text, shape.bounding_width(), self.depth)?;
        self.instances = placements
            .iter()
            .map(|p| {
                let id = InstanceId(self.next_id);
                self.next_id += 1;
                TextInstance::from_placement(id, p)
            })
            .collect();
        if shape.is_empty() {
            log::warn!("[scene] message has no visible glyphs");
        }
        log::info!(
            "[scene] laid out {} instances (width {:.3}, generation {})",
            self.instances.len(),
            shape.bounding_width(),
            generation
        );
        self.shape = Some(shape);
        self.mesh_generation = generation;
        Ok(true)
    }

    /// Build and apply the pending relayout synchronously, if there is one.
    pub fn rebuild(&mut self, provider: &impl GeometryProvider) -> Result<bool, SceneError> {
        let Some(req) = self.pending.clone() else {
            return Ok(false);
        };
        let shape = provider.text_shape(&req.message);
        self.finish_relayout(req.generation, shape)
    }

    pub fn advance(&mut self, elapsed_secs: f32) {
        advance(
            &mut self.instances,
            elapsed_secs,
            self.params.z_speed,
            self.depth,
        );
    }

    /// GPU instance records in instance order, written to `out` after
    /// clearing it.
    pub fn write_instances(&self, out: &mut Vec<InstanceRaw>) {
        out.clear();
        out.extend(self.instances.iter().map(TextInstance::to_raw));
    }
}
