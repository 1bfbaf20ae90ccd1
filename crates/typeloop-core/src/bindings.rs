// Panel controls -> typed commands. Every control walks
// Idle -> Edited -> Applied -> Idle; colors and camera depth apply on input,
// speed on release, message and count on the panel's confirm.

use crate::color::{parse_color, to_css_hex};
use crate::controller::Command;
use crate::params::{parse_float, parse_int, ParamKey, Parameters};
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    BackgroundColor,
    TextColor,
    CameraDepth,
    Speed,
    NbText,
    Message,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingKind {
    Immediate,
    Deferred,
    Structural,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Edited,
    Applied,
}

/// Raw UI event. Values are the control's string value as the DOM reports it.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlEvent {
    /// Fired continuously while the user edits (`input` in the DOM).
    Input(Control, String),
    /// Fired once an edit completes (`change` in the DOM).
    Change(Control, String),
    /// The panel's "Update" action for structural controls.
    Confirm,
    CopyLink,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::BackgroundColor,
        Control::TextColor,
        Control::CameraDepth,
        Control::Speed,
        Control::NbText,
        Control::Message,
    ];

    pub fn binding(self) -> BindingKind {
        match self {
            Control::BackgroundColor | Control::TextColor | Control::CameraDepth => {
                BindingKind::Immediate
            }
            Control::Speed => BindingKind::Deferred,
            Control::NbText | Control::Message => BindingKind::Structural,
        }
    }

    pub fn key(self) -> ParamKey {
        match self {
            Control::BackgroundColor => ParamKey::BackgroundColor,
            Control::TextColor => ParamKey::TextColor,
            Control::CameraDepth => ParamKey::ZCamera,
            Control::Speed => ParamKey::ZSpeed,
            Control::NbText => ParamKey::NbText,
            Control::Message => ParamKey::Message,
        }
    }

    pub fn for_key(key: ParamKey) -> Control {
        match key {
            ParamKey::BackgroundColor => Control::BackgroundColor,
            ParamKey::TextColor => Control::TextColor,
            ParamKey::ZCamera => Control::CameraDepth,
            ParamKey::ZSpeed => Control::Speed,
            ParamKey::NbText => Control::NbText,
            ParamKey::Message => Control::Message,
        }
    }

    /// The value the panel widget should show for `params`. Color inputs
    /// need `#rrggbb`; everything else matches the URL form.
    pub fn widget_value(self, params: &Parameters) -> String {
        match self {
            Control::BackgroundColor => to_css_hex(params.background_color),
            Control::TextColor => to_css_hex(params.text_color),
            _ => params.value_of(self.key()),
        }
    }

    /// Command for a single-value control; `None` for structural controls or
    /// values that do not parse.
    fn command(self, raw: &str) -> Option<Command> {
        match self {
            Control::BackgroundColor => parse_color(raw).map(Command::SetBackgroundColor),
            Control::TextColor => parse_color(raw).map(Command::SetTextColor),
            Control::CameraDepth => parse_float(raw).map(Command::SetCameraDepth),
            Control::Speed => parse_float(raw).map(Command::SetSpeed),
            Control::NbText | Control::Message => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Bindings {
    phases: FnvHashMap<Control, Phase>,
    drafts: FnvHashMap<Control, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, control: Control) -> Phase {
        self.phases.get(&control).copied().unwrap_or_default()
    }

    /// Pending structural/deferred value, if the control is mid-edit.
    pub fn draft(&self, control: Control) -> Option<&str> {
        self.drafts.get(&control).map(String::as_str)
    }

    /// Translate one UI event. Controls that produced a command are left in
    /// `Applied` until [`Bindings::settle`].
    pub fn handle(&mut self, event: ControlEvent, current: &Parameters) -> Option<Command> {
        match event {
            ControlEvent::Input(control, raw) => match control.binding() {
                BindingKind::Immediate => self.apply_now(control, &raw),
                BindingKind::Deferred | BindingKind::Structural => {
                    self.edit(control, raw);
                    None
                }
            },
            ControlEvent::Change(control, raw) => match control.binding() {
                BindingKind::Immediate | BindingKind::Deferred => {
                    self.drafts.remove(&control);
                    self.apply_now(control, &raw)
                }
                BindingKind::Structural => {
                    self.edit(control, raw);
                    None
                }
            },
            ControlEvent::Confirm => {
                let message = self
                    .drafts
                    .remove(&Control::Message)
                    .unwrap_or_else(|| current.message.clone());
                let nb_text = self
                    .drafts
                    .remove(&Control::NbText)
                    .and_then(|raw| parse_int(&raw))
                    .unwrap_or(current.nb_text as i64);
                self.phases.insert(Control::Message, Phase::Applied);
                self.phases.insert(Control::NbText, Phase::Applied);
                Some(Command::Relayout { message, nb_text })
            }
            ControlEvent::CopyLink => Some(Command::ShareLink),
        }
    }

    /// Return every applied control to `Idle` once its command has run.
    pub fn settle(&mut self) {
        for phase in self.phases.values_mut() {
            if *phase == Phase::Applied {
                *phase = Phase::Idle;
            }
        }
    }

    fn edit(&mut self, control: Control, raw: String) {
        self.drafts.insert(control, raw);
        self.phases.insert(control, Phase::Edited);
    }

    fn apply_now(&mut self, control: Control, raw: &str) -> Option<Command> {
        let cmd = control.command(raw);
        let phase = if cmd.is_some() {
            Phase::Applied
        } else {
            log::debug!("[bindings] ignoring {:?} value {:?}", control, raw);
            Phase::Idle
        };
        self.phases.insert(control, phase);
        cmd
    }
}
