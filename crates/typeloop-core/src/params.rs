use crate::constants::*;

/// Query-string key of each parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    BackgroundColor,
    TextColor,
    NbText,
    Message,
    ZSpeed,
    ZCamera,
}

impl ParamKey {
    pub const ALL: [ParamKey; 6] = [
        ParamKey::BackgroundColor,
        ParamKey::TextColor,
        ParamKey::NbText,
        ParamKey::Message,
        ParamKey::ZSpeed,
        ParamKey::ZCamera,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParamKey::BackgroundColor => "background-color",
            ParamKey::TextColor => "text-color",
            ParamKey::NbText => "nb-text",
            ParamKey::Message => "message",
            ParamKey::ZSpeed => "z-speed",
            ParamKey::ZCamera => "z-camera",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameters {
    pub background_color: u32,
    pub text_color: u32,
    pub nb_text: u32,
    pub message: String,
    pub z_speed: f32,
    pub z_camera: f32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR,
            text_color: DEFAULT_TEXT_COLOR,
            nb_text: DEFAULT_NB_TEXT,
            message: DEFAULT_MESSAGE.to_string(),
            z_speed: DEFAULT_Z_SPEED,
            z_camera: DEFAULT_Z_CAMERA,
        }
    }
}

impl Parameters {
    /// Encoded value of a single key, as written to the query string.
    pub fn value_of(&self, key: ParamKey) -> String {
        match key {
            ParamKey::BackgroundColor => self.background_color.to_string(),
            ParamKey::TextColor => self.text_color.to_string(),
            ParamKey::NbText => self.nb_text.to_string(),
            ParamKey::Message => self.message.clone(),
            ParamKey::ZSpeed => self.z_speed.to_string(),
            ParamKey::ZCamera => self.z_camera.to_string(),
        }
    }
}

/// Empty (or blank) messages fall back to the default; long ones keep their
/// first `MESSAGE_MAX_CHARS` characters.
pub fn sanitize_message(raw: &str) -> String {
    if raw.trim().is_empty() {
        return DEFAULT_MESSAGE.to_string();
    }
    raw.chars().take(MESSAGE_MAX_CHARS).collect()
}

#[inline]
pub fn clamp_nb_text(n: i64) -> u32 {
    n.clamp(NB_TEXT_MIN as i64, NB_TEXT_MAX as i64) as u32
}

#[inline]
pub fn clamp_z_speed(v: f32) -> f32 {
    if v.is_nan() {
        return DEFAULT_Z_SPEED;
    }
    v.clamp(Z_SPEED_MIN, Z_SPEED_MAX)
}

#[inline]
pub fn clamp_z_camera(v: f32) -> f32 {
    if v.is_nan() {
        return DEFAULT_Z_CAMERA;
    }
    v.clamp(Z_CAMERA_MIN, Z_CAMERA_MAX)
}

/// Integer parse that tolerates a fractional tail (`"15.7"` -> 15).
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let v: f64 = s.parse().ok()?;
    v.is_finite().then(|| v.trunc() as i64)
}

/// Float parse that rejects NaN and infinities.
pub fn parse_float(raw: &str) -> Option<f32> {
    let v: f32 = raw.trim().parse().ok()?;
    v.is_finite().then_some(v)
}
