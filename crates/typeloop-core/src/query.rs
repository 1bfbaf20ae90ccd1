// Parameters <-> URL query string. Decoding never fails; bad fields fall
// back to their defaults.

use crate::color::parse_color;
use crate::constants::*;
use crate::params::*;
use url::form_urlencoded;

/// Serialize every parameter, without a leading `?`.
pub fn encode(params: &Parameters) -> String {
    let mut ser = form_urlencoded::Serializer::new(String::new());
    for key in ParamKey::ALL {
        ser.append_pair(key.as_str(), &params.value_of(key));
    }
    ser.finish()
}

pub fn decode(query: &str) -> Parameters {
    let mut params = Parameters::default();
    let mut seen = [false; ParamKey::ALL.len()];
    for (k, v) in pairs(query) {
        let Some(key) = ParamKey::from_key(&k) else {
            continue;
        };
        // first occurrence wins, like URLSearchParams::get
        let slot = key as usize;
        if seen[slot] {
            continue;
        }
        seen[slot] = true;
        apply_field(&mut params, key, &v);
    }
    params
}

fn apply_field(params: &mut Parameters, key: ParamKey, raw: &str) {
    match key {
        ParamKey::BackgroundColor => {
            params.background_color = parse_color(raw).unwrap_or(DEFAULT_BACKGROUND_COLOR)
        }
        ParamKey::TextColor => params.text_color = parse_color(raw).unwrap_or(DEFAULT_TEXT_COLOR),
        ParamKey::NbText => {
            params.nb_text = parse_int(raw)
                .map(clamp_nb_text)
                .unwrap_or(DEFAULT_NB_TEXT)
        }
        ParamKey::Message => params.message = sanitize_message(raw),
        ParamKey::ZSpeed => {
            params.z_speed = parse_float(raw)
                .map(clamp_z_speed)
                .unwrap_or(DEFAULT_Z_SPEED)
        }
        ParamKey::ZCamera => {
            params.z_camera = parse_float(raw)
                .map(clamp_z_camera)
                .unwrap_or(DEFAULT_Z_CAMERA)
        }
    }
}

/// Replace one key in an existing query string, keeping every other pair
/// (including keys we do not know about) in its original order. The updated
/// key is removed wherever it was and appended at the end.
pub fn update_query(query: &str, key: ParamKey, value: &str) -> String {
    let mut ser = form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs(query) {
        if k != key.as_str() {
            ser.append_pair(&k, &v);
        }
    }
    ser.append_pair(key.as_str(), value);
    ser.finish()
}

fn pairs(query: &str) -> form_urlencoded::Parse<'_> {
    let q = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(q.as_bytes())
}
