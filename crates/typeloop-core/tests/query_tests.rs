// Host-side tests for shareable URL state.

use typeloop_core::constants::*;
use typeloop_core::query::{decode, encode, update_query};
use typeloop_core::*;

#[test]
fn decode_fills_missing_fields_with_defaults() {
    let p = decode("?nb-text=15&message=Hi&z-speed=-3");
    assert_eq!(
        p,
        Parameters {
            background_color: 0x723bf2,
            text_color: 0xe85eb0,
            nb_text: 15,
            message: "Hi".to_string(),
            z_speed: -3.0,
            z_camera: 2.0,
        }
    );
    assert_eq!(decode(""), Parameters::default());
}

#[test]
fn encode_then_decode_round_trips() {
    let cases = [
        Parameters::default(),
        Parameters {
            background_color: 0x123456,
            text_color: 0,
            nb_text: 25,
            message: "Hello, world & friends = 100%".to_string(),
            z_speed: -2.5,
            z_camera: 7.25,
        },
        Parameters {
            background_color: 0xffffff,
            text_color: 0xabcdef,
            nb_text: 10,
            message: "Ünïcödé ✨ loop".to_string(),
            z_speed: -10.0,
            z_camera: 0.0,
        },
        Parameters {
            message: "x".repeat(MESSAGE_MAX_CHARS),
            z_speed: 0.0,
            z_camera: 10.0,
            ..Parameters::default()
        },
    ];
    for p in cases {
        assert_eq!(decode(&encode(&p)), p);
    }
}

#[test]
fn malformed_fields_fall_back_silently() {
    let p = decode("background-color=purple&text-color=&nb-text=lots&z-speed=fast&z-camera=NaN");
    assert_eq!(p, Parameters::default());
}

#[test]
fn numeric_fields_are_clamped_to_control_ranges() {
    let p = decode("nb-text=3&z-speed=5&z-camera=-1");
    assert_eq!(p.nb_text, NB_TEXT_MIN);
    assert_eq!(p.z_speed, Z_SPEED_MAX);
    assert_eq!(p.z_camera, Z_CAMERA_MIN);

    let p = decode("nb-text=99&z-speed=-50&z-camera=1e9");
    assert_eq!(p.nb_text, NB_TEXT_MAX);
    assert_eq!(p.z_speed, Z_SPEED_MIN);
    assert_eq!(p.z_camera, Z_CAMERA_MAX);
}

#[test]
fn nb_text_accepts_a_fractional_tail() {
    assert_eq!(decode("nb-text=15.7").nb_text, 15);
}

#[test]
fn colors_accept_numbers_and_hex() {
    assert_eq!(decode("background-color=7486450").background_color, 0x723bf2);
    assert_eq!(decode("background-color=%23ff0000").background_color, 0xff0000);
    assert_eq!(decode("text-color=0x00ff00").text_color, 0x00ff00);
}

#[test]
fn message_is_sanitized() {
    assert_eq!(decode("message=").message, DEFAULT_MESSAGE);
    let exact = "m".repeat(75);
    assert_eq!(decode(&format!("message={exact}")).message, exact);
    let long = "n".repeat(76);
    assert_eq!(decode(&format!("message={long}")).message, "n".repeat(75));
    assert_eq!(decode("message=Hi+there").message, "Hi there");
}

#[test]
fn update_query_touches_only_its_key() {
    let q = update_query("?foo=1&nb-text=10&bar=2", ParamKey::NbText, "15");
    assert_eq!(q, "foo=1&bar=2&nb-text=15");
    assert_eq!(update_query("", ParamKey::ZSpeed, "-4"), "z-speed=-4");
    assert_eq!(
        update_query("z-camera=3", ParamKey::Message, "Hi there"),
        "z-camera=3&message=Hi+there"
    );
    let p = decode(&update_query("z-camera=3", ParamKey::Message, "Hi there"));
    assert_eq!(p.z_camera, 3.0);
    assert_eq!(p.message, "Hi there");
}

#[test]
fn unknown_keys_are_ignored() {
    let p = decode("text=Old&utm_source=x&z-camera=4");
    assert_eq!(p.message, DEFAULT_MESSAGE);
    assert_eq!(p.z_camera, 4.0);
}
