// Host-side tests for control bindings (Idle -> Edited -> Applied -> Idle).

use typeloop_core::*;

#[test]
fn binding_kinds() {
    assert_eq!(Control::BackgroundColor.binding(), BindingKind::Immediate);
    assert_eq!(Control::TextColor.binding(), BindingKind::Immediate);
    assert_eq!(Control::CameraDepth.binding(), BindingKind::Immediate);
    assert_eq!(Control::Speed.binding(), BindingKind::Deferred);
    assert_eq!(Control::NbText.binding(), BindingKind::Structural);
    assert_eq!(Control::Message.binding(), BindingKind::Structural);
}

#[test]
fn deferred_control_walks_every_phase() {
    let params = Parameters::default();
    let mut b = Bindings::new();
    assert_eq!(b.phase(Control::Speed), Phase::Idle);

    assert_eq!(b.handle(ControlEvent::Input(Control::Speed, "-3".into()), &params), None);
    assert_eq!(b.phase(Control::Speed), Phase::Edited);
    assert_eq!(b.draft(Control::Speed), Some("-3"));

    let cmd = b.handle(ControlEvent::Change(Control::Speed, "-3".into()), &params);
    assert_eq!(cmd, Some(Command::SetSpeed(-3.0)));
    assert_eq!(b.phase(Control::Speed), Phase::Applied);
    assert_eq!(b.draft(Control::Speed), None);

    b.settle();
    assert_eq!(b.phase(Control::Speed), Phase::Idle);
}

#[test]
fn immediate_control_applies_on_input() {
    let params = Parameters::default();
    let mut b = Bindings::new();
    let cmd = b.handle(ControlEvent::Input(Control::CameraDepth, "4.5".into()), &params);
    assert_eq!(cmd, Some(Command::SetCameraDepth(4.5)));
    assert_eq!(b.phase(Control::CameraDepth), Phase::Applied);
}

#[test]
fn unparseable_values_are_dropped() {
    let params = Parameters::default();
    let mut b = Bindings::new();
    let cmd = b.handle(ControlEvent::Input(Control::TextColor, "not a color".into()), &params);
    assert_eq!(cmd, None);
    assert_eq!(b.phase(Control::TextColor), Phase::Idle);
}

#[test]
fn structural_drafts_wait_for_confirm() {
    let params = Parameters::default();
    let mut b = Bindings::new();
    assert_eq!(b.handle(ControlEvent::Input(Control::Message, "Hel".into()), &params), None);
    assert_eq!(b.handle(ControlEvent::Change(Control::Message, "Hello".into()), &params), None);
    assert_eq!(b.phase(Control::Message), Phase::Edited);
    assert_eq!(b.phase(Control::NbText), Phase::Idle);

    let cmd = b.handle(ControlEvent::Confirm, &params);
    assert_eq!(
        cmd,
        Some(Command::Relayout {
            message: "Hello".into(),
            nb_text: 10
        })
    );
    assert_eq!(b.phase(Control::Message), Phase::Applied);
    b.settle();
    assert_eq!(b.phase(Control::Message), Phase::Idle);
    assert_eq!(b.draft(Control::Message), None);
}

#[test]
fn confirm_without_drafts_relays_out_current_values() {
    let params = Parameters {
        message: "Loop".into(),
        nb_text: 20,
        ..Parameters::default()
    };
    let mut b = Bindings::new();
    assert_eq!(
        b.handle(ControlEvent::Confirm, &params),
        Some(Command::Relayout {
            message: "Loop".into(),
            nb_text: 20
        })
    );
}

#[test]
fn copy_link_maps_to_share() {
    let mut b = Bindings::new();
    assert_eq!(
        b.handle(ControlEvent::CopyLink, &Parameters::default()),
        Some(Command::ShareLink)
    );
}

#[test]
fn every_control_has_a_query_key() {
    let keys: Vec<_> = Control::ALL.iter().map(|c| c.key()).collect();
    for key in ParamKey::ALL {
        assert!(keys.contains(&key), "{:?} has no control", key);
    }
}

#[test]
fn query_keys_map_back_to_their_control() {
    for control in Control::ALL {
        assert_eq!(Control::for_key(control.key()), control);
    }
}

#[test]
fn color_widgets_show_css_hex() {
    let params = Parameters::default();
    assert_eq!(Control::BackgroundColor.widget_value(&params), "#723bf2");
    assert_eq!(Control::TextColor.widget_value(&params), "#e85eb0");
    assert_eq!(Control::NbText.widget_value(&params), "10");
    assert_eq!(Control::Message.widget_value(&params), "Infinite Loop");
}
