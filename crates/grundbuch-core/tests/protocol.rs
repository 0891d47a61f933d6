//! End-to-end checks of the one-line result protocol.

use grundbuch_core::envelope::decode_error_text;
use grundbuch_core::{
    Envelope, Payload, RoutineContext, RoutineError, RoutineRegistry, ScriptConfig, ValueHint,
    invoke, json_routine,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn call(selector: &str, args: &str) -> String {
    let registry = RoutineRegistry::with_builtins(ScriptConfig::default());
    invoke(&registry, selector, args).to_line()
}

#[test]
fn clean_text_on_clean_input_is_identity() {
    assert_eq!(
        call("cleanText", r#"{"text":"X"}"#),
        r#"{"result":"ok","data":{"type":"text","data":"X"}}"#
    );
}

#[test]
fn unknown_selector_is_invalid_function() {
    assert_eq!(
        call("doesNotExist", "{}"),
        r#"{"result":"err","data":{"text":"invalid function"}}"#
    );
}

#[test]
fn partially_encumbered_entry() {
    assert_eq!(
        call("parcels", r#"{"entry":"5 tlw.","text":"Flur 6 Flst. 275/4"}"#),
        concat!(
            r#"{"result":"ok","data":{"type":"encumbranceCollection","data":"#,
            r#"{"entries":[{"serialNumber":5,"fullyEncumbers":false,"#,
            r#""partialParcels":[{"district":"6","parcel":"275/4"}]}],"warnings":[]}}}"#
        )
    );
}

#[test]
fn special_reservation_note_carries_index() {
    assert_eq!(
        call(
            "rightType",
            r#"{"text":"Vormerkung zur Sicherung des Anspruchs auf Löschung des Rechts Abt. II Nr. 3"}"#
        ),
        r#"{"result":"ok","data":{"type":"rightsClassification","data":{"SpecialReservationNote":{"index":3}}}}"#
    );
    assert_eq!(
        call("rightType", r#"{"text":"Wohnrecht für Anna Schmidt"}"#),
        r#"{"result":"ok","data":{"type":"rightsClassification","data":"Wohnrecht"}}"#
    );
}

#[test]
fn amount_wire_shape() {
    assert_eq!(
        call("amount", r#"{"text":"Grundschuld zu 1.500,50 DM"}"#),
        r#"{"result":"ok","data":{"type":"amount","data":{"value":150050,"decimalScale":2,"currency":"DMark"}}}"#
    );
}

#[test]
fn error_text_is_encoded_and_decodes() {
    let line = call("amount", r#"{"text":"keine Zahl"}"#);
    let Envelope::Err(body) = Envelope::from_line(&line).unwrap() else {
        panic!("expected an error envelope: {line}");
    };

    assert!(!body.text.contains(' '));
    let trace = decode_error_text(&body.text).unwrap();
    assert!(trace.starts_with("routine `amount` failed: routine error: nothing found"));
    assert!(trace.contains("'keine Zahl'"), "quotes become apostrophes: {trace}");
}

#[test]
fn malformed_arguments_become_error_envelope() {
    let line = call("cleanText", r#"{"text": "#);
    assert!(line.starts_with(r#"{"result":"err","data":{"text":""#));
    let message = Envelope::from_line(&line).unwrap().into_result().unwrap_err();
    assert!(message.contains("invalid argument object"));
}

#[test]
fn panicking_routine_becomes_error_envelope() {
    let mut registry = RoutineRegistry::with_builtins(ScriptConfig::default());
    registry.register_fn("explode", |ctx: &RoutineContext| -> Result<Payload, RoutineError> {
        let text = ctx.text()?;
        panic!("cannot handle {text}")
    });

    let envelope = invoke(&registry, "explode", r#"{"text":"Abt. II"}"#);
    assert_eq!(
        envelope.into_result().unwrap_err(),
        "routine `explode` panicked: cannot handle Abt. II"
    );
}

#[test]
fn host_json_routines_are_typed_by_shape() {
    let mut registry = RoutineRegistry::new();
    registry.register(
        "debtOf",
        Box::new(json_routine(ValueHint::Debt, |_: &RoutineContext| Ok(json!("Grundschuld")))),
    );
    registry.register(
        "odd",
        Box::new(json_routine(ValueHint::None, |_: &RoutineContext| Ok(json!(42)))),
    );

    assert_eq!(
        invoke(&registry, "debtOf", "{}").to_line(),
        r#"{"result":"ok","data":{"type":"debtClassification","data":"Grundschuld"}}"#
    );
    assert_eq!(
        invoke(&registry, "odd", "{}").to_line(),
        r#"{"result":"ok","data":{"type":"unknown","data":""}}"#
    );
}

#[test]
fn call_patterns_override_defaults() {
    let line = call(
        "rightHolder",
        r#"{"text":"Wohnrecht an Anna Schmidt","re":{"holder":"an (.+)"}}"#,
    );
    assert_eq!(line, r#"{"result":"ok","data":{"type":"text","data":"Anna Schmidt"}}"#);
}

#[test]
fn implausible_amount_scale_is_an_argument_error() {
    let line = call(
        "shortTextDebts",
        r#"{"text":"","amount":{"value":1,"decimalScale":4000000000,"currency":"Euro"}}"#,
    );
    let message = Envelope::from_line(&line).unwrap().into_result().unwrap_err();
    assert!(message.contains("invalid argument object"));
    assert!(message.contains("decimal scale 4000000000 exceeds 28"));
}
