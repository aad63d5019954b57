/// Property-Based Invariant Tests
///
/// Uses the `proptest` crate to exercise the structural-equality laws of the
/// value model and the position guarantees of the error model against
/// generated inputs:
///
/// - Equality is reflexive and symmetric, tolerates NaN, and ignores object
///   pair order.
/// - Every failing parse reports a position inside the source document.
/// - Parsing is deterministic.
/// - Big integers survive with every digit intact.
use proptest::prelude::*;
use yay_core::{parse, Value};

// ============================================================================
// Strategies
// ============================================================================

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::int),
        prop_oneof![
            (-1.0e9..1.0e9f64).prop_map(Value::Float),
            Just(Value::Float(f64::NAN)),
            Just(Value::Float(f64::INFINITY)),
            Just(Value::Float(f64::NEG_INFINITY)),
        ],
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
        proptest::collection::vec(any::<u8>(), 0..8).prop_map(Value::Bytes),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            proptest::collection::vec(("[a-d]{1,3}", inner), 0..4).prop_map(|pairs| {
                let mut obj = Value::Object(Vec::new());
                for (key, value) in pairs {
                    obj.set(&key, value);
                }
                obj
            }),
        ]
    })
}

/// Printable-ASCII documents (plus newlines) with structural characters well
/// represented, so both parse outcomes are exercised.
fn arb_document() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ -~\n]{0,60}").expect("valid regex")
}

// ============================================================================
// Equality laws
// ============================================================================

proptest! {
    #[test]
    fn equality_is_reflexive(value in arb_value()) {
        prop_assert_eq!(&value, &value);
    }

    #[test]
    fn equality_survives_clone(value in arb_value()) {
        let copy = value.clone();
        prop_assert_eq!(&value, &copy);
        prop_assert_eq!(&copy, &value);
    }

    #[test]
    fn object_equality_ignores_pair_order(value in arb_value()) {
        if let Value::Object(pairs) = &value {
            let mut reversed = pairs.clone();
            reversed.reverse();
            prop_assert_eq!(&value, &Value::Object(reversed));
        }
    }
}

// ============================================================================
// Parser guarantees
// ============================================================================

proptest! {
    #[test]
    fn error_positions_lie_within_source(doc in arb_document()) {
        if let Err(err) = parse(doc.as_bytes(), None) {
            let line_count = doc.split('\n').count();
            prop_assert!(err.line >= 1, "line {} below 1", err.line);
            prop_assert!(
                err.line <= line_count,
                "line {} beyond {} source lines", err.line, line_count
            );
            let line = doc.split('\n').nth(err.line - 1).unwrap_or("");
            prop_assert!(err.column >= 1, "column {} below 1", err.column);
            prop_assert!(
                err.column <= line.len() + 1,
                "column {} beyond line {:?}", err.column, line
            );
        }
    }

    #[test]
    fn parsing_is_deterministic(doc in arb_document()) {
        prop_assert_eq!(parse(doc.as_bytes(), None), parse(doc.as_bytes(), None));
    }

    #[test]
    fn big_integers_keep_their_digits(digits in "[1-9][0-9]{0,40}") {
        let doc = format!("n: {digits}\n");
        let value = parse(doc.as_bytes(), None).expect("integer document must parse");
        let n = value.get("n").and_then(Value::as_int).expect("expected an integer");
        prop_assert!(!n.negative);
        prop_assert_eq!(&n.digits, &digits);
    }

    #[test]
    fn quoted_strings_round_trip_payload(payload in "[a-z A-Z0-9]{0,20}") {
        let doc = format!("s: \"{payload}\"\n");
        let value = parse(doc.as_bytes(), None).expect("quoted string must parse");
        prop_assert_eq!(value.get("s").and_then(Value::as_str), Some(payload.as_str()));
    }
}
