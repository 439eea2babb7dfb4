use super::*;
use crate::graph::node::ExprKind;
use crate::test_eval::{assert_lanes_close, fold};

#[test]
fn parses_every_input_form() {
    let req = OperatorRequest::from_json_str(
        r#"{
            "operator": "clamp",
            "inputs": [
                {"input": "float3", "name": "velocity"},
                {"const": [0.0]},
                {"const": [1.0, 2.0, 3.0]}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(req.operator, OperatorKind::Clamp);
    assert_eq!(
        req.inputs[0],
        InputDef::Input {
            input: ValueType::Float3,
            name: Some("velocity".to_owned())
        }
    );

    let ints = OperatorRequest::from_json_str(
        r#"{"operator": "modulo", "inputs": [{"int": -7}, {"uint": 3}]}"#,
    )
    .unwrap();
    assert_eq!(ints.inputs, vec![InputDef::Int { int: -7 }, InputDef::Uint { uint: 3 }]);
}

#[test]
fn unnamed_inputs_are_named_by_position() {
    let req = OperatorRequest::from_json_str(
        r#"{"operator": "dot", "inputs": [{"input": "float2"}, {"input": "float2"}]}"#,
    )
    .unwrap();
    let operands = req.operands().unwrap();
    match operands[1].kind() {
        ExprKind::Input { name } => assert_eq!(name, "in1"),
        other => panic!("expected input leaf, got {other:?}"),
    }
}

#[test]
fn build_applies_the_operator() {
    let req = OperatorRequest::from_json_str(
        r#"{"operator": "clamp", "inputs": [
            {"const": [-1.0, 0.5, 3.0]}, {"const": [0.0]}, {"const": [2.0]}
        ]}"#,
    )
    .unwrap();
    let out = req.build().unwrap();
    assert_eq!(out.len(), 1);
    assert_lanes_close(&fold(&out[0]), &[0.0, 0.5, 2.0]);
}

#[test]
fn malformed_requests_are_config_errors() {
    for bad in [
        "not json",
        r#"{"operator": "no_such_op", "inputs": []}"#,
        r#"{"operator": "negate", "inputs": [{"input": "double"}]}"#,
        r#"{"operator": "negate", "inputs": [], "extra": 1}"#,
    ] {
        assert!(
            matches!(OperatorRequest::from_json_str(bad), Err(OpError::Config(_))),
            "{bad}"
        );
    }

    let wide = OperatorRequest::from_json_str(
        r#"{"operator": "negate", "inputs": [{"const": [1, 2, 3, 4, 5]}]}"#,
    )
    .unwrap();
    assert!(matches!(wide.build(), Err(OpError::Config(_))));
}

#[test]
fn build_reports_arity_errors() {
    let req = OperatorRequest::from_json_str(r#"{"operator": "negate"}"#).unwrap();
    assert!(matches!(req.build(), Err(OpError::InvalidArgument(_))));
}

#[test]
fn reads_from_path() {
    let dir = std::env::temp_dir().join(format!("vfx-operators-request-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("request.json");
    std::fs::write(
        &path,
        r#"{"operator": "gamma_to_linear", "inputs": [{"input": "float4"}]}"#,
    )
    .unwrap();

    let req = OperatorRequest::from_path(&path).unwrap();
    assert_eq!(req.operator, OperatorKind::GammaToLinear);
    assert!(matches!(
        OperatorRequest::from_path(dir.join("missing.json")),
        Err(OpError::Config(_))
    ));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn build_rejects_mixed_integer_and_float_operands() {
    let req = OperatorRequest::from_json_str(
        r#"{"operator": "modulo", "inputs": [{"int": 7}, {"const": [2.0]}]}"#,
    )
    .unwrap();
    assert!(matches!(req.build(), Err(OpError::TypeMismatch { .. })));

    let req = OperatorRequest::from_json_str(
        r#"{"operator": "lerp", "inputs": [{"uint": 1}, {"const": [2.0]}, {"const": [0.5]}]}"#,
    )
    .unwrap();
    assert!(matches!(req.build(), Err(OpError::TypeMismatch { .. })));
}
