use super::*;
use crate::test_eval::{assert_lanes_close, fold};

fn inputs(types: &[ValueType]) -> Vec<Expr> {
    types
        .iter()
        .enumerate()
        .map(|(i, t)| Expr::input(format!("n{i}"), *t))
        .collect()
}

#[test]
fn widest_float_wins() {
    let nodes = inputs(&[ValueType::Float, ValueType::Float3, ValueType::Float2]);
    assert_eq!(find_max_float_n_value_type(&nodes), Some(ValueType::Float3));
}

#[test]
fn integers_never_win_over_floats() {
    let nodes = inputs(&[ValueType::Float, ValueType::Int32, ValueType::Uint32]);
    assert_eq!(find_max_float_n_value_type(&nodes), Some(ValueType::Float));
}

#[test]
fn ties_go_to_the_last_node() {
    let nodes = inputs(&[ValueType::Uint32, ValueType::Int32]);
    assert_eq!(find_max_float_n_value_type(&nodes), Some(ValueType::Int32));
    assert_eq!(find_max_float_n_value_type(&[]), None);
}

#[test]
fn arity_below_two_is_untouched() {
    assert!(upcast_all_float_n(&[], 0.0).unwrap().is_empty());

    let one = inputs(&[ValueType::Float]);
    let out = upcast_all_float_n(&one, 0.0).unwrap();
    assert_eq!(out.len(), 1);
    assert!(Expr::ptr_eq(&out[0], &one[0]));
}

#[test]
fn upcast_widens_floats_and_keeps_integers() {
    let nodes = inputs(&[
        ValueType::Float,
        ValueType::Int32,
        ValueType::Float4,
        ValueType::Float2,
    ]);
    let out = upcast_all_float_n(&nodes, 0.0).unwrap();
    let types: Vec<ValueType> = out.iter().map(Expr::value_type).collect();
    assert_eq!(
        types,
        vec![
            ValueType::Float4,
            ValueType::Int32,
            ValueType::Float4,
            ValueType::Float4
        ]
    );
    assert!(Expr::ptr_eq(&out[1], &nodes[1]));
    assert!(Expr::ptr_eq(&out[2], &nodes[2]));
}

#[test]
fn upcast_forwards_default_value() {
    let nodes = vec![Expr::from([1.0f32, 2.0]), Expr::from([0.0f32; 3])];
    let out = upcast_all_float_n(&nodes, 9.0).unwrap();
    assert_lanes_close(&fold(&out[0]), &[1.0, 2.0, 9.0]);
}

#[test]
fn unify_op_applies_to_unified_operands() {
    let s = Expr::from(3.0f32);
    let v = Expr::from([1.0f32, 2.0, 3.0]);
    let sum = unify_op2(|a, b| a + b, &s, &v).unwrap();
    assert_eq!(sum.value_type(), ValueType::Float3);
    assert_lanes_close(&fold(&sum), &[4.0, 5.0, 6.0]);

    let picked = unify_op3(|a, _, c| c.min(a), &v, &s, &Expr::from(2.0f32)).unwrap();
    assert_lanes_close(&fold(&picked), &[1.0, 2.0, 2.0]);
}
