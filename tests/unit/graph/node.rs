use super::*;

#[test]
fn constants_carry_their_value_type() {
    assert_eq!(Expr::from(1.5f32).value_type(), ValueType::Float);
    assert_eq!(Expr::from([1.0f32, 2.0]).value_type(), ValueType::Float2);
    assert_eq!(Expr::from([0.0f32; 3]).value_type(), ValueType::Float3);
    assert_eq!(Expr::from([0.0f32; 4]).value_type(), ValueType::Float4);
    assert_eq!(Expr::from(-3i32).value_type(), ValueType::Int32);
    assert_eq!(Expr::from(7u32).value_type(), ValueType::Uint32);
}

#[test]
fn splat_truncates_and_wraps_integers() {
    assert_eq!(ConstVal::splat(3.7, ValueType::Int32), ConstVal::Int32(3));
    assert_eq!(ConstVal::splat(0.5, ValueType::Uint32), ConstVal::Uint32(0));
    assert_eq!(
        ConstVal::splat(-1.0, ValueType::Uint32),
        ConstVal::Uint32(u32::MAX)
    );
    assert_eq!(
        ConstVal::splat(2.0, ValueType::Float3),
        ConstVal::Float3([2.0; 3])
    );
}

#[test]
fn primitive_result_types() {
    let v = Expr::input("v", ValueType::Float3);
    let u = Expr::input("u", ValueType::Uint32);

    assert_eq!((&v + &v).value_type(), ValueType::Float3);
    assert_eq!(v.floor().value_type(), ValueType::Float3);
    assert_eq!(v.index(2).value_type(), ValueType::Float);
    assert_eq!((&u << 4).value_type(), ValueType::Uint32);
    assert_eq!(u.cast_uint_to_float().value_type(), ValueType::Float);
    assert_eq!(Expr::system_seed().value_type(), ValueType::Uint32);
    assert_eq!(
        Expr::fixed_random(u.clone(), true).value_type(),
        ValueType::Float
    );
}

#[test]
fn combine_types_by_component_count() {
    let x = Expr::input("x", ValueType::Float);
    let c = Expr::combine([x.clone(), x.clone(), x]).unwrap();
    assert_eq!(c.value_type(), ValueType::Float3);
}

#[test]
fn combine_rejects_bad_shapes() {
    let x = Expr::input("x", ValueType::Float);
    let v = Expr::input("v", ValueType::Float2);
    assert!(matches!(
        Expr::combine([x.clone()]),
        Err(OpError::InvalidArgument(_))
    ));
    assert!(matches!(
        Expr::combine(vec![x.clone(); 5]),
        Err(OpError::InvalidArgument(_))
    ));
    assert!(matches!(
        Expr::combine([x, v]),
        Err(OpError::InvalidArgument(_))
    ));
}

#[test]
fn clone_preserves_identity() {
    let a = Expr::input("a", ValueType::Float);
    let b = a.clone();
    assert!(Expr::ptr_eq(&a, &b));
    assert!(!Expr::ptr_eq(&a, &Expr::input("a", ValueType::Float)));
}

#[test]
fn display_is_shader_like() {
    let p = Expr::input("p", ValueType::Float3);
    let r = Expr::input("r", ValueType::Float);
    let c = Expr::combine([p.index(0), p.index(1), r.clone()]).unwrap();
    assert_eq!(c.to_string(), "float3(p.x, p.y, r)");
    assert_eq!((&r * &Expr::from(0.5f32)).to_string(), "(r * 0.5)");
    assert_eq!(r.min(&r).to_string(), "min(r, r)");
    assert_eq!(Expr::from([1.0f32, 2.0]).to_string(), "float2(1, 2)");

    let u = Expr::input("u", ValueType::Uint32);
    assert_eq!((&u >> 16).to_string(), "(u >> 16u)");
}

#[test]
fn nodes_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Expr>();
}
