use super::*;
use crate::graph::node::ExprKind;
use crate::test_eval::{assert_close, assert_lanes_close, fold};

#[test]
fn luma_weights_rgb_and_ignores_alpha() {
    let white = Expr::from([1.0f32, 1.0, 1.0]);
    assert_close(fold(&color_luma(&white).unwrap()).scalar(), 1.0);

    let red = Expr::from([1.0f32, 0.0, 0.0, 0.5]);
    assert_close(fold(&color_luma(&red).unwrap()).scalar(), 0.299);

    assert!(matches!(
        color_luma(&Expr::from([1.0f32, 1.0])),
        Err(OpError::TypeMismatch { .. })
    ));
}

#[test]
fn gamma_round_trip_rgb() {
    let rgb = [0.0f32, 0.25, 0.8];
    let x = Expr::from(rgb);
    let linear = gamma_to_linear(&x).unwrap();
    assert_eq!(linear.value_type(), ValueType::Float3);
    assert_lanes_close(&fold(&linear), &rgb.map(|c| c.powf(2.2)));

    let back = linear_to_gamma(&linear).unwrap();
    assert_lanes_close(&fold(&back), &rgb);
}

#[test]
fn alpha_channel_passes_through() {
    let rgba = Expr::input("rgba", ValueType::Float4);
    for out in [
        gamma_to_linear(&rgba).unwrap(),
        linear_to_gamma(&rgba).unwrap(),
    ] {
        assert_eq!(out.value_type(), ValueType::Float4);
        let ExprKind::Combine(parts) = out.kind() else {
            panic!("expected combine");
        };
        match parts[3].kind() {
            ExprKind::Index { source, channel } => {
                assert!(Expr::ptr_eq(source, &rgba));
                assert_eq!(*channel, 3);
            }
            other => panic!("alpha was rewritten: {other:?}"),
        }
    }

    let folded = fold(&linear_to_gamma(&Expr::from([0.5f32, 0.5, 0.5, 0.3])).unwrap());
    assert_close(folded.lanes()[3], 0.3);
}

#[test]
fn gamma_rejects_other_widths() {
    for bad in [
        Expr::from(0.5f32),
        Expr::from([0.5f32, 0.5]),
        Expr::from(1u32),
    ] {
        assert!(matches!(
            gamma_to_linear(&bad),
            Err(OpError::InvalidArgument(_))
        ));
        assert!(matches!(
            linear_to_gamma(&bad),
            Err(OpError::InvalidArgument(_))
        ));
    }
}
