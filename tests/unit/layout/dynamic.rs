use super::*;

fn fixed(w: f64, h: f64) -> DynamicResolution {
    DynamicResolution::new(AxisLength::Fixed(w), AxisLength::Fixed(h), AxisLength::Fixed(1.0))
}

fn auto_width(h: f64) -> DynamicResolution {
    DynamicResolution::new(AxisLength::Auto, AxisLength::Fixed(h), AxisLength::Fixed(1.0))
}

fn classify(r: DynamicResolution) -> [u8; 3] {
    fn c(l: AxisLength) -> u8 {
        match l {
            AxisLength::Fixed(_) => 0,
            AxisLength::Auto => 1,
            AxisLength::Spacer { .. } => 2,
        }
    }
    [c(r.width), c(r.height), c(r.depth)]
}

#[test]
fn fixed_children_sum_along_axis_and_max_across() {
    let r = DynamicResolution::stacked([fixed(100.0, 20.0), fixed(50.0, 40.0)], Axis::Horizontal);
    assert_eq!(r.width, AxisLength::Fixed(150.0));
    assert_eq!(r.height, AxisLength::Fixed(40.0));
    assert_eq!(r.depth, AxisLength::Fixed(1.0));
    assert!(r.is_concrete());
}

#[test]
fn one_auto_child_makes_the_axis_auto() {
    let r = DynamicResolution::stacked([fixed(100.0, 20.0), auto_width(10.0)], Axis::Horizontal);
    assert_eq!(r.width, AxisLength::Auto);
    assert_eq!(r.height, AxisLength::Fixed(20.0));
    assert!(!r.is_concrete());
}

#[test]
fn spacers_carry_their_minimum_forward() {
    let r = DynamicResolution::stacked(
        [fixed(100.0, 20.0), DynamicResolution::spacer(8.0), fixed(10.0, 5.0)],
        Axis::Horizontal,
    );
    assert_eq!(r.width, AxisLength::Spacer { minimum: 118.0 });
    assert_eq!(r.height, AxisLength::Fixed(20.0));
}

#[test]
fn merge_is_order_independent() {
    let a = fixed(100.0, 20.0);
    let b = auto_width(30.0);
    let c = DynamicResolution::spacer(5.0);
    for axis in [Axis::Horizontal, Axis::Vertical, Axis::Depth] {
        let abc = DynamicResolution::stacked([a, b, c], axis);
        let cab = DynamicResolution::stacked([c, a, b], axis);
        let bca = DynamicResolution::stacked([b, c, a], axis);
        assert_eq!(classify(abc), classify(cab));
        assert_eq!(classify(abc), classify(bca));
        assert_eq!(abc, cab);
    }

    let fixed_only = [fixed(1.0, 2.0), fixed(3.0, 4.0), DynamicResolution::spacer(2.0)];
    let rev = [fixed_only[2], fixed_only[0], fixed_only[1]];
    assert_eq!(
        DynamicResolution::stacked(fixed_only, Axis::Vertical),
        DynamicResolution::stacked(rev, Axis::Vertical)
    );
}

#[test]
fn empty_stack_is_auto() {
    let r = DynamicResolution::stacked(std::iter::empty(), Axis::Depth);
    assert_eq!(r, DynamicResolution::AUTO);
}

#[test]
fn concretize_fills_from_ambient() {
    let r = DynamicResolution::new(
        AxisLength::Fixed(10.0),
        AxisLength::Auto,
        AxisLength::Spacer { minimum: 4.0 },
    );
    assert_eq!(
        r.concretize(Resolution::new(200.0, 100.0, 1.0)),
        Resolution::new(10.0, 100.0, 4.0)
    );
}
