use std::collections::HashSet;

use super::*;
use crate::foundation::core::Color;
use crate::graph::content::{ColorContent, SpacerContent};

fn solid(c: Color) -> Node {
    Node::content(ColorContent::new(c))
}

fn spec(w: f64, h: f64) -> Specification {
    Specification::new(Resolution::flat(w, h))
}

#[test]
fn auto_child_makes_stack_axis_auto() {
    let tree = Node::hstack(vec![
        Node::framed(ColorContent::new(Color::WHITE), 100.0, 40.0),
        solid(Color::BLACK),
    ]);
    let r = tree.resolution(&spec(300.0, 100.0));
    assert_eq!(r.width, AxisLength::Auto);
    assert_eq!(r.height, AxisLength::Auto);
}

#[test]
fn framed_children_fix_the_stack() {
    let tree = Node::vstack(vec![
        Node::framed(ColorContent::new(Color::WHITE), 100.0, 40.0),
        Node::framed(ColorContent::new(Color::BLACK), 60.0, 10.0),
    ]);
    let r = tree.resolution(&spec(300.0, 100.0));
    assert_eq!(r.width, AxisLength::Fixed(100.0));
    assert_eq!(r.height, AxisLength::Fixed(50.0));
    assert_eq!(r.depth, AxisLength::Auto);

    let extent = tree.output_extent(r.concretize(spec(300.0, 100.0).resolution)).unwrap();
    assert_eq!(extent, PixelExtent::new(100, 50, 1));
}

#[test]
fn spacer_reports_spacer_everywhere() {
    let r = Node::spacer_min(12.0).resolution(&spec(10.0, 10.0));
    assert_eq!(r, DynamicResolution::spacer(12.0));
    assert_eq!(SpacerContent::new(12.0).name(), "spacer");
}

#[test]
fn empty_stack_fills_ambient() {
    let tree = Node::hstack(Vec::new());
    let r = tree.resolution(&spec(200.0, 100.0));
    assert_eq!(r, DynamicResolution::AUTO);
    assert_eq!(
        tree.output_extent(Resolution::flat(200.0, 100.0)).unwrap(),
        PixelExtent::new(200, 100, 1)
    );
}

#[test]
fn arrange_aligns_undersized_children() {
    let tree = StackNode {
        axis: Axis::Horizontal,
        alignment: Alignment::Trailing,
        children: vec![
            Node::framed(ColorContent::new(Color::WHITE), 10.0, 20.0),
            Node::framed(ColorContent::new(Color::BLACK), 10.0, 40.0),
        ],
    };
    let (layout, total, regions) = tree.arrange(Resolution::flat(100.0, 100.0)).unwrap();
    assert_eq!(layout.children.len(), 2);
    assert_eq!(total, PixelExtent::new(20, 40, 1));
    assert_eq!(regions[0].origin.y, 20);
    assert_eq!(regions[1].origin.x, 10);
}

#[test]
fn fingerprint_is_structural() {
    let a = Node::hstack(vec![solid(Color::WHITE), Node::spacer()]);
    let b = Node::hstack(vec![solid(Color::WHITE), Node::spacer()]);
    let c = Node::hstack(vec![solid(Color::BLACK), Node::spacer()]);
    let d = Node::vstack(vec![solid(Color::WHITE), Node::spacer()]);

    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a, c);
    assert_ne!(a, d);

    let set: HashSet<Node> = [a, b, c, d].into_iter().collect();
    assert_eq!(set.len(), 3);
}

#[test]
fn frame_changes_fingerprint() {
    let plain = solid(Color::WHITE);
    let framed = Node::framed(ColorContent::new(Color::WHITE), 1.0, 1.0);
    assert_ne!(plain, framed);
}

#[test]
fn names_and_children() {
    let leaf = solid(Color::WHITE);
    assert_eq!(leaf.name(), "color");
    assert!(leaf.children().is_empty());

    let tree = Node::dstack(vec![leaf.clone(), leaf]);
    assert_eq!(tree.name(), "dstack");
    assert_eq!(tree.children().len(), 2);
}

#[test]
fn rasterize_uses_full_resolution_coordinates() {
    let ctx = ContentContext {
        resolution: Resolution::flat(10.0, 10.0),
        region: Region::new(
            crate::foundation::core::PixelOffset::new(4, 2, 0),
            PixelExtent::new(2, 1, 1),
        ),
    };
    let mut seen = Vec::new();
    let buffer = ctx.rasterize(|x, y, z| {
        seen.push((x, y, z));
        [0; 4]
    });
    assert_eq!(buffer.extent, PixelExtent::new(2, 1, 1));
    assert_eq!(seen, vec![(4.5, 2.5, 0.5), (5.5, 2.5, 0.5)]);
}
