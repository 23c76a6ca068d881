use super::*;
use crate::foundation::core::Color;
use crate::graph::content::ColorContent;

#[test]
fn default_options_are_valid() {
    let opts = RenderOptions::default();
    assert!(opts.validate().is_ok());
    assert!(opts.parallel);
    assert_eq!(opts.threads, None);
}

#[test]
fn zero_threads_is_rejected() {
    let opts = RenderOptions {
        threads: Some(0),
        ..RenderOptions::default()
    };
    assert!(matches!(opts.validate(), Err(GraphError::Validation(_))));
    assert!(build_thread_pool(Some(0)).is_err());
    assert!(Renderer::new(opts).is_err());
}

#[test]
fn zero_tile_extent_and_negative_padding_are_rejected() {
    let opts = RenderOptions {
        max_tile_extent: 0,
        ..RenderOptions::default()
    };
    assert!(opts.validate().is_err());
    let opts = RenderOptions {
        max_tile_extent: 1,
        ..RenderOptions::default()
    };
    assert!(opts.validate().is_err());
    let opts = RenderOptions {
        tile_padding: -1.0,
        ..RenderOptions::default()
    };
    assert!(opts.validate().is_err());
}

#[test]
fn cancel_token_is_shared_between_clones() {
    let token = CancelToken::new();
    let clone = token.clone();
    assert!(token.check().is_ok());
    clone.cancel();
    assert!(token.is_cancelled());
    assert!(token.check().unwrap_err().is_cancelled());
}

#[test]
fn cancelled_before_start_renders_nothing() {
    let renderer = Renderer::new(RenderOptions {
        parallel: false,
        ..RenderOptions::default()
    })
    .unwrap();
    renderer.cancel_token().cancel();
    let node = Node::content(ColorContent::new(Color::WHITE));
    let err = renderer
        .render(&node, Specification::new(Resolution::flat(4.0, 4.0)))
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[test]
fn external_token_replaces_the_renderer_token() {
    let token = CancelToken::new();
    let renderer = Renderer::new(RenderOptions::default())
        .unwrap()
        .with_cancel_token(token.clone());
    token.cancel();
    assert!(renderer.cancel_token().is_cancelled());
}

#[test]
fn leaf_renders_at_concrete_resolution() {
    let node = Node::framed(ColorContent::new(Color::WHITE), 3.0, 2.0);
    let out = render_graph(&node, Specification::new(Resolution::flat(10.0, 10.0))).unwrap();
    assert_eq!(out.extent, PixelExtent::new(3, 2, 1));
    assert!(out.data.iter().all(|b| *b == 255));
}
