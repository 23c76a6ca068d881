use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use stackgraph::{
    Alignment, Axis, AxisLength, BlurEffect, BlurStyle, CircleContent, Color, DynamicResolution,
    GradientContent, GradientDirection, GradientStop, Node, RenderOptions, Renderer, Resolution,
    Specification, value::MetadataValue,
};

#[derive(Parser, Debug)]
#[command(name = "stackgraph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the demo graph as a PNG.
    Render(RenderArgs),
    /// Print the demo graph's negotiated size and fingerprint.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[arg(long, default_value_t = 960)]
    width: u32,

    #[arg(long, default_value_t = 540)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Largest extent rendered in one pass; bigger targets are tiled.
    #[arg(long)]
    max_tile: Option<u32>,

    /// Pixels rendered around each tile.
    #[arg(long, default_value_t = 0.0)]
    padding: f64,

    /// Worker threads (defaults to rayon's choice).
    #[arg(long)]
    threads: Option<usize>,

    /// Render children and tiles one at a time.
    #[arg(long)]
    sequential: bool,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    #[arg(long, default_value_t = 960)]
    width: u32,

    #[arg(long, default_value_t = 540)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn demo_graph() -> Node {
    let dot = |color: Color| {
        Node::sized(
            CircleContent::new()
                .color(color)
                .radius(MetadataValue::resolution_minimum(0.4)),
            DynamicResolution::new(AxisLength::Auto, AxisLength::Fixed(60.0), AxisLength::Auto),
        )
    };
    let row = Node::hstack(vec![
        Node::spacer_min(8.0),
        dot(Color::rgb(0.93, 0.33, 0.31)),
        Node::spacer(),
        dot(Color::rgb(0.98, 0.76, 0.25)),
        Node::spacer(),
        dot(Color::rgb(0.26, 0.65, 0.96)),
        Node::spacer_min(8.0),
    ]);
    let glow = Node::effect(
        row,
        BlurEffect::new(BlurStyle::Gaussian, MetadataValue::Fixed(6.0)),
    );
    let background = Node::content(GradientContent::new(
        GradientDirection::Vertical,
        vec![
            GradientStop::new(0.0, Color::rgb(0.07, 0.08, 0.11)),
            GradientStop::new(1.0, Color::rgb(0.22, 0.24, 0.33)),
        ],
    ));
    Node::stack(Axis::Vertical, Alignment::Center, vec![glow, background])
}

fn specification(width: u32, height: u32) -> Specification {
    Specification::new(Resolution::flat(f64::from(width), f64::from(height)))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut options = RenderOptions {
        parallel: !args.sequential,
        threads: args.threads,
        tile_padding: args.padding,
        ..RenderOptions::default()
    };
    if let Some(max) = args.max_tile {
        options.max_tile_extent = max;
    }

    let renderer = Renderer::new(options).context("configure renderer")?;
    let graph = demo_graph();
    let buffer = renderer
        .render(&graph, specification(args.width, args.height))
        .context("render demo graph")?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        buffer.slice(0),
        buffer.width(),
        buffer.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        buffer.width(),
        buffer.height()
    );
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let graph = demo_graph();
    let spec = specification(args.width, args.height);
    let request = graph.resolution(&spec);
    let resolution = request.concretize(spec.resolution);
    let extent = graph
        .output_extent(resolution)
        .context("resolve demo graph")?;
    let fp = graph.fingerprint();

    println!("request:     {request:?}");
    println!(
        "output:      {}x{}x{}",
        extent.width, extent.height, extent.depth
    );
    println!("fingerprint: {:016x}{:016x}", fp.hi, fp.lo);
    Ok(())
}
