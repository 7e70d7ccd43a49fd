mod renderer;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use minkowski_core::model::{
    AnimationClock, DiagramSession, FrameState, Layout, SubmitError, parse_speed,
};
use minkowski_core::svg::render_svg;

/// Animated spacetime diagram: a rest frame, a moving frame and two observers.
#[derive(Debug, Parser)]
#[command(name = "minkowski", version, about)]
struct Args {
    /// Speed of the moving frame as a fraction of light speed.
    #[arg(long, default_value = "0.3", value_parser = speed_arg, allow_hyphen_values = true)]
    speed: f64,

    /// Rotate the frame by a fixed angle instead of boosting it.
    #[arg(long)]
    rotation: bool,

    /// Use a Lorentz boost instead of a Galilean shear.
    #[arg(long)]
    relativity: bool,

    /// Draw the diagram from the moving frame's point of view.
    #[arg(long)]
    inverse: bool,

    /// Diagram width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Diagram height in pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Write one frame as SVG to this path and exit.
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,

    /// Time step (0-9) of the exported frame.
    #[arg(long, default_value_t = 0)]
    time: u32,

    /// Use the dark palette for SVG export.
    #[arg(long)]
    dark: bool,

    /// Send log output to this file. The interactive view logs nowhere else.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn speed_arg(text: &str) -> Result<f64, SubmitError> {
    parse_speed(text)
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        // stderr would draw over the alternate screen.
        None if interactive => return Ok(()),
        None => {}
    }
    builder.try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref(), args.svg.is_none())?;

    let layout = Layout::with_size(args.width, args.height);
    let state = FrameState {
        speed: args.speed,
        rotation: args.rotation,
        relativity: args.relativity,
        inverse: args.inverse,
    };
    let mut session = DiagramSession::with_state(layout, state);

    if let Some(path) = &args.svg {
        session.seek(AnimationClock::at(args.time));
        let svg = render_svg(&session.render(), layout.width, layout.height, args.dark);
        std::fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote frame {} to {}", session.clock().index(), path.display());
        return Ok(());
    }

    renderer::run(session)
}
