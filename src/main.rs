//! Interactive ASCII ray caster
//!
//! Controls:
//! - W/S: Move forward/back
//! - A/D: Move left/right
//! - F/R: Move up/down
//! - Q or Escape: Quit
//!
//! Usage:
//!   ascii_raycast [MODEL]      - Render a binary STL model interactively
//!   ascii_raycast --debug      - Render one fixed-size frame to stdout

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use nalgebra::{Point3, Vector3};

use ascii_raycast::renderer::Renderer;
use ascii_raycast::terminal::{parse_key_event, Action, TerminalDisplay};
use ascii_raycast::{stl, Mesh};

/// Fallback frame size when rendering without a terminal.
const DEBUG_RESOLUTION: (usize, usize) = (160, 40);

#[derive(Debug, Parser)]
#[command(about = "Interactive terminal ray caster for binary STL meshes")]
struct Args {
    /// Binary STL model to render; a built-in box is used when omitted
    model: Option<PathBuf>,

    /// Render a single frame to stdout and exit
    #[arg(long, short)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mesh = load_mesh(&args)?;
    info!("mesh ready: {} triangles", mesh.len());

    if args.debug {
        run_debug(&mesh);
        return Ok(());
    }
    run_interactive(&mesh)
}

fn load_mesh(args: &Args) -> anyhow::Result<Mesh> {
    match &args.model {
        Some(path) => {
            stl::load(path).with_context(|| format!("loading model {}", path.display()))
        }
        None => Ok(Mesh::box_volume(
            Point3::new(0.0, 0.0, 10.0),
            Vector3::new(3.0, 0.0, 0.0),
            Vector3::new(0.0, 3.0, 0.0),
            Vector3::new(0.0, 0.0, 3.0),
        )),
    }
}

/// Render one frame at a fixed resolution without touching terminal modes.
fn run_debug(mesh: &Mesh) {
    let (width, height) = DEBUG_RESOLUTION;
    let renderer = Renderer::new(width, height);
    print!("{}", renderer.render(mesh));
}

/// The interactive loop: render a full frame, block for one keystroke, move
/// the camera, repeat. Exits on the quit keys or when the input stream ends.
fn run_interactive(mesh: &Mesh) -> anyhow::Result<()> {
    let mut terminal = TerminalDisplay::new().context("initializing terminal")?;
    let (cols, rows) = terminal.size();
    let mut renderer = Renderer::new(cols.max(10), rows.max(10));

    loop {
        let frame = renderer.render(mesh);
        let pos = renderer.camera().position;
        let status = format!(
            "pos ({:.0}, {:.0}, {:.0}) | [W/S] fwd/back  [A/D] strafe  [F/R] up/down  [Q]uit",
            pos.x, pos.y, pos.z
        );
        terminal.draw(&frame, &status)?;

        let key = match terminal.read_key() {
            Ok(key) => key,
            Err(e) => {
                warn!("input stream closed: {e}");
                break;
            }
        };
        match parse_key_event(key) {
            Action::Quit => break,
            action => renderer.camera_mut().apply(action),
        }

        if terminal.check_resize() {
            let (cols, rows) = terminal.size();
            renderer.resize(cols.max(10), rows.max(10));
        }
    }

    info!("shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mesh_is_the_builtin_box() {
        let args = Args {
            model: None,
            debug: false,
        };
        let mesh = load_mesh(&args).unwrap();
        assert_eq!(mesh.len(), 12);
    }

    #[test]
    fn test_missing_model_reports_path() {
        let args = Args {
            model: Some(PathBuf::from("does-not-exist.stl")),
            debug: false,
        };
        let err = load_mesh(&args).unwrap_err();
        assert!(format!("{err:#}").contains("does-not-exist.stl"));
    }
}
