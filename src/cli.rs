use anyhow::{Result, anyhow};
use pico_args::Arguments;
use std::env;

use crate::config::{self, Tunables};
use crate::events::{TraceFile, TraceStep};
use crate::geometry::damping;
use crate::render::{NullOverlay, RecordingRenderer};
use crate::viewer::Viewer;

pub fn run() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // No args -> general help
    if env::args().len() == 1 {
        print_help();
        return Ok(());
    }

    if pargs.contains("-h") || pargs.contains("--help") {
        print_help();
        return Ok(());
    }

    let subcmd: Option<String> = pargs.free_from_str().ok();

    match subcmd.as_deref() {
        Some("help") => {
            let topic: Option<String> = pargs.free_from_str().ok();
            if let Some(t) = topic {
                print_subcmd_help(&t);
            } else {
                print_help();
            }
            Ok(())
        }

        Some("replay") => {
            let use_defaults = pargs.contains("--defaults");
            let path: String = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: flickview replay <trace.json> [--defaults]"))?;
            let tunables = if use_defaults {
                Tunables::default()
            } else {
                config::load_or_install_default()?
            };
            replay(&path, tunables)
        }

        Some("curve") => {
            let mut values: Vec<f64> = Vec::new();
            while let Ok(v) = pargs.free_from_str::<f64>() {
                values.push(v);
            }
            if values.is_empty() {
                // default sweep across and past the breakpoints
                values = (0..=10).map(|i| i as f64 * 20.0).collect();
            }
            for v in values {
                println!("{v:>8.2} -> {:.4}", damping(v));
            }
            Ok(())
        }

        Some("config") => {
            let tunables = config::load_or_install_default()?;
            print_response(&serde_json::json!({"ok": true, "data": tunables}));
            Ok(())
        }

        Some(other) => {
            eprintln!("unknown subcommand: {other}\n");
            print_help();
            Ok(())
        }

        None => {
            print_help();
            Ok(())
        }
    }
}

/// Drive a headless viewer through a recorded trace and print every
/// presentation write it produces.
fn replay(path: &str, tunables: Tunables) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read {path}: {e}"))?;
    let trace: TraceFile =
        serde_json::from_str(&text).map_err(|e| anyhow!("failed to parse {path}: {e}"))?;

    let sources: Vec<_> = trace.images.iter().map(|n| Some(*n)).collect();
    let mut viewer = Viewer::new(
        &sources,
        trace.viewport,
        tunables,
        RecordingRenderer::new(),
        NullOverlay::default(),
    )?;
    viewer.renderer_mut().clear();

    for step in &trace.steps {
        match step {
            TraceStep::Start(ev) => viewer.handle_contacts_start(ev),
            TraceStep::Move(ev) => viewer.handle_contacts_move(ev),
            TraceStep::End(ev) => viewer.handle_contacts_end(ev),
            TraceStep::Tap {
                page_x,
                page_y,
                on_active_image,
                timestamp_ms,
            } => viewer.handle_tap(*page_x, *page_y, *on_active_image, *timestamp_ms),
            TraceStep::Frame => viewer.on_frame(),
        }
        for op in viewer.renderer().ops.iter() {
            println!("{}", serde_json::to_string(op)?);
        }
        viewer.renderer_mut().clear();
    }

    print_response(&serde_json::json!({"ok": true, "data": {
        "steps": trace.steps.len(),
        "current_index": viewer.current_index(),
        "images": viewer.image_count(),
        "zoomed": viewer.is_zoomed(),
        "state": format!("{:?}", viewer.gesture_state()),
    }}));
    Ok(())
}

fn print_help() {
    println!(
        r#"flickview - image carousel gesture/physics engine

USAGE:
  flickview help [command]              Show general or command-specific help
  flickview replay <trace.json>         Replay a recorded touch trace headlessly
  flickview curve [values...]           Print the rubber-band damping curve
  flickview config                      Show the effective tunables

TIPS:
  - Tunables: ~/.config/flickview/config.toml (installed on first run)
  - replay --defaults ignores the config file and uses built-in tunables
  - RUST_LOG=debug surfaces per-gesture classification decisions
"#
    );
}

fn print_subcmd_help(cmd: &str) {
    match cmd {
        "replay" => println!(
            "usage: flickview replay <trace.json> [--defaults]\nReplays a JSON touch trace through a headless viewer and prints every\nrenderer write as a JSON line, then a summary."
        ),
        "curve" => println!(
            "usage: flickview curve [values...]\nPrints damping(value) for each value, or a default sweep when none given."
        ),
        "config" => println!(
            "usage: flickview config\nLoads (installing the default if missing) and prints the tunables."
        ),
        _ => {
            eprintln!("unknown command: {cmd}\n");
            print_help();
        }
    }
}

fn print_response(v: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(v).unwrap_or_default());
}
