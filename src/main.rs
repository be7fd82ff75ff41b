use anyhow::{Context, Result};
use clap::Parser;

mod cli;

use vmonitor::display::{DisplayAdapter, DisplayWrapper, OutputFormat};
use vmonitor::logging::{init_logging, LoggingConfig};
use vmonitor::renderer::{ClipPolicy, ErrorPolicy};
use vmonitor::scene::Scene;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    if args.list_scenes {
        for name in Scene::builtin_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let format = OutputFormat::from_path(&args.output).with_context(|| {
        format!(
            "Unsupported output format: {} (expected .png or .gif)",
            args.output.display()
        )
    })?;

    let mut scene = Scene::resolve(&args.scene)?.with_device_size(args.width, args.height);
    if args.clamp {
        scene.clip = ClipPolicy::Clamp;
    }
    if args.skip_invalid {
        scene.on_error = ErrorPolicy::Skip;
    }

    log::info!(
        "rendering scene '{}' at {}x{}",
        scene.name,
        scene.device.width,
        scene.device.height
    );

    let mut session = scene.build()?;
    let stats = session
        .render()
        .with_context(|| format!("Failed to rasterize scene '{}'", scene.name))?;

    if stats.skipped > 0 {
        log::warn!("{} of {} points skipped", stats.skipped, stats.drawn + stats.skipped);
    }

    let mut display = DisplayWrapper::new(args.output.clone(), format, session.background);
    display.present(&session.device, &session.palette)?;

    println!(
        "{} points -> {} ({})",
        stats.drawn,
        args.output.display(),
        format.extension()
    );
    Ok(())
}
