use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vmonitor")]
#[command(version)]
#[command(about = "Rasterize a 2D point scene into an indexed buffer and dump it as PNG or GIF", long_about = None)]
pub struct Args {
    /// Scene name (builtin or searched in scene directories) or path to a .yaml/.json file
    #[arg(short, long, default_value = "grid")]
    pub scene: String,

    /// Output image (.png or .gif)
    #[arg(short, long, default_value = "monitor.png")]
    pub output: PathBuf,

    /// Override device width in pixels
    #[arg(long)]
    pub width: Option<usize>,

    /// Override device height in pixels
    #[arg(long)]
    pub height: Option<usize>,

    /// Clamp out-of-range points onto the buffer edge instead of rejecting them
    #[arg(long)]
    pub clamp: bool,

    /// Skip points that cannot be drawn instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Log filter (env_logger syntax, overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,

    /// List builtin scenes and exit
    #[arg(long)]
    pub list_scenes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["vmonitor"]);
        assert_eq!(args.scene, "grid");
        assert_eq!(args.output, PathBuf::from("monitor.png"));
        assert!(!args.clamp && !args.skip_invalid && !args.list_scenes);
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from([
            "vmonitor", "-s", "diagonal", "-o", "out.gif", "--width", "32", "--clamp",
            "--log", "debug",
        ]);
        assert_eq!(args.scene, "diagonal");
        assert_eq!(args.width, Some(32));
        assert_eq!(args.height, None);
        assert!(args.clamp);
        assert_eq!(args.log.as_deref(), Some("debug"));
    }
}
