use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::geometry::{Object2D, Point2D, Universe, Window};
use crate::renderer::{
    BufferDevice, ClipPolicy, Color, ColorIndex, ErrorPolicy, Palette, RasterStats, Rasterizer,
};

const BUILTIN_SCENES: &[(&str, &str)] = &[
    ("grid", include_str!("../../scenes/grid.yaml")),
    ("diagonal", include_str!("../../scenes/diagonal.yaml")),
];

/// Everything needed to render one picture, as read from a YAML/JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default = "default_name")]
    pub name: String,

    pub universe: Bounds,

    /// Viewport; frames the whole universe when omitted
    #[serde(default)]
    pub window: Option<Bounds>,

    pub device: DeviceSize,

    pub palette: PaletteConfig,

    #[serde(default)]
    pub background: Option<BackgroundValue>,

    #[serde(default)]
    pub clip: ClipPolicy,

    #[serde(default)]
    pub on_error: ErrorPolicy,

    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

fn default_name() -> String {
    "untitled".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSize {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Defaults to the number of listed colors
    #[serde(default)]
    pub capacity: Option<usize>,
    pub colors: Vec<[f32; 3]>,
}

/// Background given either as a palette index or as an RGB triple matched
/// to the nearest palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackgroundValue {
    Index(usize),
    Rgb([f32; 3]),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub points: Vec<PointConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointConfig {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub color: usize,
}

/// The caller-owned entities of one rendering session.
pub struct Session {
    pub universe: Universe,
    pub window: Window,
    pub device: BufferDevice,
    pub palette: Palette,
    pub objects: Vec<Object2D>,
    pub background: Option<ColorIndex>,
    pub rasterizer: Rasterizer,
}

impl Session {
    /// Clear to the background (if any) and rasterize every object.
    pub fn render(&mut self) -> Result<RasterStats> {
        if let Some(background) = self.background {
            self.device.clear(background);
        }

        for (i, object) in self.objects.iter().enumerate() {
            let outside = object.iter().filter(|p| !self.universe.contains(p)).count();
            if outside > 0 {
                log::debug!("object {} has {} points outside the universe", i, outside);
            }
        }

        let stats = self
            .rasterizer
            .draw_objects(&self.objects, &self.palette, &mut self.device)?;
        Ok(stats)
    }
}

impl Scene {
    /// Load scene from filesystem path; `.json` is parsed as JSON, anything else as YAML
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {}", path.display()))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let scene: Scene = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse scene JSON: {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse scene YAML: {}", path.display()))?
        };

        Ok(scene)
    }

    /// Load scene by name, searching embedded scenes first, then filesystem
    pub fn load_by_name(name: &str) -> Result<Self> {
        if let Ok(scene) = Self::load_builtin(name) {
            return Ok(scene);
        }

        for base_path in Self::scene_search_paths() {
            for ext in ["yaml", "yml", "json"] {
                let scene_path = base_path.join(format!("{}.{}", name, ext));
                if scene_path.exists() {
                    return Self::load(&scene_path);
                }
            }
        }

        anyhow::bail!("Scene '{}' not found in embedded scenes or filesystem", name)
    }

    /// Accepts either a path to a scene file or a scene name
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        let path = Path::new(name_or_path);
        if path.is_file() {
            Self::load(path)
        } else {
            Self::load_by_name(name_or_path)
        }
    }

    fn scene_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("scenes")];

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "vmonitor") {
            paths.push(proj_dirs.data_dir().join("scenes"));
            paths.push(proj_dirs.config_dir().join("scenes"));
        }

        paths.push(PathBuf::from("/usr/share/vmonitor/scenes"));
        paths.push(PathBuf::from("/usr/local/share/vmonitor/scenes"));

        paths
    }

    pub fn load_builtin(name: &str) -> Result<Self> {
        let yaml = BUILTIN_SCENES
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, yaml)| *yaml)
            .with_context(|| {
                format!(
                    "Unknown builtin scene: {}. Available scenes: {}",
                    name,
                    Self::builtin_names().join(", ")
                )
            })?;

        let scene: Scene = serde_yaml::from_str(yaml)
            .with_context(|| format!("Failed to parse embedded scene: {}", name))?;

        Ok(scene)
    }

    pub fn builtin_names() -> Vec<&'static str> {
        BUILTIN_SCENES.iter().map(|(name, _)| *name).collect()
    }

    pub fn with_device_size(mut self, width: Option<usize>, height: Option<usize>) -> Self {
        if let Some(width) = width {
            self.device.width = width;
        }
        if let Some(height) = height {
            self.device.height = height;
        }
        self
    }

    /// Allocate the session entities described by this scene.
    pub fn build(&self) -> Result<Session> {
        let universe = Universe::new(
            self.universe.xmin,
            self.universe.xmax,
            self.universe.ymin,
            self.universe.ymax,
        );
        let window = match self.window {
            Some(b) => Window::new(b.xmin, b.xmax, b.ymin, b.ymax),
            None => universe.window(),
        };

        let device = BufferDevice::new(self.device.width, self.device.height)
            .with_context(|| format!("Invalid device size in scene '{}'", self.name))?;

        let capacity = self.palette.capacity.unwrap_or(self.palette.colors.len());
        let colors = self
            .palette
            .colors
            .iter()
            .map(|[r, g, b]| Color::new(*r, *g, *b));
        let palette = Palette::from_colors(capacity, colors)
            .with_context(|| format!("Palette of scene '{}' does not fit its capacity", self.name))?;

        let background = match self.background {
            None => None,
            Some(BackgroundValue::Index(i)) => Some(
                palette
                    .index(i)
                    .with_context(|| format!("Invalid background in scene '{}'", self.name))?,
            ),
            Some(BackgroundValue::Rgb([r, g, b])) => palette.closest(r, g, b),
        };

        let objects = self
            .objects
            .iter()
            .map(|object| {
                Object2D::from_points(
                    object
                        .points
                        .iter()
                        .map(|p| Point2D::new(p.x, p.y, p.color))
                        .collect(),
                )
            })
            .collect();

        let rasterizer = Rasterizer::new(window)
            .with_clip(self.clip)
            .with_error_policy(self.on_error);

        log::debug!(
            "scene '{}': {}x{} device, {} colors, {} objects",
            self.name,
            device.width(),
            device.height(),
            palette.len(),
            self.objects.len()
        );

        Ok(Session {
            universe,
            window,
            device,
            palette,
            objects,
            background,
            rasterizer,
        })
    }
}
