//! Application-wide configuration constants and the optional `flipbook.toml` overrides.

use crate::prelude::*;

pub const NAME: &str = concat!("Flipbook ", env!("CARGO_PKG_VERSION"));
/// Default window width.
pub const WIN_WIDTH: f32 = 1280.0;
/// Default window height.
pub const WIN_HEIGHT: f32 = 900.0;
/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "flipbook.toml";
/// Where page images are looked for when no location is given.
pub const DEFAULT_LOCATION: &str = "assets/pdf-images";

/// Highest page number probed during discovery.
pub const MAX_PAGES: usize = 300;
/// Consecutive misses (after the first hit) that end discovery.
pub const DISCOVERY_MISS_RUN: usize = 6;
/// Number of prepared pages kept decoded.
pub const CACHE_SIZE: usize = 40;
/// Pages prepared right after discovery.
pub const SEED_PAGES: usize = 5;

/// Click / key / wheel turn duration.
pub const FLIP_MS: u64 = 640;
/// Remaining rotation after a drag is released past the threshold.
pub const FLIP_MS_DRAG_DONE: u64 = 380;
/// Rotation back to flat after a drag is released short of the threshold.
pub const FLIP_MS_RETURN: u64 = 260;
/// Drag progress above which a release completes the turn.
pub const DRAG_COMPLETE_T: f32 = 0.45;
/// Lift applied to the sheet as soon as a drag grabs it.
pub const DRAG_NUDGE_DEG: f32 = 8.0;
/// Minimum spacing between two wheel-driven turns.
pub const WHEEL_THROTTLE_MS: u64 = 320;
/// Clicks are ignored for this long after a drag ends.
pub const CLICK_SUPPRESS_MS: u64 = 80;
/// Width of the grab zones on the outer edges, as a share of the book width.
pub const DRAG_ZONE: f32 = 0.15;

pub const FOLD_MAX: f32 = 0.50;
pub const FOLD_EXPONENT: f32 = 1.0;
pub const DEST_MAX: f32 = 0.65;
pub const STATIC_MAX: f32 = 0.85;
pub const DIM_MAX: f32 = 0.30;

/// Page aspect ratio (width / height) assumed until a page is decoded.
pub const DEFAULT_PAGE_AR: f32 = 2.0 / 3.0;
/// How long UI status messages stay visible, in seconds.
pub const LOG_TIMEOUT: usize = 2;

/// What `first()` and the slider's zero position show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    #[default]
    Cover,
    Spread,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub start: StartMode,
    pub max_pages: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            start: StartMode::Cover,
            max_pages: MAX_PAGES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub flip_ms: u64,
    pub drag_done_ms: u64,
    pub return_ms: u64,
    pub drag_commit_threshold: f32,
    pub drag_nudge_deg: f32,
    pub wheel_throttle_ms: u64,
    pub click_suppress_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            flip_ms: FLIP_MS,
            drag_done_ms: FLIP_MS_DRAG_DONE,
            return_ms: FLIP_MS_RETURN,
            drag_commit_threshold: DRAG_COMPLETE_T,
            drag_nudge_deg: DRAG_NUDGE_DEG,
            wheel_throttle_ms: WHEEL_THROTTLE_MS,
            click_suppress_ms: CLICK_SUPPRESS_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub capacity: usize,
    pub seed_pages: usize,
    pub miss_run: usize,
    pub decode_warmup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: CACHE_SIZE,
            seed_pages: SEED_PAGES,
            miss_run: DISCOVERY_MISS_RUN,
            decode_warmup: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Folder or base URL; the command line argument wins over this.
    pub location: Option<String>,
    #[serde(flatten)]
    pub naming: NamingScheme,
}

/// Everything `flipbook.toml` can override. Missing sections and keys keep
/// the constants above.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlipbookConfig {
    pub book: BookConfig,
    pub animation: AnimationConfig,
    pub cache: CacheConfig,
    pub shading: ShadingParams,
    pub source: SourceConfig,
}

impl FlipbookConfig {
    pub fn from_toml(s: &str) -> Result<Self, AppError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml(&s)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, AppError> {
        if path.is_file() {
            log::info!("Loading config from {}", path.display());
            Self::load(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn turn_timing(&self) -> TurnTiming {
        TurnTiming {
            flip: Duration::from_millis(self.animation.flip_ms),
            drag_done: Duration::from_millis(self.animation.drag_done_ms),
            drag_return: Duration::from_millis(self.animation.return_ms),
            commit_threshold: self.animation.drag_commit_threshold,
            drag_nudge_deg: self.animation.drag_nudge_deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let config = FlipbookConfig::from_toml("").unwrap();
        assert_eq!(config, FlipbookConfig::default());
        assert_eq!(config.cache.capacity, 40);
        assert_eq!(config.animation.flip_ms, 640);
        assert_eq!(config.book.start, StartMode::Cover);
    }

    #[test]
    fn partial_sections_override_only_named_keys() {
        let config = FlipbookConfig::from_toml(
            r#"
            [book]
            start = "spread"

            [animation]
            flip_ms = 500

            [shading]
            dest_max = 0.5

            [source]
            location = "scans"
            extensions = ["png"]
            "#,
        )
        .unwrap();

        assert_eq!(config.book.start, StartMode::Spread);
        assert_eq!(config.book.max_pages, MAX_PAGES);
        assert_eq!(config.animation.flip_ms, 500);
        assert_eq!(config.animation.return_ms, FLIP_MS_RETURN);
        assert_eq!(config.shading.dest_max, 0.5);
        assert_eq!(config.shading.static_max, STATIC_MAX);
        assert_eq!(config.source.location.as_deref(), Some("scans"));
        assert_eq!(config.source.naming.extensions, vec!["png".to_string()]);
        assert_eq!(config.source.naming.patterns.len(), 3);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let err = FlipbookConfig::from_toml("[book]\nstart = 3").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FlipbookConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, FlipbookConfig::default());
    }

    #[test]
    fn turn_timing_converts_milliseconds() {
        let timing = FlipbookConfig::default().turn_timing();
        assert_eq!(timing.flip, Duration::from_millis(640));
        assert_eq!(timing.drag_done, Duration::from_millis(380));
        assert_eq!(timing.drag_return, Duration::from_millis(260));
    }
}
