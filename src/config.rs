use std::path::{Path, PathBuf};

use crate::foundation::error::{KeyglassError, KeyglassResult};

fn default_opacity() -> f32 {
    0.8
}

fn default_scale() -> f32 {
    1.0
}

fn default_position_y() -> i32 {
    100
}

fn default_auto_hide_secs() -> f32 {
    0.8
}

fn default_custom_width() -> u32 {
    800
}

fn default_custom_height() -> u32 {
    600
}

fn default_hotkey() -> String {
    if cfg!(target_os = "macos") {
        "Command+Option+Shift+Slash".to_string()
    } else {
        "Ctrl+Alt+Shift+Slash".to_string()
    }
}

/// Where the overlay window is anchored on the chosen monitor.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    /// Centered on the monitor.
    Center,
    /// Horizontally centered along the top edge.
    TopCenter,
    /// Horizontally centered along the bottom edge.
    #[default]
    BottomCenter,
    /// Positioned by the `position_x`/`position_y` offsets.
    Custom,
}

/// User-facing overlay settings, persisted as JSON.
///
/// The windowing, hotkey, and tray shells consume most of these; this crate
/// itself only acts on `opacity`, `invert`, `image_path`, and the sizing
/// fields. Values are sanitized on load so the rest of the crate can assume
/// in-range inputs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayConfig {
    /// Overlay opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Invert the overlay's colors (for dark keyboard themes).
    #[serde(default)]
    pub invert: bool,
    /// Global toggle hotkey, e.g. `"Ctrl+Alt+Shift+Slash"`.
    #[serde(default = "default_hotkey")]
    pub hotkey: String,
    /// Image scale relative to the monitor (0.5 = 50%).
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// X offset from center in pixels, used by [`PositionMode::Custom`].
    #[serde(default)]
    pub position_x: i32,
    /// Y offset from the bottom edge in pixels, used by
    /// [`PositionMode::Custom`].
    #[serde(default = "default_position_y")]
    pub position_y: i32,
    /// Use `custom_width_px`/`custom_height_px` instead of `scale`.
    #[serde(default)]
    pub use_custom_size: bool,
    /// Desired image width when `use_custom_size` is set.
    #[serde(default = "default_custom_width")]
    pub custom_width_px: u32,
    /// Desired image height when `use_custom_size` is set.
    #[serde(default = "default_custom_height")]
    pub custom_height_px: u32,
    /// Seconds before the overlay hides itself; `0` keeps it up until the
    /// hotkey toggles it.
    #[serde(default = "default_auto_hide_secs")]
    pub auto_hide_secs: f32,
    /// Window anchoring mode.
    #[serde(default)]
    pub position_mode: PositionMode,
    /// Register the app to start at login.
    #[serde(default)]
    pub start_at_login: bool,
    /// Let mouse events pass through the overlay window.
    #[serde(default)]
    pub click_through: bool,
    /// Keep the overlay above full-screen windows.
    #[serde(default)]
    pub always_on_top: bool,
    /// Overlay image path; `None` falls back to `keymap.png` beside the
    /// executable, then the embedded image.
    #[serde(default)]
    pub image_path: Option<PathBuf>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
            invert: false,
            hotkey: default_hotkey(),
            scale: default_scale(),
            position_x: 0,
            position_y: default_position_y(),
            use_custom_size: false,
            custom_width_px: default_custom_width(),
            custom_height_px: default_custom_height(),
            auto_hide_secs: default_auto_hide_secs(),
            position_mode: PositionMode::default(),
            start_at_login: false,
            click_through: false,
            always_on_top: false,
            image_path: None,
        }
    }
}

impl OverlayConfig {
    /// Load the configuration from `path`.
    ///
    /// A missing file yields the defaults; a file that exists but cannot be
    /// parsed is an error, so a typo never silently resets every setting.
    /// Loaded values are sanitized.
    pub fn load(path: &Path) -> KeyglassResult<Self> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(KeyglassError::config(format!(
                    "read config '{}': {e}",
                    path.display()
                )));
            }
        };

        let mut cfg: Self = serde_json::from_slice(&bytes).map_err(|e| {
            KeyglassError::config(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Write the configuration to `path` as pretty-printed JSON, creating
    /// parent directories as needed.
    pub fn save(&self, path: &Path) -> KeyglassResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                KeyglassError::config(format!("create config dir '{}': {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| KeyglassError::config(format!("serialize config: {e}")))?;
        std::fs::write(path, json).map_err(|e| {
            KeyglassError::config(format!("write config '{}': {e}", path.display()))
        })
    }

    /// Clamp out-of-range values to something the image pipeline accepts.
    ///
    /// This is the single boundary where `opacity` is forced into `[0, 1]`;
    /// the effect transform itself stays permissive.
    pub fn sanitize(&mut self) {
        self.opacity = if self.opacity.is_finite() {
            self.opacity.clamp(0.0, 1.0)
        } else {
            default_opacity()
        };
        self.scale = if self.scale.is_finite() {
            self.scale.clamp(0.1, 4.0)
        } else {
            default_scale()
        };
        self.auto_hide_secs = if self.auto_hide_secs.is_finite() {
            self.auto_hide_secs.max(0.0)
        } else {
            default_auto_hide_secs()
        };
        self.custom_width_px = self.custom_width_px.max(1);
        self.custom_height_px = self.custom_height_px.max(1);
        if self.image_path.as_deref().is_some_and(|p| !p.exists()) {
            self.image_path = None;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
