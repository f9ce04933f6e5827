use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};
use crate::error::AppError;

pub const SAVE_DEBOUNCE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "colors")]
    pub colors: ColorSettings,

    #[serde(rename = "switchColors")]
    pub switch_team_colors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSettings {
    /// ARGB
    #[serde(rename = "mainColor")]
    pub main_color: u32,

    #[serde(rename = "contrast")]
    pub contrast: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            colors: ColorSettings {
                main_color: 0xFF5A_6ACF,
                contrast: 0.5,
            },
            switch_team_colors: false,
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("league_live")
            .join("settings.json")
    }

    /// Reads the settings file, writing the defaults first if it does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, AppError> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                AppError::SettingsError(format!("Failed to parse {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let settings = Settings::default();
                settings.save(path)?;
                info!(path = %path.display(), "Wrote default settings");
                Ok(settings)
            }
            Err(e) => Err(AppError::SettingsError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                AppError::SettingsError(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::SettingsError(format!("Failed to serialize settings: {}", e)))?;

        fs::write(path, json).map_err(|e| {
            AppError::SettingsError(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    pub fn main_rgb(&self) -> (u8, u8, u8) {
        let c = self.colors.main_color;
        ((c >> 16) as u8, (c >> 8) as u8, c as u8)
    }

    pub fn set_main_rgb(&mut self, rgb: u32) {
        self.colors.main_color = 0xFF00_0000 | (rgb & 0x00FF_FFFF);
    }
}

/// Parses `RRGGBB` or `#RRGGBB`.
pub fn parse_rgb(raw: &str) -> Result<u32, AppError> {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Err(AppError::SettingsError(format!("Expected a RRGGBB color, got '{}'", raw)));
    }
    u32::from_str_radix(hex, 16)
        .map_err(|_| AppError::SettingsError(format!("Expected a RRGGBB color, got '{}'", raw)))
}

/// Writes settings in the background once changes have been quiet for the
/// debounce period. Dropping or calling [`SettingsSaver::finish`] flushes
/// any pending change.
pub struct SettingsSaver {
    settings: Settings,
    tx: Option<Sender<Settings>>,
    worker: Option<JoinHandle<()>>,
}

impl SettingsSaver {
    pub fn new(path: PathBuf, settings: Settings, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<Settings>();

        let worker = thread::spawn(move || {
            while let Ok(mut pending) = rx.recv() {
                loop {
                    match rx.recv_timeout(debounce) {
                        Ok(newer) => {
                            debug!("Settings changed again, restarting save timer");
                            pending = newer;
                        }
                        Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }

                match pending.save(&path) {
                    Ok(()) => info!(path = %path.display(), "Settings saved"),
                    Err(e) => warn!(error = %e, "Settings save failed"),
                }
            }
        });

        SettingsSaver {
            settings,
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update(&mut self, modify: impl FnOnce(&mut Settings)) {
        modify(&mut self.settings);
        if let Some(tx) = &self.tx {
            let _ = tx.send(self.settings.clone());
        }
    }

    /// Flushes pending writes and stops the background thread.
    pub fn finish(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        drop(self.tx.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for SettingsSaver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
