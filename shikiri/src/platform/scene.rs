use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use super::Platform;
use crate::core::{MonitorInfo, Placement, Rect, WindowHandle};
use crate::error::PlatformError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub monitors: Vec<MonitorInfo>,
    #[serde(default)]
    pub windows: Vec<SceneWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneWindow {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl SceneWindow {
    fn is_eligible(&self) -> bool {
        self.visible && !self.title.is_empty()
    }
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse scene file: {}", path.display()))
    }
}

/// Platform backed by a JSON description of monitors and windows.
///
/// The file is re-read on every enumeration, so edits show up on the next
/// reapply. Applied placements are kept in memory.
pub struct SceneFile {
    path: PathBuf,
    known: HashSet<WindowHandle>,
    applied: HashMap<WindowHandle, Rect>,
}

impl SceneFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            known: HashSet::new(),
            applied: HashMap::new(),
        }
    }

    pub fn applied(&self, window: WindowHandle) -> Option<Rect> {
        self.applied.get(&window).copied()
    }
}

impl Platform for SceneFile {
    fn enumerate_monitors(&mut self) -> Result<Vec<MonitorInfo>> {
        let scene = Scene::load(&self.path)?;
        Ok(scene.monitors)
    }

    fn enumerate_windows(&mut self) -> Result<Vec<WindowHandle>> {
        let scene = Scene::load(&self.path)?;
        let windows: Vec<WindowHandle> = scene
            .windows
            .iter()
            .filter(|w| w.is_eligible())
            .map(|w| WindowHandle(w.id))
            .collect();

        self.known = windows.iter().copied().collect();
        self.applied.retain(|id, _| self.known.contains(id));

        for window in scene.windows.iter().filter(|w| w.is_eligible()) {
            tracing::debug!("  - [{}] {}", WindowHandle(window.id), window.title);
        }
        Ok(windows)
    }

    fn apply_placement(&mut self, placement: &Placement) -> Result<(), PlatformError> {
        if !self.known.contains(&placement.window) {
            return Err(PlatformError::WindowGone(placement.window));
        }
        tracing::info!("Window {} -> {:?}", placement.window, placement.target);
        self.applied.insert(placement.window, placement.target);
        Ok(())
    }
}
