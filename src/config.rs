use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Dimension;

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;

/// Startup configuration handed to the lesson and the window.
///
/// The resource root is resolved once here and then passed around instead of
/// being looked up lazily by whoever needs an asset.
#[derive(Clone, Debug)]
pub struct Config {
    pub res_dir: PathBuf,
    pub screen: Dimension,
    pub window_position: (i32, i32),
}

impl Config {
    pub fn new(res_dir: PathBuf) -> Self {
        Self {
            res_dir,
            screen: Dimension::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            window_position: (100, 100),
        }
    }

    /// Uses the `res/` directory that sits next to the executable's `bin/`.
    pub fn from_executable() -> Result<Self> {
        let exe = std::env::current_exe().map_err(Error::ResourceRoot)?;
        let base = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::new(resource_root(base)))
    }

    pub fn with_screen(mut self, screen: Dimension) -> Self {
        self.screen = screen;
        self
    }

    /// Asset directory of a single lesson, e.g. `res/Lesson3`.
    pub fn lesson_dir(&self, lesson: &str) -> PathBuf {
        self.res_dir.join(lesson)
    }
}

/// Maps an executable directory to the shared resource directory.
///
/// The project layout keeps binaries in `bin/` and assets in `res/`, so the
/// last `bin` component and everything after it is replaced by `res`. A path
/// without a `bin` component gets `res` appended.
pub fn resource_root(base: &Path) -> PathBuf {
    let components: Vec<Component> = base.components().collect();
    let keep = components
        .iter()
        .rposition(|component| component.as_os_str() == "bin")
        .unwrap_or(components.len());

    let mut root: PathBuf = components[..keep].iter().collect();
    root.push("res");
    root
}
