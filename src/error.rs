use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a lesson from starting or running.
#[derive(Debug, Error)]
pub enum Error {
    #[error("EventLoop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("CreateWindow error: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("CreateSurface error: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("RequestAdapter error: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("RequestDevice error: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("RenderPresent error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("LoadTexture error: {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("OpenFont error: {}: {source}", path.display())]
    FontLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("OpenFont error: {}: no usable font face", .0.display())]
    NoFontFace(PathBuf),

    #[error("RenderText error: {0:?} produced no pixels")]
    EmptyText(String),

    #[error("unknown lesson {0}, expected 1 to {}", crate::lesson::LESSON_COUNT)]
    UnknownLesson(u8),

    #[error("resource path error: {0}")]
    ResourceRoot(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failed_operation() {
        let err = Error::NoFontFace(PathBuf::from("res/Lesson6/sample.ttf"));
        assert_eq!(
            err.to_string(),
            "OpenFont error: res/Lesson6/sample.ttf: no usable font face"
        );

        let err = Error::UnknownLesson(9);
        assert_eq!(err.to_string(), "unknown lesson 9, expected 1 to 6");
    }

    #[test]
    fn io_source_is_kept() {
        let err = Error::FontLoad {
            path: PathBuf::from("missing.ttf"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("not found"));
    }
}
