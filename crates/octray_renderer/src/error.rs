use thiserror::Error;

/// Errors that can occur when starting a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("A render needs at least one worker")]
    NoWorkers,

    #[error(transparent)]
    Settings(#[from] octray_core::SettingsError),
}
