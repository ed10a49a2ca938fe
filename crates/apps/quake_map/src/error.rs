use std::path::PathBuf;

use layers::TransformError;
use scene::ComposeError;
use scene::page::PageError;

use crate::feeds::FetchError;
use crate::loader::LoadError;

/// Anything that stops the map from being built.
#[derive(Debug)]
pub enum AppError {
    Client(FetchError),
    Load(LoadError),
    Transform(TransformError),
    Compose(ComposeError),
    Page(PageError),
    ReadTemplate {
        path: PathBuf,
        source: std::io::Error,
    },
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Client(e) => write!(f, "{e}"),
            AppError::Load(e) => write!(f, "{e}"),
            AppError::Transform(e) => write!(f, "{e}"),
            AppError::Compose(e) => write!(f, "{e}"),
            AppError::Page(e) => write!(f, "{e}"),
            AppError::ReadTemplate { path, source } => {
                write!(f, "read page template {}: {source}", path.display())
            }
            AppError::WriteOutput { path, source } => {
                write!(f, "write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Client(e) => Some(e),
            AppError::Load(e) => Some(e),
            AppError::Transform(e) => Some(e),
            AppError::Compose(e) => Some(e),
            AppError::Page(e) => Some(e),
            AppError::ReadTemplate { source, .. } | AppError::WriteOutput { source, .. } => {
                Some(source)
            }
        }
    }
}

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        AppError::Client(e)
    }
}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        AppError::Load(e)
    }
}

impl From<TransformError> for AppError {
    fn from(e: TransformError) -> Self {
        AppError::Transform(e)
    }
}

impl From<ComposeError> for AppError {
    fn from(e: ComposeError) -> Self {
        AppError::Compose(e)
    }
}

impl From<PageError> for AppError {
    fn from(e: PageError) -> Self {
        AppError::Page(e)
    }
}
