use thiserror::Error;

pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid front matter: {0}")]
    FrontMatter(#[from] serde_norway::Error),
}

impl LibraryError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO_ERROR",
            Self::FrontMatter(_) => "FRONT_MATTER_ERROR",
        }
    }
}
