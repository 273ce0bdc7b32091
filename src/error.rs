pub type PlateMapResult<T> = Result<T, PlateMapError>;

#[derive(thiserror::Error, Debug)]
pub enum PlateMapError {
    #[error("input error: {0}")]
    Input(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("io error: {0}")]
    Io(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlateMapError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            PlateMapError::input("x")
                .to_string()
                .contains("input error:")
        );
        assert!(
            PlateMapError::render("x")
                .to_string()
                .contains("render error:")
        );
        assert!(PlateMapError::io("x").to_string().contains("io error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = PlateMapError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
