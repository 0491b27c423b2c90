use skystrike_scene::SceneError;

/// Errors from building a world or loading its data.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("invalid world config: {0}")]
    InvalidConfig(String),
    #[error("spawn table parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("scene construction failed: {0}")]
    Scene(#[from] SceneError),
}
