mod loader;
mod types;

pub use loader::{ConfigError, MAX_JOINTS};
pub use types::{
    Config, InputConfig, JointsConfig, PublisherConfig, PublisherKind, TimingConfig,
};
