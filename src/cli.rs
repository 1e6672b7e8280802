use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError, PublisherKind};

/// Keyboard teleoperation of robot joint positions.
#[derive(Debug, Parser)]
#[command(name = "joint-teleop", version, about)]
pub struct Cli {
    /// Config file (default: <config dir>/joint-teleop/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Position change per a/d keystroke
    #[arg(long, value_name = "STEP")]
    pub step_size: Option<f64>,

    /// Outbound transport: log, jsonl or udp
    #[arg(long, value_name = "KIND")]
    pub publisher: Option<PublisherKind>,

    /// Destination host:port for the udp publisher
    #[arg(long, value_name = "ADDR")]
    pub target: Option<String>,

    /// Output file for the jsonl publisher
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Topic the joint commands are addressed to
    #[arg(long)]
    pub topic: Option<String>,

    /// Read the keyboard on a dedicated thread
    #[arg(long)]
    pub threaded_input: bool,
}

impl Cli {
    /// Load the config file and apply command-line overrides on top.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut Config) {
        if let Some(step) = self.step_size {
            config.joints.step_size = step;
        }
        if let Some(kind) = self.publisher {
            config.publisher.kind = kind;
        }
        if let Some(target) = &self.target {
            config.publisher.target = Some(target.clone());
        }
        if let Some(output) = &self.output {
            config.publisher.path = Some(output.clone());
        }
        if let Some(topic) = &self.topic {
            config.publisher.topic = topic.clone();
        }
        if self.threaded_input {
            config.input.threaded = true;
        }
    }
}
