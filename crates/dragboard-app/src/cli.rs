//! Command-line interface.

use crate::app::{AppConfig, Demo};
use clap::{Parser, Subcommand};
use dragboard_core::params::DEFAULT_PARAMS_FILE;
use std::path::PathBuf;

/// Dragboard - interactive canvas and parameter form demos
#[derive(Debug, Parser)]
#[command(name = "dragboard")]
#[command(about = "Interactive canvas and parameter form demos")]
pub struct Cli {
    /// Window width in logical pixels
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Window height in logical pixels
    #[arg(long, global = true)]
    pub height: Option<u32>,

    /// Window title
    #[arg(long, global = true)]
    pub title: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Drag shapes around a pan/zoom canvas (default)
    Canvas {
        /// JSON scene file with the initial shapes
        #[arg(short, long)]
        scene: Option<PathBuf>,
    },

    /// Edit a parameter file and print its values
    Params {
        /// JSON object of label/value pairs
        #[arg(default_value = DEFAULT_PARAMS_FILE)]
        file: PathBuf,
    },
}

impl Cli {
    /// Build the application configuration for the chosen demo.
    pub fn into_config(self) -> AppConfig {
        let demo = match self.command {
            None => Demo::Canvas { scene: None },
            Some(Commands::Canvas { scene }) => Demo::Canvas { scene },
            Some(Commands::Params { file }) => Demo::Params { file },
        };
        let mut config = AppConfig::for_demo(demo);
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(title) = self.title {
            config.title = title;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_canvas() {
        let config = Cli::try_parse_from(["dragboard"]).unwrap().into_config();
        assert_eq!(config.demo, Demo::Canvas { scene: None });
        assert_eq!((config.width, config.height), (800, 900));
    }

    #[test]
    fn test_canvas_with_scene() {
        let config = Cli::try_parse_from(["dragboard", "canvas", "--scene", "shapes.json"])
            .unwrap()
            .into_config();
        assert_eq!(
            config.demo,
            Demo::Canvas {
                scene: Some(PathBuf::from("shapes.json"))
            }
        );
    }

    #[test]
    fn test_params_default_file() {
        let config = Cli::try_parse_from(["dragboard", "params"]).unwrap().into_config();
        assert_eq!(
            config.demo,
            Demo::Params {
                file: PathBuf::from(DEFAULT_PARAMS_FILE)
            }
        );
        assert_eq!(config.title, "System Parameters Demo");
    }

    #[test]
    fn test_global_window_flags() {
        let config = Cli::try_parse_from([
            "dragboard", "params", "custom.json", "--width", "640", "--title", "Form",
        ])
        .unwrap()
        .into_config();
        assert_eq!(config.width, 640);
        assert_eq!(config.title, "Form");
        assert_eq!(
            config.demo,
            Demo::Params {
                file: PathBuf::from("custom.json")
            }
        );
    }
}
