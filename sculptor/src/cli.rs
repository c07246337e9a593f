use std::path::PathBuf;

use clay_engine::Configuration;

/// Turn short descriptions into clay-style images.
#[derive(Debug, clap::Parser)]
#[command(name = "clay_sculptor", version)]
pub struct Cli {
    /// What to sculpt, e.g. "a cute robot"
    #[arg(required_unless_present = "interactive")]
    pub description: Option<String>,

    /// Start an interactive session
    #[arg(short, long)]
    pub interactive: bool,

    /// Number of variations to generate (1-10)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub variations: Option<u8>,

    /// Exact output file, only used for single images
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for generated images [default: ./output]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Image model [default: imagen-4.0-generate-001]
    #[arg(long)]
    pub model: Option<String>,

    /// Keep soft shadows under the sculpture
    #[arg(short, long)]
    pub shadows: bool,

    /// Config file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Lets flags given on the command line override the loaded configuration.
    pub fn apply(&self, mut config: Configuration) -> Configuration {
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(n) = self.variations {
            config.variation_count = n.into();
        }
        if self.shadows {
            config.shadows = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "clay_sculptor",
            "a cute robot",
            "-v",
            "3",
            "-o",
            "robot.png",
            "--output-dir",
            "imgs",
            "--model",
            "imagen-x",
            "-s",
        ])
        .unwrap();

        assert_eq!(cli.description.as_deref(), Some("a cute robot"));
        assert_eq!(cli.variations, Some(3));
        assert_eq!(cli.output, Some(PathBuf::from("robot.png")));
        assert!(cli.shadows);
        assert!(!cli.interactive);

        let config = cli.apply(Configuration::default());
        assert_eq!(config.model, "imagen-x");
        assert_eq!(config.output_dir, PathBuf::from("imgs"));
        assert_eq!(config.variation_count, 3);
        assert!(config.shadows);
    }

    #[test]
    fn defaults_are_kept_without_flags() {
        let cli = Cli::try_parse_from(["clay_sculptor", "cat"]).unwrap();
        assert_eq!(cli.apply(Configuration::default()), Configuration::default());
    }

    #[test]
    fn description_is_required_unless_interactive() {
        assert!(Cli::try_parse_from(["clay_sculptor"]).is_err());
        let cli = Cli::try_parse_from(["clay_sculptor", "-i"]).unwrap();
        assert!(cli.interactive);
        assert!(cli.description.is_none());
    }

    #[test]
    fn variations_out_of_range_are_rejected() {
        assert!(Cli::try_parse_from(["clay_sculptor", "cat", "-v", "0"]).is_err());
        assert!(Cli::try_parse_from(["clay_sculptor", "cat", "-v", "11"]).is_err());
        assert!(Cli::try_parse_from(["clay_sculptor", "cat", "--variations", "10"]).is_ok());
    }
}
