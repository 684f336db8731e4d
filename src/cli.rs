//! Command-line interface definitions for the AI daily briefing.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Options given here override the values from the config file.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the AI daily briefing.
///
/// # Examples
///
/// ```sh
/// # Build today's briefing in the current checkout and push it
/// GITHUB_TOKEN=... ai_daily_briefing
///
/// # Use a config file and a different checkout
/// ai_daily_briefing -c briefing.yaml -r /srv/ai-daily-briefing
///
/// # Commit locally without pushing
/// ai_daily_briefing --no-push
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a YAML config file
    #[arg(short, long, env = "BRIEFING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Site repository working tree (overrides `site.root`)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Override template, relative to the site root (overrides `site.template`)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// GitHub token used to build the push URL
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Commit locally but do not push
    #[arg(long)]
    pub no_push: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(root) = &self.root {
            config.site.root = root.clone();
        }
        if let Some(template) = &self.template {
            config.site.template = template.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["ai_daily_briefing"]);
        assert!(!cli.no_push);
        assert_eq!(cli.root, None);
        assert_eq!(cli.template, None);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "ai_daily_briefing",
            "-c",
            "/etc/briefing.yaml",
            "-r",
            "/srv/site",
            "-t",
            "custom.html",
            "--no-push",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("/etc/briefing.yaml")));
        assert_eq!(cli.root, Some(PathBuf::from("/srv/site")));
        assert_eq!(cli.template, Some(PathBuf::from("custom.html")));
        assert!(cli.no_push);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["ai_daily_briefing", "--root", "/srv/site"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.site.root, PathBuf::from("/srv/site"));
        assert_eq!(config.site.template, PathBuf::from("assets/template.html"));
        assert_eq!(
            config.site.template_path(),
            PathBuf::from("/srv/site/assets/template.html")
        );
    }
}
