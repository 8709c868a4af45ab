//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Turn an Android APK into a reusable Gradle library module (AAR)
#[derive(Parser, Debug)]
#[command(name = "apk2aar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// APK file path
    #[arg(
        short,
        long,
        value_hint = ValueHint::FilePath,
        required_unless_present_any = ["show_config", "config_template", "completion"]
    )]
    pub input: Option<PathBuf>,

    /// Classes to exclude, comma separated (substring match on the smali path)
    #[arg(short = 'x', long, value_name = "CLASSES")]
    pub exclude: Option<String>,

    /// Exclude resources and assets from the AAR
    #[arg(short = 'r', long)]
    pub exclude_resources: bool,

    /// Create the Gradle project but do not run gradle
    #[arg(long)]
    pub no_build: bool,

    /// Root for tmp/ and out/ [default: current directory]
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub work_dir: Option<PathBuf>,

    /// Gradle project template directory [default: built-in skeleton]
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub template_dir: Option<PathBuf>,

    /// Gradle version for the generated wrapper
    #[arg(long)]
    pub gradle_version: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print a commented config file template and exit
    #[arg(long)]
    pub config_template: bool,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completion: Option<clap_complete::Shell>,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_all_flags_when_parsing_then_fields_are_set() {
        let cli = Cli::try_parse_from([
            "apk2aar",
            "-i",
            "sample.apk",
            "-x",
            "Ad,Tracker",
            "-r",
            "--no-build",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("sample.apk")));
        assert_eq!(cli.exclude.as_deref(), Some("Ad,Tracker"));
        assert!(cli.exclude_resources);
        assert!(cli.no_build);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn given_no_input_when_parsing_then_fails() {
        let err = Cli::try_parse_from(["apk2aar", "-r"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn given_show_config_when_parsing_then_input_not_required() {
        let cli = Cli::try_parse_from(["apk2aar", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.input.is_none());
    }

    #[test]
    fn given_config_template_when_parsing_then_input_not_required() {
        let cli = Cli::try_parse_from(["apk2aar", "--config-template"]).unwrap();
        assert!(cli.config_template);
    }

    #[test]
    fn given_help_when_parsing_then_displays_help() {
        let err = Cli::try_parse_from(["apk2aar", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }
}
