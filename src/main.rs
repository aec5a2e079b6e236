use std::path::PathBuf;

use clap::Parser;
use tfrelease::config::Config;
use tfrelease::logging::{self, LogFormat};
use tfrelease::output::{OutputFormat, RenderOptions};
use tfrelease::release::pipeline::Options;
use tfrelease::release::selector::{DEFAULT_COUNT, Selection};
use tfrelease::release::source::HttpReleaseSource;

#[derive(Parser)]
#[command(name = "tfrelease")]
#[command(
    version,
    about = "Compute Terraform versions. Return the latest N minor releases with their tags"
)]
struct Cli {
    /// Return the latest N minor release families. Zero or less returns nothing
    #[arg(
        short = 'c',
        long,
        default_value_t = DEFAULT_COUNT,
        allow_negative_numbers = true
    )]
    count: i64,

    /// Select versions whose key matches this regex instead. Example '1\.(4|5)'
    #[arg(short = 'r', long = "match", visible_alias = "regex", value_name = "PATTERN")]
    pattern: Option<String>,

    /// Include semver pre-release versions
    #[arg(
        short = 'p',
        long,
        visible_alias = "prerelease",
        alias = "include_prerelease"
    )]
    include_prerelease: bool,

    /// Include release metadata in the response
    #[arg(
        short = 'v',
        long,
        visible_alias = "verbose",
        alias = "include_metadata"
    )]
    include_metadata: bool,

    /// Output format. A single version is always printed as a bare scalar
    #[arg(
        short = 'o',
        long,
        visible_alias = "output",
        value_enum,
        ignore_case = true,
        default_value_t = OutputFormat::Json
    )]
    format: OutputFormat,

    /// Sort object keys in the output
    #[arg(long)]
    sort_keys: bool,

    /// Release index URL, overriding the config file
    #[arg(long)]
    url: Option<String>,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_format)?;

    // Reject a bad pattern before any network work
    let selection = match cli.pattern.as_deref() {
        Some(pattern) => Selection::pattern(pattern)?,
        None => Selection::window(cli.count),
    };

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.url = url;
    }

    let source = HttpReleaseSource::from_config(&config)?;
    let options = Options {
        selection,
        include_prerelease: cli.include_prerelease,
        include_metadata: cli.include_metadata,
    };
    let render_options = RenderOptions {
        format: cli.format,
        sort_keys: cli.sort_keys,
    };

    let output = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(tfrelease::app::run(&source, &options, render_options))?;

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["tfrelease", "--count", "-1"], -1)]
    #[case(&["tfrelease", "--count=-2"], -2)]
    #[case(&["tfrelease", "-c", "0"], 0)]
    #[case(&["tfrelease", "-c", "3"], 3)]
    #[case(&["tfrelease"], DEFAULT_COUNT)]
    fn cli_accepts_any_count(#[case] args: &[&str], #[case] expected: i64) {
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.count, expected);
    }

    #[test]
    fn cli_accepts_short_flags_and_aliases() {
        let cli = Cli::try_parse_from([
            "tfrelease", "-r", r"^1\.", "-o", "YAML", "-p", "-v",
        ])
        .unwrap();

        assert_eq!(cli.pattern.as_deref(), Some(r"^1\."));
        assert_eq!(cli.format, OutputFormat::Yaml);
        assert!(cli.include_prerelease);
        assert!(cli.include_metadata);

        let cli = Cli::try_parse_from([
            "tfrelease",
            "--regex",
            "0",
            "--output",
            "text",
            "--prerelease",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.pattern.as_deref(), Some("0"));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.include_prerelease);
        assert!(cli.include_metadata);
    }
}
