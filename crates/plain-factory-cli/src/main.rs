use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plain_factory_config::{Config, load_metadata};
use plain_factory_engine::{
    AssemblyOptions, FormatSelector, LicenseFactory, RenderedOutput, strip_markup,
};
use std::path::{Path, PathBuf};

/// Turns one extended-markdown license into every publishable format.
#[derive(Debug, Parser)]
#[command(name = "plain-factory", version, about)]
struct Cli {
    /// Config file to use instead of ~/.config/plain-factory/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a license metadata file and write one file per format
    Process {
        /// License metadata (TOML)
        input: PathBuf,
        /// Output directory (defaults to the config value, then the input's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// markdown, plain_markdown, plaintext, reader_embed or all
        #[arg(short, long)]
        formats: Option<FormatSelector>,
        /// Value substituted for {{ year }}
        #[arg(long)]
        year: Option<String>,
    },
    /// Run the full pipeline for every format and report the first error
    Validate {
        /// License metadata (TOML)
        input: PathBuf,
    },
    /// Print the plain-text rendering of any markup file
    Strip {
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    run(cli.command, &config)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map_or_else(Config::config_path, Path::to_path_buf);
    log::debug!("Config path: {}", config_path.display());
    Ok(Config::load_from_path(&config_path)?.unwrap_or_default())
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Process {
            input,
            output,
            formats,
            year,
        } => {
            let output_dir = output
                .or_else(|| config.output_dir.clone())
                .unwrap_or_else(|| input_dir(&input));
            let selector = formats.unwrap_or(config.formats);
            let year = year.or_else(|| config.year.clone());
            let written = process(&input, &output_dir, selector, year)?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::Validate { input } => {
            validate(&input, config.year.clone())?;
            println!("{}: ok", input.display());
            Ok(())
        }
        Command::Strip { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            println!("{}", strip_markup(&text));
            Ok(())
        }
    }
}

fn input_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn factory(year: Option<String>) -> LicenseFactory {
    LicenseFactory::with_options(AssemblyOptions {
        year,
        ..Default::default()
    })
}

/// Produces the selected formats and writes them under `output_dir`.
fn process(
    input: &Path,
    output_dir: &Path,
    selector: FormatSelector,
    year: Option<String>,
) -> Result<Vec<PathBuf>> {
    let metadata = load_metadata(input)?;
    let outputs = factory(year)
        .produce(&metadata, selector)
        .with_context(|| format!("Failed to produce {}", input.display()))?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    outputs
        .values()
        .map(|output| write_output(output_dir, output))
        .collect()
}

fn write_output(output_dir: &Path, output: &RenderedOutput) -> Result<PathBuf> {
    let path = output_dir.join(output.file_name());
    std::fs::write(&path, &output.text)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {} ({} bytes)", path.display(), output.text.len());
    Ok(path)
}

fn validate(input: &Path, year: Option<String>) -> Result<()> {
    let metadata = load_metadata(input)?;
    factory(year)
        .produce(&metadata, FormatSelector::All)
        .with_context(|| format!("{} is not a valid license", input.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use plain_factory_engine::FormatKind;
    use tempfile::TempDir;

    const LICENSE: &str = r#"
plain_name = "Plain Test"
reader_license_text = """
Use this work[^1] as you like, since {{ year }}.

[^1]: Any way at all.
"""
disclaimer_text = "Not legal advice."
changelog_text = "- First release."
"#;

    fn write_license(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("license.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn process_writes_one_file_per_format() {
        let dir = TempDir::new().unwrap();
        let input = write_license(&dir, LICENSE);
        let out = dir.path().join("out");

        let written = process(&input, &out, FormatSelector::All, Some("2026".into())).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["markdown.md", "plain_markdown.md", "plaintext.txt", "reader_embed.md"]
        );
        let plaintext = std::fs::read_to_string(out.join("plaintext.txt")).unwrap();
        assert_eq!(
            plaintext,
            "Plain Test Plain version 0.0.0. Use this work as you like, since 2026. Not legal advice."
        );
    }

    #[test]
    fn process_single_format() {
        let dir = TempDir::new().unwrap();
        let input = write_license(&dir, LICENSE);

        let written = process(
            &input,
            dir.path(),
            FormatSelector::Only(FormatKind::Markdown),
            None,
        )
        .unwrap();

        assert_eq!(written, vec![dir.path().join("markdown.md")]);
        let markdown = std::fs::read_to_string(&written[0]).unwrap();
        assert!(markdown.contains("=== \"Changelog\""));
    }

    #[test]
    fn validate_reports_structural_errors() {
        let dir = TempDir::new().unwrap();
        let input = write_license(
            &dir,
            "plain_name = \"Broken\"\nreader_license_text = \"/// note\\nopen\"\ndisclaimer_text = \"x\"\n",
        );

        let err = validate(&input, None).unwrap_err();

        assert!(format!("{err:#}").contains("body:1: admonition is never closed"), "{err:#}");
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("none.toml");
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn cli_parses_selector_spellings() {
        let cli = Cli::try_parse_from(["plain-factory", "process", "mit.toml", "-f", "plain-markdown"])
            .unwrap();
        let Command::Process { formats, .. } = cli.command else {
            panic!("expected process");
        };
        assert_eq!(formats, Some(FormatSelector::Only(FormatKind::PlainMarkdown)));

        assert!(Cli::try_parse_from(["plain-factory", "process", "mit.toml", "-f", "pdf"]).is_err());
    }
}
