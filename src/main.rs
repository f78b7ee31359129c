use clap::{Parser, Subcommand};
use leafpress::{
    BuildError, FONT_DIR_ENV, FontLibrary, PageSpec, PdfBuilder, ProductConfig, extract_file,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Render PDF products from JSON configurations.
#[derive(Parser, Debug)]
#[command(name = "leafpress", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a PDF from a configuration file.
    Build {
        config: PathBuf,
        /// Output path. Defaults to the configuration's filename.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Directory holding the bundled TrueType fonts.
        #[arg(long, env = FONT_DIR_ENV, default_value = "fonts")]
        font_dir: PathBuf,
    },
    /// Check a configuration without drawing anything.
    Validate { config: PathBuf },
    /// Print a chapter page built from a text, markdown, DOCX or PDF file.
    Extract {
        file: PathBuf,
        /// Chapter title. Defaults to the file's opening heading.
        #[arg(long)]
        chapter_title: Option<String>,
        #[arg(long, default_value = "")]
        chapter_number: String,
    },
}

fn load_config(path: &Path) -> Result<ProductConfig, BuildError> {
    let json = std::fs::read_to_string(path)?;
    Ok(ProductConfig::from_json(&json)?)
}

fn run(command: Command) -> Result<(), BuildError> {
    match command {
        Command::Build {
            config,
            output,
            font_dir,
        } => {
            let config = load_config(&config)?;
            let output = output.unwrap_or_else(|| PathBuf::from(config.output_filename()));
            let builder = PdfBuilder::new(FontLibrary::with_font_dir(font_dir));
            let report = builder.build_to_file(&config, &output)?;
            for warning in &report.warnings {
                eprintln!("warning: {warning}");
            }
            println!(
                "{} ({} pages, {} bytes)",
                output.display(),
                report.page_count,
                report.bytes.len()
            );
        }
        Command::Validate { config } => {
            let config = load_config(&config)?;
            config.design.validate()?;
            let pages = config.compile_pages()?;
            println!(
                "'{}': {} layout, {} page spec(s)",
                config.title,
                config.design.layout.name(),
                pages.len()
            );
            for (index, page) in pages.iter().enumerate() {
                println!("  {:>3}  {}", index, page.kind().name());
            }
        }
        Command::Extract {
            file,
            chapter_title,
            chapter_number,
        } => {
            let chapter = extract_file(&file)?.into_chapter();
            let spec = PageSpec::new(
                "chapter",
                json!({
                    "chapter_number": chapter_number,
                    "chapter_title": chapter_title.or(chapter.title).unwrap_or_default(),
                    "paragraphs": chapter.paragraphs,
                }),
            );
            let text = serde_json::to_string_pretty(&spec)
                .map_err(|e| BuildError::Config(e.into()))?;
            println!("{text}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
