use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use descwriter::{export, DocTreeParser, OutputFormat, Points, RenderConfig, WriterEngine};

fn cli() -> Command {
    Command::new("descwriter")
        .about("Render a documentation tree into indented paragraphs")
        .arg(
            Arg::new("input")
                .help("Documentation tree JSON file, or '-' for stdin")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Write output to a file instead of stdout")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file with indent_step, title_spacing and max_depth")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("indent-step")
                .long("indent-step")
                .help("Indentation per nesting level, in points")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("title-spacing")
                .long("title-spacing")
                .help("Space after headings, in points")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Deepest description nesting accepted")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (-v debug, -vv trace)")
                .action(ArgAction::Count),
        )
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<RenderConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };

    if let Some(step) = matches.get_one::<u32>("indent-step") {
        config.indent_step = Points(*step);
    }
    if let Some(spacing) = matches.get_one::<u32>("title-spacing") {
        config.title_spacing = Points(*spacing);
    }
    if let Some(depth) = matches.get_one::<usize>("max-depth") {
        config.max_depth = *depth;
    }

    Ok(config.validate()?)
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    let config = load_config(&matches)?;
    debug!(?config, "render configuration");

    let input = matches
        .get_one::<String>("input")
        .context("Missing input argument")?;
    let roots = if input == "-" {
        DocTreeParser.parse_reader(io::stdin().lock())?
    } else {
        DocTreeParser.parse_path(Path::new(input))?
    };

    let engine = WriterEngine::new(config);
    let document = engine
        .render_to_memory(&roots)
        .context("Failed to render documentation tree")?;
    info!(paragraphs = document.len(), "rendered document");

    let format: OutputFormat = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text")
        .parse()?;
    let output = export(&document, format)?;

    match matches.get_one::<PathBuf>("output") {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(output.as_bytes())
            .context("Failed to write to stdout")?,
    }

    Ok(())
}
