use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use indent_tools::{Flavor, ParserConfig, RenderConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "indent-tools",
    version,
    about = "Reformat XML/HTML with stable indentation"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Markup flavor (`xml` or `html`); inferred from the input extension when omitted
    #[arg(short, long)]
    flavor: Option<Flavor>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Spaces per nesting level
    #[arg(short, long, default_value_t = 2)]
    indent: usize,
    /// Maximum element nesting accepted
    #[arg(long, default_value_t = indent_tools::xml::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Verify that the rendered output parses back to the same text, writing nothing
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let input = args.input.as_deref();
    let flavor = args
        .flavor
        .or_else(|| input.and_then(infer_flavor))
        .unwrap_or_default();
    let parser_config = ParserConfig {
        max_depth: args.max_depth,
        flavor,
        ..ParserConfig::default()
    };
    let render_config = RenderConfig::new(flavor).with_indent(" ".repeat(args.indent));
    debug!(?flavor, indent = args.indent, "configured");

    let source = read_source(input)?;
    let doc = indent_tools::parse_with_config(&source, parser_config)
        .with_context(|| format!("failed to parse {flavor} input"))?;
    let rendered = doc.render_with(&render_config);

    if args.check {
        let reparsed = indent_tools::parse_with_config(&rendered, parser_config)
            .context("rendered output does not parse back")?;
        let second = reparsed.render_with(&render_config);
        if second != rendered {
            bail!("rendering is not stable:\n{rendered}\n---\n{second}");
        }
        info!(bytes = rendered.len(), "round trip is stable");
        return Ok(());
    }

    let mut sink = open_sink(args.output.as_deref())?;
    writeln!(sink, "{rendered}")
        .and_then(|()| sink.flush())
        .context("failed to write output")?;
    Ok(())
}

/// Read the whole document from `input`, or from stdin when there is no path
fn read_source(input: Option<&Path>) -> Result<String> {
    let source = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display()))?,
        None => io::read_to_string(io::stdin().lock()).context("failed to read stdin")?,
    };
    ensure!(!source.trim().is_empty(), "no input provided");
    Ok(source)
}

fn open_sink(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn infer_flavor(path: &Path) -> Option<Flavor> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "xhtml" => Some(Flavor::Html),
        "svg" | "xsd" | "xsl" => Some(Flavor::Xml),
        other => other.parse().ok(),
    }
}
