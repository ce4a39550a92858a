//! AOM command-line transcoder
//!
//! Reads DER, PEM or AOM JSON from a file or stdin and writes it back out in
//! the requested encoding (indented JSON by default).
//!
//! ```text
//! aom request.der
//! aom --to pem --label "CERTIFICATE REQUEST" request.der
//! cat request.json | aom --from json --to der > request.der
//! ```
//!
//! Set `RUST_LOG=aom_der=trace` to watch the decoder walk the input.

use aom::{
    DER_ENCODING, DecodeOptions, DerCodec, EncodingRegistry, JSON_ENCODING, JsonCodec,
    PEM_ENCODING, PemCodec,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Detect from the input: PEM armor, then JSON, else DER
    Auto,
    Der,
    Pem,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Der,
    Pem,
}

impl OutputFormat {
    fn encoding(self) -> &'static str {
        match self {
            OutputFormat::Json => JSON_ENCODING,
            OutputFormat::Der => DER_ENCODING,
            OutputFormat::Pem => PEM_ENCODING,
        }
    }
}

#[derive(Parser)]
#[command(name = "aom")]
#[command(about = "Transcode ASN.1 between DER, PEM and AOM JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// File to read; `-` or nothing reads stdin
    input: Option<PathBuf>,

    /// Input encoding
    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    from: InputFormat,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    to: OutputFormat,

    /// PEM label used with `--to pem`
    #[arg(long, default_value = aom::pem::DEFAULT_LABEL)]
    label: String,

    /// Deepest nesting accepted while decoding DER
    #[arg(long, default_value_t = aom::der::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Write JSON on a single line
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    let input = read_input(cli.input.as_ref())?;
    let registry = build_registry(&cli)?;

    let encoding = match cli.from {
        InputFormat::Auto => sniff(&input),
        InputFormat::Der => DER_ENCODING,
        InputFormat::Pem => PEM_ENCODING,
        InputFormat::Json => JSON_ENCODING,
    };
    log::debug!("reading {} bytes as {}", input.len(), encoding);

    let nodes = registry
        .deserialize(&input, encoding)
        .with_context(|| format!("failed to read input as {}", encoding))?;
    let mut output = registry
        .serialize(&nodes, cli.to.encoding())
        .with_context(|| format!("failed to write {}", cli.to.encoding()))?;
    if cli.to == OutputFormat::Json {
        output.push(b'\n');
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&output).context("failed to write to stdout")?;
    stdout.flush().context("failed to write to stdout")?;
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut input = Vec::new();
            std::io::stdin()
                .read_to_end(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Registry holding the three encodings, configured from the command line
fn build_registry(cli: &Cli) -> Result<EncodingRegistry> {
    let options = DecodeOptions {
        max_depth: cli.max_depth,
    };
    let json = if cli.compact {
        JsonCodec::new()
    } else {
        JsonCodec::pretty()
    };

    let mut registry = EncodingRegistry::new();
    registry.register(DER_ENCODING, Arc::new(DerCodec::with_options(options)))?;
    registry.register(JSON_ENCODING, Arc::new(json))?;
    registry.register(
        PEM_ENCODING,
        Arc::new(PemCodec::with_label(cli.label.clone()).with_options(options)),
    )?;
    Ok(registry)
}

/// Guess the input encoding
///
/// PEM needs text input with a line opening with `-----BEGIN `, so DER that
/// merely holds those characters inside a string stays DER.
fn sniff(input: &[u8]) -> &'static str {
    let is_pem = std::str::from_utf8(input)
        .is_ok_and(|text| text.lines().any(|line| line.trim_start().starts_with("-----BEGIN ")));
    if is_pem {
        return PEM_ENCODING;
    }
    match input.iter().copied().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') | Some(b'{') => JSON_ENCODING,
        _ => DER_ENCODING,
    }
}
