//! seqpair - Pairwise Alignment Viewer
//!
//! Aligns two sequences and shows the alignment in a terminal viewer, or
//! writes it as CLUSTAL W text or JSON.
//!
//! ## Usage
//!
//! ```bash
//! seqpair a.fasta b.fasta                         # interactive viewer
//! seqpair -t DNA a.fasta b.fasta -o out.aln       # CLUSTAL W report
//! seqpair -s MKTAYIAK MKAYIAK -f json -o -        # literal sequences, JSON
//! seqpair --request request.json                  # JSON request → JSON response
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use seqpair::align::GlobalAligner;
use seqpair::controller::run_app;
use seqpair::fasta::{first_record, parse_fasta_str, FastaRecord};
use seqpair::model::{AppState, SequenceKind};
use seqpair::pipeline::{
    align_pair, render_batch, respond_json, OutputFormat, PairRequest, DEFAULT_SEQ1_NAME,
    DEFAULT_SEQ2_NAME,
};

/// Output format for batch mode
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// CLUSTAL W text report
    Clustal,
    /// JSON layout (or {"error": ...})
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Clustal => OutputFormat::Clustal,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// seqpair - align two sequences and view the alignment
///
/// When run without -o/--output, opens an interactive viewer.
/// With -o/--output, writes the alignment to a file (or stdout with "-").
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First sequence (FASTA file or "-" for stdin, or residues with --sequences)
    #[arg(required_unless_present = "request")]
    seq1: Option<String>,

    /// Second sequence (FASTA file, or residues with --sequences)
    #[arg(required_unless_present = "request")]
    seq2: Option<String>,

    /// Treat SEQ1 and SEQ2 as residue strings instead of FASTA files
    #[arg(short = 's', long = "sequences")]
    literal: bool,

    /// Declared sequence type: "Protein" aligns with BLOSUM62, anything else
    /// with PAM200; "DNA" and "Protein" also check the alphabet
    #[arg(short = 't', long = "seqtype", default_value = "Protein")]
    seqtype: String,

    /// Display name of the first sequence (default: FASTA id)
    #[arg(long = "name1")]
    name1: Option<String>,

    /// Display name of the second sequence (default: FASTA id)
    #[arg(long = "name2")]
    name2: Option<String>,

    /// Output file (enables batch mode). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// What batch mode writes
    #[arg(short = 'f', long = "format", value_enum, default_value = "clustal")]
    format: FormatArg,

    /// Read a JSON request ({"seq1", "seq2", "seqtype", "seq1name", "seq2name"})
    /// and write the JSON response. Use "-" for stdin.
    #[arg(long = "request", conflicts_with_all = ["seq1", "seq2", "literal"])]
    request: Option<String>,
}

/// Loads one input: either the literal residues or the first FASTA record.
fn load_input(source: &str, literal: bool, name: Option<String>, default_name: &str) -> Result<(String, String)> {
    if literal {
        return Ok((source.to_string(), name.unwrap_or_else(|| default_name.to_string())));
    }

    let record = if source == "-" {
        read_stdin_record()?
    } else {
        first_record(source).with_context(|| format!("Failed to read {}", source))?
    };
    info!("loaded {} ({} residues) from {}", record.id, record.sequence.len(), source);
    Ok((record.sequence, name.unwrap_or(record.id)))
}

/// Reads the first FASTA record from stdin.
fn read_stdin_record() -> Result<FastaRecord> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    parse_fasta_str(&content)
        .context("Failed to read FASTA from stdin")?
        .into_iter()
        .next()
        .context("No sequence on stdin")
}

/// Builds the alignment request from positional arguments.
fn build_request(args: &Args) -> Result<PairRequest> {
    let (Some(seq1), Some(seq2)) = (args.seq1.as_deref(), args.seq2.as_deref()) else {
        anyhow::bail!("Two sequences are required");
    };
    if !args.literal && seq1 == "-" && seq2 == "-" {
        anyhow::bail!("Only one sequence can be read from stdin");
    }

    let (seq1, name1) = load_input(seq1, args.literal, args.name1.clone(), DEFAULT_SEQ1_NAME)?;
    let (seq2, name2) = load_input(seq2, args.literal, args.name2.clone(), DEFAULT_SEQ2_NAME)?;

    Ok(PairRequest::new(seq1, seq2)
        .with_seqtype(args.seqtype.clone())
        .with_names(name1, name2))
}

/// Reads a JSON request from a file or stdin.
fn read_request(source: &str) -> Result<PairRequest> {
    let content = if source == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        content
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))?
    };
    Ok(PairRequest::from_json(&content)?)
}

/// Writes `content` to a file, or to stdout with "-".
fn write_output(output: &str, content: &str) -> Result<()> {
    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(content.as_bytes())?;
        handle.flush()?;
    } else {
        fs::write(output, content).with_context(|| format!("Failed to write {}", output))?;
        eprintln!("Wrote alignment to {}", output);
    }
    Ok(())
}

/// Runs batch mode: align and write the chosen format.
fn run_cli_mode(request: &PairRequest, output: &str, format: FormatArg) -> Result<()> {
    let content = render_batch(request, &GlobalAligner, format.into())?;
    write_output(output, &content)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let args = Args::parse();

    // Request mode: JSON in, JSON out
    if let Some(source) = args.request.as_deref() {
        let request = read_request(source)?;
        let json = respond_json(&request, &GlobalAligner)?;
        return write_output(args.output.as_deref().unwrap_or("-"), &json);
    }

    let request = build_request(&args)?;

    if let Some(output) = args.output.as_deref() {
        run_cli_mode(&request, output, args.format)?;
    } else {
        let layout = align_pair(&request, &GlobalAligner)?;
        let state = AppState::new(layout, SequenceKind::from_declared(&request.seqtype));
        run_app(state)?;
    }

    Ok(())
}
