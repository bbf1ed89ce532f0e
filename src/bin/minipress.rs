use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use minipress::huffman::{FrequencyTable, HuffmanTree};
use minipress::{
    benchmark_files, compress, decompress, render_report, Algorithm, BenchConfig,
    CompressionStats,
};

#[derive(Parser, Debug)]
#[command(name = "minipress")]
#[command(about = "Compress files with Huffman, LZ77 or RLE and compare the codecs")]
#[command(version)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file
    Compress {
        /// Codec to use
        #[arg(short, long, value_enum)]
        algorithm: Algorithm,

        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (use - for stdout; default: input plus the codec's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decompress a file produced by `compress`
    Decompress {
        /// Codec the file was compressed with
        #[arg(short, long, value_enum)]
        algorithm: Algorithm,

        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (use - for stdout; default: input without the codec's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run every codec on each file and print a comparison report
    Bench {
        /// Files to benchmark
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Number of threads (0 = auto, 1 = single-threaded)
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },

    /// Print the Huffman tree built from a file's byte frequencies
    Tree {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },
}

const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Off
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    // A logger can only be installed once; a failure leaves logging disabled
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
    log::set_max_level(level);
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Compress { algorithm, input, output } => {
            let data = read_input(&input)?;
            let output = output.unwrap_or_else(|| with_extension(&input, algorithm));

            let start = Instant::now();
            let compressed = compress(algorithm, &data)?;
            let elapsed = start.elapsed();
            write_output(&output, &compressed)?;

            let stats = CompressionStats::new(data.len(), compressed.len());
            info!("{} compression complete:", algorithm);
            info!("  Input size:       {} bytes", stats.original_size);
            info!("  Output size:      {} bytes", stats.compressed_size);
            info!("  Ratio:            {:.2}%", stats.ratio_percent());
            info!("  Time:             {:.2?}", elapsed);
        }

        Command::Decompress { algorithm, input, output } => {
            let data = read_input(&input)?;
            let output = output.unwrap_or_else(|| without_extension(&input, algorithm));

            let start = Instant::now();
            let decompressed = decompress(algorithm, &data)?;
            let elapsed = start.elapsed();
            write_output(&output, &decompressed)?;

            info!("{} decompression complete:", algorithm);
            info!("  Input size:       {} bytes", data.len());
            info!("  Output size:      {} bytes", decompressed.len());
            info!("  Time:             {:.2?}", elapsed);
        }

        Command::Bench { files, threads } => {
            let config = BenchConfig { threads };
            let reports = benchmark_files(&files, &config)?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            for report in &reports {
                writeln!(out, "== {} ==", report.path.display())?;
                writeln!(out, "{}", render_report(&report.results))?;
            }
        }

        Command::Tree { input } => {
            let data = read_input(&input)?;
            let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&data))?;
            let codes = tree.code_table()?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            write!(out, "{}", tree)?;
            writeln!(out)?;
            for (symbol, code) in codes.iter() {
                writeln!(out, "{:#04x} {}", symbol, code)?;
            }
        }
    }

    Ok(())
}

fn is_std_stream(path: &Path) -> bool {
    path.to_str() == Some("-")
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if is_std_stream(path) {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        Ok(data)
    } else {
        fs::read(path)
    }
}

fn write_output(path: &Path, data: &[u8]) -> io::Result<()> {
    if is_std_stream(path) {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data)?;
        stdout.flush()
    } else {
        fs::write(path, data)
    }
}

fn with_extension(input: &Path, algorithm: Algorithm) -> PathBuf {
    if is_std_stream(input) {
        return input.to_path_buf();
    }
    let mut name = input.as_os_str().to_owned();
    name.push(algorithm.extension());
    PathBuf::from(name)
}

fn without_extension(input: &Path, algorithm: Algorithm) -> PathBuf {
    if is_std_stream(input) {
        return input.to_path_buf();
    }
    match input.to_str().and_then(|s| s.strip_suffix(algorithm.extension())) {
        Some(stem) if !stem.is_empty() => PathBuf::from(stem),
        _ => {
            let mut name = input.as_os_str().to_owned();
            name.push(".out");
            PathBuf::from(name)
        }
    }
}
