//! Benchmark harness comparing the codecs on the same input.
//!
//! Each codec encodes and decodes the whole input on the calling thread; the
//! harness records sizes, wall-clock times and whether the round trip was
//! exact. Several files can be benchmarked at once on a worker pool, one
//! file per job, so no single codec call is ever split across threads.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossbeam::channel::{bounded, Receiver, Sender};
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::{Algorithm, CompressionStats};

/// Width of the ASCII bar charts, in cells
const BAR_WIDTH: usize = 40;

/// Configuration for multi-file benchmarking
#[derive(Clone, Debug)]
pub struct BenchConfig {
    /// Number of worker threads (0 = auto, 1 = run on the calling thread)
    pub threads: usize,
}

impl BenchConfig {
    fn effective_threads(&self) -> usize {
        match self.threads {
            0 => num_cpus::get().clamp(1, 32),
            n => n.clamp(1, 32),
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

/// Outcome of one codec on one input
#[derive(Clone, Debug)]
pub struct BenchResult {
    pub algorithm: Algorithm,
    pub original_size: u64,
    pub compressed_size: u64,
    pub decompressed_size: u64,
    pub compress_time: Duration,
    pub decompress_time: Duration,
    pub original_crc32: u32,
    pub decompressed_crc32: u32,
    /// Decoded output is byte-identical to the input
    pub integrity: bool,
}

impl BenchResult {
    pub fn stats(&self) -> CompressionStats {
        CompressionStats {
            original_size: self.original_size,
            compressed_size: self.compressed_size,
        }
    }

    pub fn ratio_percent(&self) -> f64 {
        self.stats().ratio_percent()
    }

    pub fn compress_ms(&self) -> f64 {
        self.compress_time.as_secs_f64() * 1000.0
    }

    pub fn decompress_ms(&self) -> f64 {
        self.decompress_time.as_secs_f64() * 1000.0
    }

    /// Input bytes compressed per millisecond, `None` if the timer read zero
    pub fn efficiency(&self) -> Option<f64> {
        let ms = self.compress_ms();
        (ms > 0.0).then(|| self.original_size as f64 / ms)
    }
}

/// Benchmark a single codec on `data`
pub fn run_benchmark(algorithm: Algorithm, data: &[u8]) -> Result<BenchResult> {
    let codec = algorithm.codec();

    let start = Instant::now();
    let compressed = codec.encode(data)?;
    let compress_time = start.elapsed();

    let start = Instant::now();
    let decompressed = codec.decode(&compressed)?;
    let decompress_time = start.elapsed();

    let integrity = decompressed == data;
    if !integrity {
        warn!(
            "{}: decoded {} bytes differ from the {} byte original",
            algorithm,
            decompressed.len(),
            data.len()
        );
    }

    debug!(
        "{}: {} -> {} bytes in {:.2?} / {:.2?}",
        algorithm,
        data.len(),
        compressed.len(),
        compress_time,
        decompress_time
    );

    Ok(BenchResult {
        algorithm,
        original_size: data.len() as u64,
        compressed_size: compressed.len() as u64,
        decompressed_size: decompressed.len() as u64,
        compress_time,
        decompress_time,
        original_crc32: crc32fast::hash(data),
        decompressed_crc32: crc32fast::hash(&decompressed),
        integrity,
    })
}

/// Benchmark every codec on `data`, in [`Algorithm::ALL`] order
pub fn benchmark_all(data: &[u8]) -> Result<Vec<BenchResult>> {
    Algorithm::ALL.iter().map(|&algorithm| run_benchmark(algorithm, data)).collect()
}

/// Results for one input file
#[derive(Clone, Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub results: Vec<BenchResult>,
}

/// Read `path` and benchmark every codec on its contents
pub fn benchmark_file(path: &Path) -> Result<FileReport> {
    let data = std::fs::read(path)?;
    Ok(FileReport { path: path.to_path_buf(), results: benchmark_all(&data)? })
}

/// Benchmark independent files, returning reports in input order
pub fn benchmark_files(paths: &[PathBuf], config: &BenchConfig) -> Result<Vec<FileReport>> {
    let num_threads = config.effective_threads().min(paths.len().max(1));

    if num_threads == 1 {
        return paths.iter().map(|path| benchmark_file(path)).collect();
    }

    let (job_tx, job_rx): (Sender<(usize, &Path)>, Receiver<(usize, &Path)>) =
        bounded(paths.len());
    let (result_tx, result_rx): (
        Sender<(usize, Result<FileReport>)>,
        Receiver<(usize, Result<FileReport>)>,
    ) = bounded(paths.len());

    let result = crossbeam::scope(|scope| {
        for _ in 0..num_threads {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();

            scope.spawn(move |_| {
                for (index, path) in job_rx.iter() {
                    if result_tx.send((index, benchmark_file(path))).is_err() {
                        break;
                    }
                }
            });
        }

        // Drop our copies of the channels that workers use
        drop(job_rx);
        drop(result_tx);

        for (index, path) in paths.iter().enumerate() {
            job_tx
                .send((index, path.as_path()))
                .map_err(|_| Error::Internal("Benchmark workers exited early".to_string()))?;
        }
        drop(job_tx);

        let mut ordered = BTreeMap::new();
        for (index, report) in result_rx.iter() {
            ordered.insert(index, report);
        }
        ordered.into_values().collect::<Result<Vec<_>>>()
    });

    result.map_err(|_| Error::Internal("Thread panicked".to_string()))?
}

/// Best performers across one set of results
#[derive(Clone, Copy, Debug)]
pub struct BenchSummary<'a> {
    pub best_ratio: &'a BenchResult,
    pub fastest_compression: &'a BenchResult,
    pub fastest_decompression: &'a BenchResult,
    pub all_passed: bool,
}

impl<'a> BenchSummary<'a> {
    /// `None` when `results` is empty
    pub fn from_results(results: &'a [BenchResult]) -> Option<Self> {
        Some(Self {
            best_ratio: results
                .iter()
                .max_by(|a, b| a.ratio_percent().total_cmp(&b.ratio_percent()))?,
            fastest_compression: results.iter().min_by_key(|r| r.compress_time)?,
            fastest_decompression: results.iter().min_by_key(|r| r.decompress_time)?,
            all_passed: results.iter().all(|r| r.integrity),
        })
    }

    /// Bytes saved by the best-ratio codec; negative when every codec grew the input
    pub fn space_saved(&self) -> i64 {
        self.best_ratio.original_size as i64 - self.best_ratio.compressed_size as i64
    }

    pub fn recommendation(&self) -> String {
        let best = self.best_ratio;
        let fastest = self.fastest_compression;

        if best.ratio_percent() > 30.0 {
            format!(
                "For significant space savings ({:.2}%), use {} compression",
                best.ratio_percent(),
                best.algorithm
            )
        } else if best.original_size < 1024 {
            format!(
                "For small files, compression may not be efficient. Best ratio: {:.2}% with {}",
                best.ratio_percent(),
                best.algorithm
            )
        } else {
            format!(
                "For balanced performance, consider {} (compression: {:.3} ms, ratio: {:.2}%)",
                fastest.algorithm,
                fastest.compress_ms(),
                fastest.ratio_percent()
            )
        }
    }
}

/// One bar of an ASCII chart, scaled against `max`
fn bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 && value > 0.0 {
        ((value / max) * width as f64).round().min(width as f64) as usize
    } else {
        0
    };
    format!("|{}{}|", "#".repeat(filled), " ".repeat(width - filled))
}

fn chart(
    out: &mut String,
    title: &str,
    results: &[BenchResult],
    value: impl Fn(&BenchResult) -> f64,
) {
    let max = results.iter().map(&value).fold(0.0f64, f64::max);
    let _ = writeln!(out, "\n{}", title);
    for result in results {
        let v = value(result);
        let name = result.algorithm.name();
        let _ = writeln!(out, "  {:<10} {} {:.2}", name, bar(v, max, BAR_WIDTH), v);
    }
}

/// Render the comparison table, charts, analysis and recommendation
pub fn render_report(results: &[BenchResult]) -> String {
    let mut out = String::new();
    let Some(summary) = BenchSummary::from_results(results) else {
        return out;
    };

    let _ = writeln!(out, "COMPRESSION ALGORITHM COMPARISON");
    let _ = writeln!(
        out,
        "{:<10} {:>12} {:>10} {:>12} {:>12} {:>9}",
        "Algorithm", "Compressed", "Ratio (%)", "Comp (ms)", "Dec (ms)", "Integrity"
    );
    for r in results {
        let _ = writeln!(
            out,
            "{:<10} {:>12} {:>10.2} {:>12.3} {:>12.3} {:>9}",
            r.algorithm.name(),
            r.compressed_size,
            r.ratio_percent(),
            r.compress_ms(),
            r.decompress_ms(),
            if r.integrity { "ok" } else { "FAILED" }
        );
    }

    // Ratio chart scales against at least 100%
    let ratio_max = results.iter().map(|r| r.ratio_percent()).fold(100.0f64, f64::max);
    let _ = writeln!(out, "\nCOMPRESSION RATIO (%)");
    for r in results {
        let _ = writeln!(
            out,
            "  {:<10} {} {:.2}",
            r.algorithm.name(),
            bar(r.ratio_percent(), ratio_max, BAR_WIDTH),
            r.ratio_percent()
        );
    }
    chart(&mut out, "COMPRESSION TIME (ms)", results, BenchResult::compress_ms);
    chart(&mut out, "DECOMPRESSION TIME (ms)", results, BenchResult::decompress_ms);

    let _ = writeln!(out, "\nDETAILED ANALYSIS");
    let _ = writeln!(out, "  Original size:          {} bytes", results[0].original_size);
    let _ = writeln!(
        out,
        "  Best ratio:             {} ({:.2}%)",
        summary.best_ratio.algorithm,
        summary.best_ratio.ratio_percent()
    );
    let _ = writeln!(out, "  Space saved:            {} bytes", summary.space_saved());
    let _ = writeln!(
        out,
        "  Fastest compression:    {} ({:.3} ms)",
        summary.fastest_compression.algorithm,
        summary.fastest_compression.compress_ms()
    );
    let _ = writeln!(
        out,
        "  Fastest decompression:  {} ({:.3} ms)",
        summary.fastest_decompression.algorithm,
        summary.fastest_decompression.decompress_ms()
    );

    let _ = writeln!(out, "  Efficiency (bytes/ms):");
    for r in results {
        match r.efficiency() {
            Some(e) => {
                let _ = writeln!(out, "    {:<10} {:.2}", r.algorithm.name(), e);
            }
            None => {
                let _ = writeln!(out, "    {:<10} n/a", r.algorithm.name());
            }
        }
    }

    if summary.all_passed {
        let _ = writeln!(out, "  Integrity check:        all algorithms passed");
    } else {
        let _ = writeln!(out, "  Integrity check:        some algorithms failed");
        for r in results.iter().filter(|r| !r.integrity) {
            let _ = writeln!(
                out,
                "    {} - decoded output differs from original (crc32 {:08x} vs {:08x})",
                r.algorithm, r.original_crc32, r.decompressed_crc32
            );
        }
    }

    let _ = writeln!(out, "\nRECOMMENDATION\n  {}", summary.recommendation());
    out
}
