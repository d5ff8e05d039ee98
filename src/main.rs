use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use walkdir::WalkDir;

use jptext_norm::cleaner::TextCleaner;
use jptext_norm::numeral;
use jptext_norm::scanner::DateScanner;
use norm_types::{BatchReport, FileReport, RewriteStats};

const OUTPUT_DIR: &str = "output";

#[derive(Parser)]
#[command(name = "jptext_norm", about = "Japanese text normalizer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a single date expression (era, abbreviated or Gregorian form)
    Date {
        /// e.g. "令和5年3月末日", "R5.3.2", "2023/3/31"
        expr: String,
    },
    /// Parse a single kanji numeral to a decimal integer
    Number {
        /// e.g. "一万二千三百四十五"
        expr: String,
    },
    /// Rewrite date expressions in a file (stdin if omitted) to ISO form
    Normalize { file: Option<PathBuf> },
    /// Full cleanup: NFKC, strip URLs/mentions/symbols/emoji, then dates
    Clean {
        file: Option<PathBuf>,
        /// Leave emoji in place
        #[arg(long)]
        keep_emojis: bool,
    },
    /// Normalize every .txt file under a directory into output/
    Batch {
        /// Directory to scan for .txt files
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Date { expr }) => run_date(&expr),
        Some(Command::Number { expr }) => run_number(&expr),
        Some(Command::Normalize { file }) => run_normalize(file.as_deref()),
        Some(Command::Clean { file, keep_emojis }) => run_clean(file.as_deref(), keep_emojis),
        Some(Command::Batch { dir }) => run_batch(&dir),
        // Default: normalize stdin
        None => run_normalize(None),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  INPUT / OUTPUT HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn read_input(file: Option<&Path>) -> String {
    match file {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Cannot read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("Cannot read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    }
}

fn output_path(name: &str) -> PathBuf {
    Path::new(OUTPUT_DIR).join(name)
}

fn write_json<T: serde::Serialize>(name: &str, data: &T) {
    let path = output_path(name);
    let json = serde_json::to_string_pretty(data).expect("JSON serialization failed");
    std::fs::write(&path, &json).unwrap_or_else(|e| panic!("cannot write {}: {e}", path.display()));
    eprintln!("  {} ({} bytes)", path.display(), json.len());
}

fn eprint_stats(stats: &RewriteStats) {
    eprintln!(
        "Rewrote {} date(s): {} era, {} gregorian, {} abbreviated, {} delimited",
        stats.total(),
        stats.era_dates,
        stats.gregorian_dates,
        stats.abbreviated_dates,
        stats.delimited_dates
    );
}

// ═══════════════════════════════════════════════════════════════════════
//  ONE-SHOT MODES: resolve a single expression
// ═══════════════════════════════════════════════════════════════════════

fn run_date(expr: &str) {
    let scanner = DateScanner::new();
    match scanner.parse_date(expr) {
        Ok(date) => println!("{date}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run_number(expr: &str) {
    match numeral::parse(expr.trim()) {
        Ok(n) => println!("{n}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  STREAM MODES: normalize / clean one input
// ═══════════════════════════════════════════════════════════════════════

fn run_normalize(file: Option<&Path>) {
    let text = read_input(file);
    let scanner = DateScanner::new();
    let (out, stats) = scanner.normalize_with_stats(&text);
    print!("{out}");
    eprint_stats(&stats);
}

fn run_clean(file: Option<&Path>, keep_emojis: bool) {
    let text = read_input(file);
    let cleaner = TextCleaner::new(keep_emojis);
    let scanner = DateScanner::new();
    let (out, stats) = scanner.normalize_with_stats(&cleaner.clean(&text));
    println!("{out}");
    eprint_stats(&stats);
}

// ═══════════════════════════════════════════════════════════════════════
//  BATCH MODE: walk a directory, normalize each .txt → output/
// ═══════════════════════════════════════════════════════════════════════

fn run_batch(root: &Path) {
    eprintln!("Scanning for .txt files under: {}", root.display());
    let scanner = DateScanner::new();

    let mut files = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        // Never re-scan our own output directory
        if path.components().any(|c| c.as_os_str() == OUTPUT_DIR) {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some("txt") {
            files.push(path.to_path_buf());
        }
    }
    eprintln!("Found {} file(s)", files.len());

    std::fs::create_dir_all(OUTPUT_DIR).expect("cannot create output/");

    let mut reports = Vec::new();
    let mut totals = RewriteStats::default();

    for path in &files {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("  skipping {}: {e}", path.display());
                continue;
            }
        };
        let (out, stats) = scanner.normalize_with_stats(&text);

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("out.txt");
        let dest = output_path(name);
        std::fs::write(&dest, &out)
            .unwrap_or_else(|e| panic!("cannot write {}: {e}", dest.display()));
        eprintln!(
            "  {} → {} ({} rewrite(s))",
            path.display(),
            dest.display(),
            stats.total()
        );

        totals.merge(&stats);
        reports.push(FileReport {
            file: path.display().to_string(),
            bytes_in: text.len(),
            bytes_out: out.len(),
            rewrites: stats,
        });
    }

    let report = BatchReport {
        total_files: reports.len(),
        totals,
        files: reports,
    };
    write_json("report.json", &report);

    eprintln!(
        "\nDone. {} file(s), {} date rewrite(s) total",
        report.total_files,
        report.totals.total()
    );
}
