use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wordfreq::app::AnalyzerApp;
use wordfreq::{
    render_bar_chart, render_horizontal_bar_chart, render_word_cloud, run_analysis, save_png,
    write_frequencies, write_with_statistics, AnalyzerConfig, SortOrder,
};

/// Word frequency analyzer. Without `--dir` it opens the desktop window;
/// with `--dir` it runs headlessly and prints the top words.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Analyze this directory headlessly instead of opening the window.
    #[clap(short, long)]
    dir: Option<PathBuf>,

    /// Custom stopword file, one word per line.
    #[clap(short, long)]
    stopwords: Option<PathBuf>,

    /// YAML configuration file.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Write a word,count CSV to this path.
    #[clap(long)]
    csv: Option<PathBuf>,

    /// Use the extended CSV layout with summary rows and percentages.
    #[clap(long)]
    csv_statistics: bool,

    /// Write a vertical bar chart PNG to this path.
    #[clap(long)]
    chart: Option<PathBuf>,

    /// Write a horizontal bar chart PNG to this path.
    #[clap(long)]
    horizontal_chart: Option<PathBuf>,

    /// Write a word cloud PNG to this path.
    #[clap(long)]
    cloud: Option<PathBuf>,

    /// How many rows to print in the terminal table.
    #[clap(long, default_value_t = 20)]
    top: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(path) = &args.stopwords {
        config.stopwords.custom_file = Some(path.clone());
    }

    match &args.dir {
        Some(dir) => run_headless(dir, &config, &args),
        None => {
            AnalyzerApp::run(config);
            Ok(())
        }
    }
}

fn run_headless(
    dir: &PathBuf,
    config: &AnalyzerConfig,
    args: &Args,
) -> Result<(), Box<dyn Error>> {
    let report = run_analysis(dir, config)?;
    let stats = &report.stats;

    println!("{:<6} {:<24} {:>8}", "rank", "word", "count");
    for (i, (word, count)) in report.table.top_n(args.top).iter().enumerate() {
        println!("{:<6} {:<24} {:>8}", i + 1, word, count);
    }

    println!();
    println!("files processed:  {}", report.file_count);
    println!("total words:      {}", stats.total_tokens);
    println!("unique words:     {}", stats.unique_words);
    println!("average frequency: {:.2}", stats.avg_frequency);
    if let Some((word, count)) = &stats.most_frequent {
        println!("most frequent:    {word} ({count})");
    }
    if !report.skipped.is_empty() {
        eprintln!("skipped {} unreadable files", report.skipped.len());
    }

    if let Some(path) = &args.csv {
        let rows = if args.csv_statistics {
            write_with_statistics(&report.table, path)?
        } else {
            write_frequencies(&report.table, path, SortOrder::CountDesc)?
        };
        println!("exported {rows} words to {}", path.display());
    }

    if let Some(path) = &args.chart {
        let img = render_bar_chart(&report.table, &config.chart)?;
        save_png(&img, path)?;
        println!("bar chart saved to {}", path.display());
    }

    if let Some(path) = &args.horizontal_chart {
        let img = render_horizontal_bar_chart(&report.table, &config.horizontal_chart)?;
        save_png(&img, path)?;
        println!("horizontal bar chart saved to {}", path.display());
    }

    if let Some(path) = &args.cloud {
        let img = render_word_cloud(&report.table, &config.cloud)?;
        save_png(&img, path)?;
        println!("word cloud saved to {}", path.display());
    }

    Ok(())
}
