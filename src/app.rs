//! Desktop shell.
//!
//! A small egui application around the pipeline: pick a folder (and
//! optionally a custom stopword file), run the analysis on a background
//! thread, and browse the results as a ranked table or a statistics summary.
//! Export buttons write the CSV layouts and the PNG charts through save
//! dialogs.
//!
//! Concurrency model: one worker thread at a time. The worker owns the
//! pipeline run and publishes progress, status text, and finally the report
//! into shared state; the UI thread only reads that state and repaints while
//! a run is in flight. Errors leave the previous report untouched.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread;

use eframe::egui;
use egui::{Button, CentralPanel, ProgressBar, ScrollArea, SidePanel, TopBottomPanel};
use egui_extras::{Size, TableBuilder};
use tracing::warn;

use crate::{
    load_directory, render_bar_chart, render_horizontal_bar_chart, render_word_cloud, save_png,
    tokenize_corpus, write_frequencies, write_top_n, write_with_statistics, AnalysisReport,
    AnalyzerConfig, FrequencyTable, PipelineError, TagFilter,
};

/// Rows shown in the results table at most.
const TABLE_ROW_LIMIT: usize = 100;

#[derive(Debug, Default)]
struct Shared {
    running: bool,
    progress: f32,
    status: String,
    report: Option<AnalysisReport>,
    /// Bumped when a new report lands so the UI can refresh its caches.
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Results,
    Statistics,
}

/// The egui application state.
pub struct AnalyzerApp {
    config: AnalyzerConfig,
    directory: String,
    stopwords_path: String,
    tab: Tab,
    shared: Arc<RwLock<Shared>>,
    seen_generation: u64,
    cached: Option<AnalysisReport>,
    rows: Vec<(String, u64)>,
}

impl AnalyzerApp {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            directory: String::new(),
            stopwords_path: String::new(),
            tab: Tab::Results,
            shared: Arc::new(RwLock::new(Shared {
                status: "ready".into(),
                ..Default::default()
            })),
            seen_generation: 0,
            cached: None,
            rows: Vec::new(),
        }
    }

    /// Open the native window and run the event loop.
    pub fn run(config: AnalyzerConfig) {
        let options = eframe::NativeOptions {
            initial_window_size: Some(egui::vec2(1100.0, 760.0)),
            ..Default::default()
        };
        let app = AnalyzerApp::new(config);
        eframe::run_native(
            "Word Frequency Analyzer",
            options,
            Box::new(|_cc| Box::new(app)),
        );
    }

    fn read_shared(&self) -> RwLockReadGuard<'_, Shared> {
        self.shared.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_shared(&self) -> RwLockWriteGuard<'_, Shared> {
        self.shared.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_status(&self, message: impl Into<String>) {
        self.write_shared().status = message.into();
    }

    /// Pull fresh results out of the shared state when the worker finished.
    fn refresh_caches(&mut self) {
        let (generation, report) = {
            let guard = self.read_shared();
            if guard.generation == self.seen_generation {
                return;
            }
            (guard.generation, guard.report.clone())
        };

        self.seen_generation = generation;
        self.cached = report;
        self.rows = self
            .cached
            .as_ref()
            .map(|report| report.table.top_n(TABLE_ROW_LIMIT))
            .unwrap_or_default();
    }

    fn start_analysis(&mut self) {
        let dir = PathBuf::from(self.directory.trim());
        if dir.as_os_str().is_empty() {
            self.set_status("choose a folder of text files first");
            return;
        }

        let mut cfg = self.config.clone();
        let custom = self.stopwords_path.trim();
        if !custom.is_empty() {
            cfg.stopwords.custom_file = Some(PathBuf::from(custom));
        }

        {
            let mut state = self.write_shared();
            if state.running {
                return;
            }
            state.running = true;
            state.progress = 0.0;
            state.status = "loading files...".into();
        }

        let shared = Arc::clone(&self.shared);
        thread::spawn(move || {
            let result = run_worker(&dir, &cfg, &shared);
            let mut state = shared.write().unwrap_or_else(|poisoned| poisoned.into_inner());
            match result {
                Ok(report) => {
                    state.progress = 1.0;
                    state.status = format!(
                        "analysis complete: {} unique words from {} files",
                        report.stats.unique_words, report.file_count
                    );
                    state.report = Some(report);
                    state.generation += 1;
                }
                Err(err) => {
                    warn!(error = %err, "analysis_failed");
                    state.status = format!("analysis failed: {err}");
                }
            }
            state.running = false;
        });
    }

    fn export_csv(&self) {
        let Some(report) = self.cached.as_ref() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name("word_frequency.csv")
            .save_file()
        else {
            return;
        };

        let export = &self.config.export;
        let result = if export.include_statistics {
            write_with_statistics(&report.table, &path)
        } else {
            match export.top_n {
                Some(n) => write_top_n(&report.table, &path, n),
                None => write_frequencies(&report.table, &path, export.order),
            }
        };

        match result {
            Ok(rows) => self.set_status(format!("exported {rows} words to {}", path.display())),
            Err(err) => self.set_status(format!("export failed: {err}")),
        }
    }

    fn save_charts(&self) {
        let Some(report) = self.cached.as_ref() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("word_frequency_chart.png")
            .save_file()
        else {
            return;
        };

        match self.render_both_charts(&report.table, &path) {
            Ok(()) => self.set_status(format!("charts saved next to {}", path.display())),
            Err(err) => self.set_status(format!("chart rendering failed: {err}")),
        }
    }

    fn render_both_charts(
        &self,
        table: &FrequencyTable,
        path: &Path,
    ) -> Result<(), crate::VizError> {
        let vertical = render_bar_chart(table, &self.config.chart)?;
        save_png(&vertical, path)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("word_frequency_chart");
        let horizontal_path = path.with_file_name(format!("{stem}_horizontal.png"));
        let horizontal = render_horizontal_bar_chart(table, &self.config.horizontal_chart)?;
        save_png(&horizontal, &horizontal_path)
    }

    fn save_cloud(&self) {
        let Some(report) = self.cached.as_ref() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("word_cloud.png")
            .save_file()
        else {
            return;
        };

        let result = render_word_cloud(&report.table, &self.config.cloud)
            .and_then(|img| save_png(&img, &path));
        match result {
            Ok(()) => self.set_status(format!("word cloud saved to {}", path.display())),
            Err(err) => self.set_status(format!("word cloud failed: {err}")),
        }
    }

    fn results_table(&self, ui: &mut egui::Ui) {
        if self.rows.is_empty() {
            ui.label("No results yet. Choose a folder and press Analyze.");
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .column(Size::exact(60.0))
            .column(Size::remainder())
            .column(Size::exact(100.0))
            .header(24.0, |mut header| {
                header.col(|ui| {
                    ui.label("Rank");
                });
                header.col(|ui| {
                    ui.label("Word");
                });
                header.col(|ui| {
                    ui.label("Count");
                });
            })
            .body(|body| {
                body.rows(20.0, self.rows.len(), |index, mut row| {
                    let (word, count) = &self.rows[index];
                    row.col(|ui| {
                        ui.label((index + 1).to_string());
                    });
                    row.col(|ui| {
                        ui.label(word);
                    });
                    row.col(|ui| {
                        ui.label(count.to_string());
                    });
                });
            });
    }

    fn statistics_view(&self, ui: &mut egui::Ui) {
        let Some(report) = self.cached.as_ref() else {
            ui.label("No statistics yet.");
            return;
        };
        let stats = &report.stats;

        ui.label(format!("Files processed: {}", report.file_count));
        ui.label(format!("Total words: {}", stats.total_tokens));
        ui.label(format!("Unique words: {}", stats.unique_words));
        ui.label(format!("Average frequency: {:.2}", stats.avg_frequency));
        ui.label(format!("Highest frequency: {}", stats.max_frequency));
        ui.label(format!("Lowest frequency: {}", stats.min_frequency));
        if let Some((word, count)) = &stats.most_frequent {
            ui.label(format!("Most frequent word: {word} ({count})"));
        }

        if !report.skipped.is_empty() {
            ui.separator();
            ui.label(format!("Skipped files: {}", report.skipped.len()));
            ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                for skip in &report.skipped {
                    ui.label(format!("{}: {}", skip.path.display(), skip.reason));
                }
            });
        }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_caches();
        let (running, progress, status) = {
            let state = self.read_shared();
            (state.running, state.progress, state.status.clone())
        };
        let has_results = self.cached.is_some();

        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("Word Frequency Analyzer");
        });

        TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add(ProgressBar::new(progress).desired_width(220.0).show_percentage());
                ui.label(status);
            });
        });

        SidePanel::left("controls").default_width(280.0).show(ctx, |ui| {
            ui.label("Text folder:");
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut self.directory);
                if ui.button("Browse").clicked() {
                    if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                        self.directory = folder.display().to_string();
                    }
                }
            });

            ui.label("Stopword file (optional):");
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut self.stopwords_path);
                if ui.button("Browse").clicked() {
                    if let Some(file) = rfd::FileDialog::new()
                        .add_filter("text", &["txt"])
                        .pick_file()
                    {
                        self.stopwords_path = file.display().to_string();
                    }
                }
            });

            ui.separator();

            if ui.add_enabled(!running, Button::new("Analyze")).clicked() {
                self.start_analysis();
            }
            if ui
                .add_enabled(has_results && !running, Button::new("Export CSV"))
                .clicked()
            {
                self.export_csv();
            }
            if ui
                .add_enabled(has_results && !running, Button::new("Save bar charts"))
                .clicked()
            {
                self.save_charts();
            }
            if ui
                .add_enabled(has_results && !running, Button::new("Save word cloud"))
                .clicked()
            {
                self.save_cloud();
            }
        });

        CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Results, "Results");
                ui.selectable_value(&mut self.tab, Tab::Statistics, "Statistics");
            });
            ui.separator();
            match self.tab {
                Tab::Results => self.results_table(ui),
                Tab::Statistics => self.statistics_view(ui),
            }
        });

        if running {
            // Keep polling the worker's progress.
            ctx.request_repaint();
        }
    }
}

/// The single background unit of work: scan, tokenize, count.
fn run_worker(
    dir: &Path,
    cfg: &AnalyzerConfig,
    shared: &Arc<RwLock<Shared>>,
) -> Result<AnalysisReport, PipelineError> {
    let publish = |progress: f32, status: &str| {
        let mut state = shared.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.progress = progress;
        state.status = status.into();
    };

    publish(0.1, "loading files...");
    let corpus = load_directory(dir, &cfg.ingest)?;
    if corpus.is_empty() {
        return Err(PipelineError::NoDocuments(dir.to_path_buf()));
    }

    publish(0.3, "processing text...");
    let stopwords = cfg.stopwords.build()?;
    let tags = TagFilter::disabled();
    let tokens = tokenize_corpus(&corpus, &cfg.tokenize, &stopwords, &tags)?;

    publish(0.6, "counting words...");
    let table = FrequencyTable::from_tokens(&tokens);

    publish(0.8, "computing statistics...");
    let stats = table.stats();

    Ok(AnalysisReport {
        table,
        stats,
        file_count: corpus.file_count(),
        skipped: corpus.skipped,
    })
}
