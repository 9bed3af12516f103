//! Tile progress display for one or many source images
//!
//! Each image being rendered gets a bar counting composited tiles. Only the
//! most recently started images keep a bar; larger runs also get an overall
//! image counter.

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::LazyLock;

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} tiles {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static IMAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Images: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

#[derive(Debug, Clone)]
struct FileProgress {
    name: String,
    done: usize,
    total: usize,
    finished: bool,
}

/// Progress bars for a run over one or more images
pub struct ProgressManager {
    multi_progress: MultiProgress,
    overall: Option<ProgressBar>,
    bars: Vec<ProgressBar>,
    files: Vec<Option<FileProgress>>,
    /// File indices currently shown, oldest first; position `n` uses `bars[n]`
    visible: VecDeque<usize>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager with no bars yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            overall: None,
            bars: Vec::new(),
            files: Vec::new(),
            visible: VecDeque::new(),
        }
    }

    /// Allocate bars for a run over `file_count` images
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let overall = ProgressBar::new(file_count as u64);
            overall.set_style(IMAGE_STYLE.clone());
            self.overall = Some(self.multi_progress.add(overall));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(TILE_STYLE.clone());
            self.bars.push(self.multi_progress.add(bar));
        }
    }

    /// Start showing image `index`, replacing the oldest visible one if needed
    pub fn start_file(&mut self, index: usize, path: &Path, tiles: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        if index >= self.files.len() {
            self.files.resize(index + 1, None);
        }
        if let Some(slot) = self.files.get_mut(index) {
            *slot = Some(FileProgress {
                name,
                done: 0,
                total: tiles,
                finished: false,
            });
        }

        self.visible.retain(|&shown| shown != index);
        self.visible.push_back(index);
        while self.visible.len() > self.bars.len() {
            self.visible.pop_front();
        }
        self.redraw_all();
    }

    /// Record that `completed` tiles of image `index` have been composited
    pub fn update_tiles(&mut self, index: usize, completed: usize) {
        if let Some(Some(file)) = self.files.get_mut(index) {
            file.done = completed;
        }
        self.redraw(index);
    }

    /// Mark image `index` as written
    pub fn complete_file(&mut self, index: usize) {
        if let Some(overall) = &self.overall {
            overall.inc(1);
        }
        if let Some(Some(file)) = self.files.get_mut(index) {
            file.done = file.total;
            file.finished = true;
        }
        self.redraw(index);
    }

    /// Remove all bars from the terminal
    pub fn finish(&self) {
        if let Some(overall) = &self.overall {
            overall.finish_with_message("All images rendered");
        }
        let _ = self.multi_progress.clear();
    }

    fn redraw(&self, index: usize) {
        let Some(position) = self.visible.iter().position(|&shown| shown == index) else {
            return;
        };
        if let (Some(bar), Some(Some(file))) = (self.bars.get(position), self.files.get(index)) {
            show(bar, file);
        }
    }

    fn redraw_all(&self) {
        for (position, bar) in self.bars.iter().enumerate() {
            match self
                .visible
                .get(position)
                .and_then(|&index| self.files.get(index))
            {
                Some(Some(file)) => show(bar, file),
                _ => {
                    bar.set_length(0);
                    bar.set_position(0);
                    bar.set_prefix(String::new());
                    bar.set_message(String::new());
                }
            }
        }
    }
}

fn show(bar: &ProgressBar, file: &FileProgress) {
    bar.set_length(file.total as u64);
    bar.set_position(file.done as u64);
    bar.set_prefix(file.name.clone());
    bar.set_message(if file.finished { "✓" } else { "" });
}
