//! Command-line interface for rendering one image or a directory of images

use crate::algorithm::compositor::render_mosaic;
use crate::io::configuration::{
    DEFAULT_BLUR, DEFAULT_ITERATIONS, DEFAULT_OPACITY, DEFAULT_SCALE, MosaicConfig,
};
use crate::io::error::{MosaicError, Result};
use crate::io::image::{
    is_output_file, is_supported_image, load_source, output_path_for, save_output,
};
use crate::io::progress::ProgressManager;
use clap::Parser;
use log::{LevelFilter, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "sprinkle")]
#[command(
    author,
    version,
    about = "Render gradient tile mosaics of images"
)]
/// Command-line arguments for the mosaic renderer
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Number of random tiles to paint
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Opacity of each tile (0 to 1)
    #[arg(short, long, default_value_t = DEFAULT_OPACITY)]
    pub opacity: f64,

    /// Output size relative to the source image
    #[arg(short, long, default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// Tile size divisor; larger values give smaller tiles
    #[arg(short, long, default_value_t = DEFAULT_BLUR)]
    pub blur: f64,

    /// Random seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log each processed file
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Logging threshold implied by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }

    /// Rendering options collected from the arguments
    pub const fn config(&self) -> MosaicConfig {
        MosaicConfig {
            iterations: self.iterations,
            opacity: self.opacity,
            scale: self.scale,
            blur: self.blur,
        }
    }
}

/// Orchestrates rendering of every selected image with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// The configuration is validated before any file is read, and the first
    /// failing file aborts the batch.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A configuration value is out of its domain
    /// - The target does not exist or its directory cannot be listed
    /// - A source image cannot be loaded or its output cannot be saved
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.config();
        config.validate()?;

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, &config)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        let candidates = if target.is_file() {
            vec![target.clone()]
        } else if target.is_dir() {
            images_in(target)?
        } else {
            return Err(MosaicError::MissingTarget {
                path: target.clone(),
            });
        };

        Ok(candidates
            .into_iter()
            .filter(|path| !self.already_rendered(path))
            .collect())
    }

    fn already_rendered(&self, input_path: &Path) -> bool {
        let rendered = self.cli.skip_existing() && output_path_for(input_path).exists();
        if rendered {
            warn!("Skipping: {} (output exists)", input_path.display());
        }
        rendered
    }

    fn process_file(&mut self, input_path: &Path, index: usize, config: &MosaicConfig) -> Result<()> {
        let start_time = Instant::now();
        let output_path = output_path_for(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, config.iterations);
        }

        let source = load_source(input_path)?;
        info!(
            "Rendering {} ({}x{}, {} tiles)",
            input_path.display(),
            source.width(),
            source.height(),
            config.iterations
        );

        let mut rng = self
            .cli
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let progress = &mut self.progress_manager;
        let mut observer = |completed: usize, _total: usize| {
            if let Some(pm) = progress.as_mut() {
                pm.update_tiles(index, completed);
            }
        };
        let mosaic = render_mosaic(&source, config, &mut rng, &mut observer)?;

        save_output(&mosaic, &output_path)?;
        info!(
            "Wrote {} in {:.2?}",
            output_path.display(),
            start_time.elapsed()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }

        Ok(())
    }
}

/// Readable images directly inside `dir`, sorted, excluding earlier outputs
fn images_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let list_error = |source| MosaicError::ListInputs {
        path: dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() && is_supported_image(&path) && !is_output_file(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}
