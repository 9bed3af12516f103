//! Error types for loading, configuring, rendering and saving mosaics
//!
//! Every error belongs to one stage of a run, reported by [`MosaicError::kind`].
//! Input and configuration errors abort before any pixel is computed.

use std::fmt;
use std::path::PathBuf;

/// Everything that can stop a mosaic run
#[derive(Debug)]
pub enum MosaicError {
    /// The source image could not be read or decoded
    SourceLoad {
        /// Source image path
        path: PathBuf,
        /// Decoder or read failure
        source: image::ImageError,
    },

    /// The command-line target is neither a file nor a directory
    MissingTarget {
        /// Path given on the command line
        path: PathBuf,
    },

    /// A target directory could not be listed
    ListInputs {
        /// Directory being listed
        path: PathBuf,
        /// Listing failure
        source: std::io::Error,
    },

    /// The source image decoded to zero pixels
    EmptySource {
        /// Decoded width
        width: u32,
        /// Decoded height
        height: u32,
    },

    /// Configuration value outside its valid domain
    InvalidParameter {
        /// Option name
        parameter: &'static str,
        /// Rejected value as given
        value: String,
        /// Accepted domain
        reason: String,
    },

    /// The directory for an output image could not be created
    CreateOutputDir {
        /// Directory that was being created
        path: PathBuf,
        /// Creation failure
        source: std::io::Error,
    },

    /// The rendered mosaic could not be encoded or written
    OutputSave {
        /// Destination path
        path: PathBuf,
        /// Encoder or write failure
        source: image::ImageError,
    },
}

/// Stage of a run an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source image could not be obtained; nothing was computed
    Input,
    /// An option was rejected before any computation started
    Config,
    /// The result could not be written; the computed image is still available
    Output,
}

impl MosaicError {
    /// Classify the error by the stage of the run it aborted
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceLoad { .. }
            | Self::MissingTarget { .. }
            | Self::ListInputs { .. }
            | Self::EmptySource { .. } => ErrorKind::Input,
            Self::InvalidParameter { .. } => ErrorKind::Config,
            Self::CreateOutputDir { .. } | Self::OutputSave { .. } => ErrorKind::Output,
        }
    }
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceLoad { path, source } => {
                write!(f, "Cannot read source image '{}': {source}", path.display())
            }
            Self::MissingTarget { path } => {
                write!(f, "Target '{}' is not a file or directory", path.display())
            }
            Self::ListInputs { path, source } => {
                write!(f, "Cannot list images in '{}': {source}", path.display())
            }
            Self::EmptySource { width, height } => {
                write!(f, "Source image is {width}x{height}; at least one pixel is required")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "Invalid {parameter} '{value}': {reason}"),
            Self::CreateOutputDir { path, source } => {
                write!(
                    f,
                    "Cannot create output directory '{}': {source}",
                    path.display()
                )
            }
            Self::OutputSave { path, source } => {
                write!(f, "Cannot save mosaic to '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceLoad { source, .. } | Self::OutputSave { source, .. } => Some(source),
            Self::ListInputs { source, .. } | Self::CreateOutputDir { source, .. } => Some(source),
            Self::MissingTarget { .. }
            | Self::EmptySource { .. }
            | Self::InvalidParameter { .. } => None,
        }
    }
}

/// Result of a mosaic operation
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Build an [`MosaicError::InvalidParameter`] from displayable parts
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl fmt::Display,
    reason: &impl fmt::Display,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
