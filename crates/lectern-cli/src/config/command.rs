//! Subcommands, one per retrieval handler.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use lectern_server::handler::{
    AssetRequest, ExistsRequest, PageRequest, PreviewRequest, ThumbnailRequest,
};

/// Retrieval operation to run.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch a PDF, optionally keeping only its first pages.
    Preview(PreviewArgs),
    /// Fetch a stored asset by exact key.
    Asset(AssetArgs),
    /// Fetch the first matching thumbnail for a key or filename.
    Thumbnail(ThumbnailArgs),
    /// Check whether an asset exists.
    Exists(ExistsArgs),
}

impl Command {
    /// Returns the subcommand name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Preview(_) => "preview",
            Self::Asset(_) => "asset",
            Self::Thumbnail(_) => "thumbnail",
            Self::Exists(_) => "exists",
        }
    }

    /// Where to write the response body; `None` means stdout.
    pub fn output(&self) -> Option<&PathBuf> {
        match self {
            Self::Preview(args) => args.output.output.as_ref(),
            Self::Asset(args) => args.output.output.as_ref(),
            Self::Thumbnail(args) => args.output.output.as_ref(),
            Self::Exists(_) => None,
        }
    }
}

/// Destination of the response body.
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// File to write the body to (stdout when omitted).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Arguments of `lectern preview`.
#[derive(Debug, Clone, Args)]
pub struct PreviewArgs {
    /// Document key.
    pub key: String,

    /// Number of leading pages to keep (0 or less keeps all).
    #[arg(long = "pages", allow_negative_numbers = true)]
    pub pages: Option<i64>,

    /// Bucket to read from instead of the documents bucket.
    #[arg(long = "bucket")]
    pub bucket: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl From<PreviewArgs> for PreviewRequest {
    fn from(args: PreviewArgs) -> Self {
        Self {
            key: args.key,
            pages: args.pages.map(PageRequest::Number),
            bucket: args.bucket,
        }
    }
}

/// Arguments of `lectern asset`.
#[derive(Debug, Clone, Args)]
pub struct AssetArgs {
    /// Asset key.
    pub key: String,

    /// Bucket to read from instead of the assets bucket.
    #[arg(long = "bucket")]
    pub bucket: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl From<AssetArgs> for AssetRequest {
    fn from(args: AssetArgs) -> Self {
        Self {
            key: args.key,
            bucket: args.bucket,
        }
    }
}

/// Arguments of `lectern thumbnail`.
#[derive(Debug, Clone, Args)]
pub struct ThumbnailArgs {
    /// Explicit thumbnail key, tried first.
    #[arg(long = "key")]
    pub key: Option<String>,

    /// Original filename the thumbnail belongs to.
    #[arg(long = "file")]
    pub file: Option<String>,

    /// Bucket to read from instead of the thumbnails bucket.
    #[arg(long = "bucket")]
    pub bucket: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl From<ThumbnailArgs> for ThumbnailRequest {
    fn from(args: ThumbnailArgs) -> Self {
        Self {
            key: args.key,
            file: args.file,
            bucket: args.bucket,
        }
    }
}

/// Arguments of `lectern exists`.
#[derive(Debug, Clone, Args)]
pub struct ExistsArgs {
    /// Asset key.
    pub key: String,

    /// Bucket to check instead of the assets bucket.
    #[arg(long = "bucket")]
    pub bucket: Option<String>,
}

impl From<ExistsArgs> for ExistsRequest {
    fn from(args: ExistsArgs) -> Self {
        Self {
            key: args.key,
            bucket: args.bucket,
        }
    }
}
