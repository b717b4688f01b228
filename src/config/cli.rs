use crate::utils::error::Result;
use crate::utils::validation::{validate_image_file, validate_non_empty_string, validate_path, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "qr-authenticator")]
#[command(about = "Check that a brand's QR code points at the brand's own domain")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the supported brands and their domains
    Brands,

    /// Verify a QR payload given as text
    Check {
        #[arg(short, long)]
        brand: String,

        /// Decoded QR text, usually a URL
        #[arg(short, long)]
        url: String,
    },

    /// Decode a QR code from an image file and verify it
    Scan {
        #[arg(short, long)]
        brand: String,

        #[arg(short, long)]
        image: String,
    },

    /// Scan camera frames until a QR code is found, then verify it (Ctrl-C stops)
    Camera {
        #[arg(short, long)]
        brand: String,

        /// Directory of captured frames, one image per frame
        #[arg(short, long)]
        frames: String,
    },
}

impl Command {
    pub fn brand(&self) -> Option<&str> {
        match self {
            Command::Brands => None,
            Command::Check { brand, .. }
            | Command::Scan { brand, .. }
            | Command::Camera { brand, .. } => Some(brand),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(brand) = self.command.brand() {
            validate_non_empty_string("brand", brand)?;
        }
        match &self.command {
            Command::Scan { image, .. } => validate_image_file("image", image)?,
            Command::Camera { frames, .. } => validate_path("frames", frames)?,
            Command::Brands | Command::Check { .. } => {}
        }
        Ok(())
    }
}
