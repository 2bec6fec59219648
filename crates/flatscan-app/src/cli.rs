// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::{Path, PathBuf};

use clap::Parser;

/// Turn a photo of a page into a flat, clean scan.
#[derive(Debug, Parser)]
#[command(name = "flatscan", version, about)]
pub struct Cli {
    /// Photo of the document (JPEG, PNG, ...).
    #[arg(required_unless_present = "print_config")]
    pub input: Option<PathBuf>,

    /// Where to save the scan. `.pdf` writes a PDF; any other extension
    /// writes an image. Defaults to `<input>_scan.pdf` next to the photo.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Save the black/white copy instead of the grayscale one.
    #[arg(long)]
    pub binary: bool,

    /// Additionally save the grayscale copy as an image here.
    #[arg(long, value_name = "PATH")]
    pub gray_out: Option<PathBuf>,

    /// Additionally save the black/white copy as an image here.
    #[arg(long, value_name = "PATH")]
    pub binary_out: Option<PathBuf>,

    /// Label corners by angle around the page centre (copes with tilted photos).
    #[arg(long)]
    pub angular: bool,

    /// JSON file overriding scan settings; omitted fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Resolution of the page in PDF output.
    #[arg(long, default_value_t = flatscan_document::pdf::writer::DEFAULT_DPI)]
    pub dpi: f32,

    /// Print the effective scan settings as JSON and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Log pipeline details (overridden by RUST_LOG).
    #[arg(short, long)]
    pub verbose: bool,
}

/// `photo.jpg` becomes `photo_scan.pdf` in the same folder.
pub fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".into());
    input.with_file_name(format!("{stem}_scan.pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_input() {
        let out = default_output(Path::new("/tmp/photos/receipt.jpg"));
        assert_eq!(out, PathBuf::from("/tmp/photos/receipt_scan.pdf"));
    }

    #[test]
    fn input_required_unless_printing_config() {
        assert!(Cli::try_parse_from(["flatscan"]).is_err());
        let cli = Cli::try_parse_from(["flatscan", "--print-config"]).expect("parses");
        assert!(cli.print_config);
        assert!(cli.input.is_none());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "flatscan", "photo.png", "-o", "out.png", "--binary", "--angular", "--dpi", "200",
        ])
        .expect("parses");
        assert_eq!(cli.input, Some(PathBuf::from("photo.png")));
        assert_eq!(cli.output, Some(PathBuf::from("out.png")));
        assert!(cli.binary && cli.angular);
        assert_eq!(cli.dpi, 200.0);
    }
}
