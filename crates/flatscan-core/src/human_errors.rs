// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable messages for scan failures.
//
// Hard errors and "no document found" outcomes are kept apart: each has its
// own entry point, and the severity tells the shell whether retaking the photo
// can help.

use crate::error::FlatscanError;
use crate::types::NoDocument;

/// Severity of a failure from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The photo was read but no page was found; a better photo should work.
    RetakePhoto,
    /// The user must fix something (pick another file, fix a setting).
    ActionRequired,
    /// Something went wrong that a new photo will not fix.
    Permanent,
}

/// A plain-English message with an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Short summary (shown first).
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// How the failure can be recovered from. The CLI logs permanent
    /// failures as errors and the rest as warnings.
    pub severity: Severity,
}

/// Convert a `FlatscanError` into a `HumanError`.
pub fn humanize_error(err: &FlatscanError) -> HumanError {
    match err {
        FlatscanError::ImageError(detail) => {
            let lower = detail.to_lowercase();
            if lower.contains("no such file") || lower.contains("not found") {
                HumanError {
                    message: "We couldn't find that picture.".into(),
                    suggestion: "Check the file name and folder, then try again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if lower.contains("unsupported") || lower.contains("format") {
                HumanError {
                    message: "That file isn't a picture we can read.".into(),
                    suggestion: "Use a JPEG or PNG photo of the page.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "We couldn't open that picture.".into(),
                    suggestion: format!("The file may be damaged. Try taking the photo again. (Detail: {detail})"),
                    severity: Severity::ActionRequired,
                }
            }
        }

        FlatscanError::InvalidConfig(detail) => HumanError {
            message: "The scan settings are not valid.".into(),
            suggestion: format!("Fix the settings file or remove it to use the defaults. (Detail: {detail})"),
            severity: Severity::ActionRequired,
        },

        FlatscanError::Geometry(_) => HumanError {
            message: "The page outline was too thin or twisted to straighten.".into(),
            suggestion: "Take the photo from straight above so all four corners are clearly visible.".into(),
            severity: Severity::RetakePhoto,
        },

        FlatscanError::PdfError(detail) => HumanError {
            message: "We couldn't create the PDF.".into(),
            suggestion: format!("Try saving as a PNG instead. (Detail: {detail})"),
            severity: Severity::Permanent,
        },

        FlatscanError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "We couldn't find that file or folder.".into(),
                suggestion: "Check the path and try again.".into(),
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "We're not allowed to save there.".into(),
                suggestion: "Choose a different folder to save the scan in.".into(),
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "Something went wrong reading or writing a file.".into(),
                suggestion: format!("Make sure there is enough free space, then try again. ({io_err})"),
                severity: Severity::Permanent,
            },
        },

        FlatscanError::Serialization(_) => HumanError {
            message: "The settings file could not be read.".into(),
            suggestion: "Make sure the settings file is valid JSON.".into(),
            severity: Severity::ActionRequired,
        },
    }
}

/// Convert a "no document found" outcome into guidance for a retake.
pub fn humanize_negative(outcome: &NoDocument) -> HumanError {
    match outcome {
        NoDocument::NoContour => HumanError {
            message: "We couldn't see a page in this photo.".into(),
            suggestion: "Try a clearer photo: put the page on a dark, plain surface and make sure it fills most of the picture.".into(),
            severity: Severity::RetakePhoto,
        },
        NoDocument::NotQuadrilateral { .. } => HumanError {
            message: "We found something, but couldn't find the page's four corners.".into(),
            suggestion: "Try a clearer photo: keep all four corners in view and avoid folds or objects on top of the page.".into(),
            severity: Severity::RetakePhoto,
        },
    }
}
