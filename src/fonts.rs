//! Font loading for the PDF export.
//!
//! `genpdf` needs a TrueType family on disk. The bundled `Roboto` family is
//! searched first; when it is unavailable the renderer falls back to a system
//! Liberation Sans install.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Directory searched before any default location.
pub const FONTS_DIR_ENV: &str = "WHISKY_CATALOG_FONTS_DIR";

const FALLBACK_FAMILY_NAME: &str = "LiberationSans";

const FALLBACK_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/local/share/fonts",
];

const STYLE_SUFFIXES: &[&str] = &["Regular", "Bold", "Italic", "BoldItalic"];

fn family_files(family: &str) -> impl Iterator<Item = String> + '_ {
    STYLE_SUFFIXES
        .iter()
        .map(move |suffix| format!("{family}-{suffix}.ttf"))
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn bundled_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates.contains(&manifest_candidate) {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_files(directory: &Path, family: &str) -> Vec<String> {
    family_files(family)
        .filter(|name| !directory.join(name).is_file())
        .collect()
}

fn not_found(message: String) -> Error {
    Error::new(
        message,
        io::Error::new(io::ErrorKind::NotFound, "font files not found"),
    )
}

fn resolve_bundled_directory() -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in bundled_directory_candidates() {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }
        let missing = missing_files(&candidate, DEFAULT_FONT_FAMILY_NAME);
        if missing.is_empty() {
            return Ok(candidate);
        }
        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.display(),
            missing.join(", ")
        ));
    }

    Err(not_found(format!(
        "Unable to locate the {} font family. Checked: {}. See assets/fonts/README.md or set {}.",
        DEFAULT_FONT_FAMILY_NAME,
        attempts.join(", "),
        FONTS_DIR_ENV
    )))
}

fn load_family(directory: &Path, family: &str) -> Result<FontFamily<FontData>, Error> {
    debug!("loading font family {family} from {}", directory.display());
    fonts::from_files(directory, family, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                family,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn fallback_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = FALLBACK_DIRECTORIES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| missing_files(candidate, FALLBACK_FAMILY_NAME).is_empty())
        .ok_or_else(|| {
            not_found(format!(
                "No {} install found in [{}]",
                FALLBACK_FAMILY_NAME,
                FALLBACK_DIRECTORIES.join(", ")
            ))
        })?;
    load_family(&directory, FALLBACK_FAMILY_NAME)
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Returns the bundled Roboto family, or Liberation Sans when Roboto is missing.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    match resolve_bundled_directory().and_then(|dir| load_family(&dir, DEFAULT_FONT_FAMILY_NAME)) {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match fallback_font_family() {
            Ok(fallback) => {
                warn!(
                    "Bundled fonts unavailable ({}); falling back to '{}'.",
                    err, FALLBACK_FAMILY_NAME
                );
                Ok(fallback)
            }
            Err(fallback_err) => {
                warn!(
                    "Bundled fonts unavailable ({}); fallback failed: {}",
                    err, fallback_err
                );
                Err(not_found(format!(
                    "Bundled fonts unavailable and fallback failed: {}",
                    fallback_err
                )))
            }
        },
        Err(err) => Err(err),
    }
}

/// Indicates whether a usable font family can be found on this machine.
pub fn default_fonts_available() -> bool {
    resolve_bundled_directory().is_ok()
        || FALLBACK_DIRECTORIES
            .iter()
            .any(|dir| missing_files(Path::new(dir), FALLBACK_FAMILY_NAME).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_files_follow_genpdf_naming() {
        let files: Vec<String> = family_files("Roboto").collect();
        assert_eq!(
            files,
            [
                "Roboto-Regular.ttf",
                "Roboto-Bold.ttf",
                "Roboto-Italic.ttf",
                "Roboto-BoldItalic.ttf"
            ]
        );
    }

    #[test]
    fn missing_directory_reports_every_file() {
        let missing = missing_files(Path::new("/__whisky_catalog_missing_fonts__"), "Roboto");
        assert_eq!(missing.len(), 4);
    }

    #[test]
    fn not_found_errors_count_as_missing_fonts() {
        assert!(fonts_missing(&not_found("nothing here".to_owned())));
    }
}
