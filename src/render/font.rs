//! Font discovery for text rendering.
//!
//! Plotters is built with its pure-Rust `ab_glyph` text backend, which only
//! knows fonts registered at runtime. A [`FontSource`] registers one TTF file as
//! the `sans-serif` family, once per process. Frames render without text when
//! no font could be registered.

use ab_glyph::FontRef;
use log::{debug, warn};
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::RenderError;

/// Family name every text element is drawn with
pub const FONT_FAMILY: &str = "sans-serif";

/// Common locations of a regular sans-serif TTF
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Where to look for the text font
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontSource {
    path: Option<PathBuf>,
}

impl FontSource {
    /// Search the common system font locations
    pub fn system() -> Self {
        Self::default()
    }

    /// Use one specific TTF file
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Explicit font path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Register the font unless one is already registered.
    ///
    /// Returns whether text can be drawn. An explicit path that cannot be read
    /// or parsed is an error; a failed system search only disables text. Once a
    /// choice is made, later explicit paths are ignored with a warning.
    pub fn install(&self) -> Result<bool, RenderError> {
        if let Some(&installed) = INSTALLED.get() {
            if let Some(path) = &self.path {
                warn!(
                    "Font already configured for this process; ignoring {}",
                    path.display()
                );
            }
            return Ok(installed);
        }

        let installed = match &self.path {
            Some(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    RenderError::Font(format!("cannot read font {}: {}", path.display(), e))
                })?;
                register(bytes).map_err(|e| {
                    RenderError::Font(format!("cannot load font {}: {}", path.display(), e))
                })?;
                debug!("Registered font {}", path.display());
                true
            }
            None => search_system(),
        };

        Ok(*INSTALLED.get_or_init(|| installed))
    }
}

/// Whether a font has been registered in this process
pub fn text_available() -> bool {
    INSTALLED.get().copied().unwrap_or(false)
}

fn search_system() -> bool {
    for candidate in SYSTEM_FONTS {
        let Ok(bytes) = std::fs::read(candidate) else {
            continue;
        };
        match register(bytes) {
            Ok(()) => {
                debug!("Registered system font {}", candidate);
                return true;
            }
            Err(e) => debug!("Skipping font {}: {}", candidate, e),
        }
    }
    warn!("No usable system font found; frames will be rendered without text");
    false
}

fn register(bytes: Vec<u8>) -> Result<(), String> {
    FontRef::try_from_slice(&bytes).map_err(|e| e.to_string())?;
    // The registry keeps the bytes for the rest of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| "not a valid TrueType/OpenType font".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_non_font_bytes() {
        let err = register(b"definitely not a font".to_vec()).unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn test_explicit_font_after_install_keeps_first_choice() {
        let first = FontSource::system().install().unwrap();
        let again = FontSource::file("/nonexistent/thermostrip/font.ttf")
            .install()
            .unwrap();
        assert_eq!(first, again);
        assert_eq!(text_available(), first);
    }
}
