use std::path::PathBuf;

use log::{debug, warn};

/// Interactive source of files to encrypt.
pub trait FilePicker {
    /// `None` means no picker can be shown here, `Some(vec![])` means the
    /// user closed the dialog without choosing anything.
    fn pick(&self) -> Option<Vec<PathBuf>>;
}

/// Native multi-select dialog.
#[cfg(feature = "gui")]
pub struct DialogPicker;

#[cfg(feature = "gui")]
impl FilePicker for DialogPicker {
    fn pick(&self) -> Option<Vec<PathBuf>> {
        if !display_available() {
            return None;
        }
        let files = rfd::FileDialog::new()
            .set_title("Select files")
            .pick_files()
            .unwrap_or_default();
        Some(files)
    }
}

#[cfg(feature = "gui")]
fn display_available() -> bool {
    if cfg!(any(target_os = "windows", target_os = "macos")) {
        return true;
    }
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

/// Picker for builds without the `gui` feature.
pub struct HeadlessPicker;

impl FilePicker for HeadlessPicker {
    fn pick(&self) -> Option<Vec<PathBuf>> {
        None
    }
}

#[cfg(feature = "gui")]
pub fn default_picker() -> Box<dyn FilePicker> {
    Box::new(DialogPicker)
}

#[cfg(not(feature = "gui"))]
pub fn default_picker() -> Box<dyn FilePicker> {
    Box::new(HeadlessPicker)
}

pub fn select_files(explicit: Option<PathBuf>, picker: &dyn FilePicker) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path];
    }
    match picker.pick() {
        Some(files) => {
            debug!("picked {} file(s)", files.len());
            files
        }
        None => {
            warn!("file picker is not available here (no display or built without the gui feature), use --file");
            Vec::new()
        }
    }
}
