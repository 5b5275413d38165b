use std::env;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    Wayland,
    X11,
}

/// Host OS, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux(DisplayServer),
    Windows,
    Other(String),
}

impl Platform {
    pub fn detect() -> Self {
        let wayland = env::var_os("WAYLAND_DISPLAY").is_some_and(|v| !v.is_empty());
        Platform::from_parts(env::consts::OS, wayland)
    }

    /// `os` as in `std::env::consts::OS`.
    pub fn from_parts(os: &str, wayland: bool) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "linux" if wayland => Platform::Linux(DisplayServer::Wayland),
            "linux" => Platform::Linux(DisplayServer::X11),
            "windows" => Platform::Windows,
            other => Platform::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::MacOs => write!(f, "macOS"),
            Platform::Linux(_) => write!(f, "Linux"),
            Platform::Windows => write!(f, "Windows"),
            Platform::Other(os) => write!(f, "{os}"),
        }
    }
}

impl Display for DisplayServer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DisplayServer::Wayland => "Wayland",
                DisplayServer::X11 => "X11",
            }
        )
    }
}
