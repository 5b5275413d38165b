use std::io;

use log::debug;

use crate::error::Error;
use crate::exec::{CommandRunner, Invocation};
use crate::password::Password;
use crate::platform::{DisplayServer, Platform};

/// External program that takes clipboard contents on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardTool {
    pub program: &'static str,
    pub args: &'static [&'static str],
    /// shown to the user after a copy
    pub label: &'static str,
}

impl ClipboardTool {
    const PBCOPY: ClipboardTool = ClipboardTool {
        program: "pbcopy",
        args: &[],
        label: "pbcopy",
    };
    const WL_COPY: ClipboardTool = ClipboardTool {
        program: "wl-copy",
        args: &[],
        label: "wl-copy (Wayland)",
    };
    const XCLIP: ClipboardTool = ClipboardTool {
        program: "xclip",
        args: &["-selection", "clipboard"],
        label: "xclip (X11)",
    };
    const CLIP: ClipboardTool = ClipboardTool {
        program: "clip",
        args: &[],
        label: "clip",
    };

    pub fn for_platform(platform: &Platform) -> Option<&'static ClipboardTool> {
        match platform {
            Platform::MacOs => Some(&Self::PBCOPY),
            Platform::Linux(DisplayServer::Wayland) => Some(&Self::WL_COPY),
            Platform::Linux(DisplayServer::X11) => Some(&Self::XCLIP),
            Platform::Windows => Some(&Self::CLIP),
            Platform::Other(_) => None,
        }
    }

    fn invocation(&self) -> Invocation {
        Invocation::new(self.program).args(self.args.iter().copied())
    }
}

pub struct ClipboardWriter<'a> {
    runner: &'a dyn CommandRunner,
    platform: &'a Platform,
    tool: Option<&'static ClipboardTool>,
}

impl<'a> ClipboardWriter<'a> {
    pub fn new(runner: &'a dyn CommandRunner, platform: &'a Platform) -> Self {
        ClipboardWriter {
            runner,
            platform,
            tool: ClipboardTool::for_platform(platform),
        }
    }

    pub fn copy(&self, password: &Password) -> Result<&'static ClipboardTool, Error> {
        let tool = self.tool.ok_or_else(|| Error::UnsupportedPlatform {
            os: self.platform.name(),
        })?;
        if let Platform::Linux(server) = self.platform {
            debug!("{server} session, copying with {}", tool.program);
        }
        let done = self
            .runner
            .run(&tool.invocation(), Some(password.as_bytes()))
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => Error::MissingToolchain {
                    tool: tool.program.to_string(),
                    os: self.platform.name(),
                },
                _ => Error::Io {
                    tool: tool.program.to_string(),
                    source: e,
                },
            })?;
        if !done.success() {
            return Err(Error::ClipboardFailure {
                tool: tool.program.to_string(),
                code: done.code,
            });
        }
        Ok(tool)
    }
}
