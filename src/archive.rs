use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Error;
use crate::exec::{CommandRunner, Invocation};
use crate::password::Password;
use crate::platform::Platform;

pub const DEFAULT_ARCHIVER: &str = "zip";
pub const EXTENSION: &str = "zip";

/// `<dir of first file>/<first file name>.zip`
pub fn archive_path(files: &[PathBuf]) -> Result<PathBuf, Error> {
    let first = files
        .first()
        .ok_or(Error::NoFileSelected)?;
    let name = first
        .file_name()
        .ok_or_else(|| Error::InvalidArgument(format!("{} is not a file", first.display())))?;
    let mut archive = name.to_os_string();
    archive.push(".");
    archive.push(EXTENSION);
    Ok(first.parent().unwrap_or(Path::new("")).join(archive))
}

pub struct Archiver<'a> {
    runner: &'a dyn CommandRunner,
    program: String,
    platform: &'a Platform,
}

impl<'a> Archiver<'a> {
    pub fn new(runner: &'a dyn CommandRunner, program: impl Into<String>, platform: &'a Platform) -> Self {
        Archiver {
            runner,
            program: program.into(),
            platform,
        }
    }

    /// Encrypt `files` into a single archive next to the first one.
    pub fn encrypt(&self, files: &[PathBuf], password: &Password) -> Result<PathBuf, Error> {
        let archive = archive_path(files)?;
        if archive.exists() {
            warn!("{} already exists, {} will update it", archive.display(), self.program);
        }
        // -j keeps bare names inside the archive
        let invocation = Invocation::new(&self.program)
            .args(["-j", "-e", "-P", password.as_str()])
            .arg(not_an_option(&archive))
            .args(files.iter().map(|f| not_an_option(f)));
        let done = self.runner.run(&invocation, None).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::MissingToolchain {
                tool: self.program.clone(),
                os: self.platform.name(),
            },
            _ => Error::Io {
                tool: self.program.clone(),
                source: e,
            },
        })?;
        debug!("{} said: {}", self.program, String::from_utf8_lossy(&done.stdout).trim());
        if !done.success() {
            return Err(Error::ArchiveFailure {
                tool: self.program.clone(),
                code: done.code,
                output: diagnostics(&done.stdout, &done.stderr),
            });
        }
        if !archive.exists() {
            return Err(Error::ArchiveFailure {
                tool: self.program.clone(),
                code: done.code,
                output: format!("{} was not created", archive.display()),
            });
        }
        Ok(archive)
    }
}

/// Relative paths get a leading `./` so a name like `-notes.txt` is not
/// read as a flag.
fn not_an_option(path: &Path) -> PathBuf {
    if path.is_relative() {
        Path::new(".").join(path)
    } else {
        path.to_path_buf()
    }
}

/// zip prints its warnings and errors on stdout, so both streams count.
fn diagnostics(stdout: &[u8], stderr: &[u8]) -> String {
    [stdout, stderr]
        .iter()
        .map(|out| String::from_utf8_lossy(out))
        .flat_map(|out| {
            out.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .join("; ")
}
