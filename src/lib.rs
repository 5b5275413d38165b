pub mod archive;
pub mod clipboard;
pub mod error;
pub mod exec;
pub mod password;
pub mod platform;
pub mod select;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::{info, warn};

use crate::archive::{Archiver, DEFAULT_ARCHIVER};
use crate::clipboard::{ClipboardTool, ClipboardWriter};
use crate::exec::{CommandRunner, SystemRunner};
use crate::password::{generate_password, password_length, Password, DEFAULT_LENGTH};
use crate::platform::Platform;
use crate::select::{default_picker, select_files, FilePicker};

pub use crate::error::Error;

/// Generate a random password, zip a file with it
/// and copy the password to the clipboard.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// length of the password
    #[arg(short, long, default_value_t = DEFAULT_LENGTH, allow_negative_numbers = true)]
    length: i64,

    /// file to encrypt.
    /// opens a file picker when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// zip executable to use
    #[arg(long, env = "ZIPPW_ARCHIVER", default_value = DEFAULT_ARCHIVER)]
    archiver: String,

    /// print the password only, don't touch the clipboard
    #[arg(long)]
    no_copy: bool,

    /// silent mode
    #[arg(long)]
    pub silent: bool,

    /// debug
    #[arg(long)]
    pub debug: bool,
}

/// How a run ended when nothing went wrong.
#[derive(Debug)]
pub enum Outcome {
    NoSelection,
    Encrypted {
        files: Vec<PathBuf>,
        archive: PathBuf,
        password: Password,
        /// `None` when copying was turned off
        clipboard: Option<Result<&'static ClipboardTool, Error>>,
    },
}

pub struct Session<'a> {
    length: i64,
    file: Option<PathBuf>,
    copy: bool,
    picker: &'a dyn FilePicker,
    archiver: Archiver<'a>,
    clipboard: ClipboardWriter<'a>,
}

impl<'a> Session<'a> {
    pub fn new(
        args: &Args,
        runner: &'a dyn CommandRunner,
        picker: &'a dyn FilePicker,
        platform: &'a Platform,
    ) -> Self {
        Session {
            length: args.length,
            file: args.file.clone(),
            copy: !args.no_copy,
            picker,
            archiver: Archiver::new(runner, args.archiver.clone(), platform),
            clipboard: ClipboardWriter::new(runner, platform),
        }
    }

    pub fn run(&self) -> Result<Outcome, Error> {
        let length = password_length(self.length)?;
        let files = select_files(self.file.clone(), self.picker);
        if files.is_empty() {
            return Ok(Outcome::NoSelection);
        }
        let password = generate_password(length)?;
        let archive = self.archiver.encrypt(&files, &password)?;
        info!("created {}", archive.display());
        let clipboard = self.copy.then(|| self.clipboard.copy(&password));
        Ok(Outcome::Encrypted {
            files,
            archive,
            password,
            clipboard,
        })
    }
}

pub fn run(args: Args) -> Result<()> {
    let platform = Platform::detect();
    let picker = default_picker();
    let session = Session::new(&args, &SystemRunner, picker.as_ref(), &platform);
    match session.run()? {
        Outcome::NoSelection => {
            Args::command().print_help()?;
            println!("\nNo files selected. Exiting.");
        }
        Outcome::Encrypted {
            files,
            archive,
            password,
            clipboard,
        } => {
            let names = files
                .iter()
                .map(|f| f.file_name().unwrap_or(f.as_os_str()).to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "File \"{}\" encrypted and saved as \"{}\" with password {}.",
                names,
                archive.display(),
                password.as_str()
            );
            match clipboard {
                Some(Ok(tool)) => println!("Password copied to clipboard using {}.", tool.label),
                Some(Err(Error::UnsupportedPlatform { os })) => {
                    info!("clipboard copy not supported on {os}")
                }
                Some(Err(e)) => warn!("password not copied: {e}"),
                None => {}
            }
        }
    }
    Ok(())
}
