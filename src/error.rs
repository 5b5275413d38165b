use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no files selected")]
    NoFileSelected,

    #[error("{tool} not found on {os}, please install it")]
    MissingToolchain { tool: String, os: String },

    #[error("{tool} failed ({}): {output}", exit_code(.code))]
    ArchiveFailure {
        tool: String,
        code: Option<i32>,
        /// what the tool printed, on either stream
        output: String,
    },

    #[error("clipboard copy not supported on {os}")]
    UnsupportedPlatform { os: String },

    #[error("{tool} failed ({})", exit_code(.code))]
    ClipboardFailure { tool: String, code: Option<i32> },

    #[error("running {tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: io::Error,
    },
}

fn exit_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {c}"),
        None => "terminated by signal".to_string(),
    }
}
