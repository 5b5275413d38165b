use std::ffi::OsString;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use log::debug;

/// An external program call: what to run and with which arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Exit code and whatever output was captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Finished {
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Finished {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait CommandRunner {
    /// Run to completion. With a `stdin` payload the bytes are written and
    /// the pipe closed; output is then discarded rather than captured.
    fn run(&self, invocation: &Invocation, stdin: Option<&[u8]>) -> io::Result<Finished>;
}

pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, stdin: Option<&[u8]>) -> io::Result<Finished> {
        // args can hold the password, only the program name is logged
        debug!("running {}", invocation.program);
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        match stdin {
            None => {
                let output = cmd.stdin(Stdio::null()).output()?;
                Ok(Finished {
                    code: output.status.code(),
                    stdout: output.stdout,
                    stderr: output.stderr,
                })
            }
            Some(payload) => {
                // clipboard tools fork a daemon that keeps whatever
                // stdout/stderr it was handed open
                let mut child = cmd
                    .stdin(Stdio::piped())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()?;
                let written = match child.stdin.take() {
                    Some(mut pipe) => pipe.write_all(payload),
                    None => Ok(()),
                };
                // reap the child even when it hung up on us early
                let status = child.wait()?;
                written?;
                Ok(Finished {
                    code: status.code(),
                    ..Finished::default()
                })
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Records every call and answers from a table keyed by program name.
    /// Programs listed as missing fail the way a spawn does when the binary
    /// is not on PATH; everything else exits 0 unless given a code.
    #[derive(Default)]
    pub struct RecordingRunner {
        pub calls: RefCell<Vec<(Invocation, Option<Vec<u8>>)>>,
        missing: Vec<String>,
        codes: HashMap<String, i32>,
        effects: HashMap<String, fn(&Invocation)>,
    }

    /// Stand-in for zip: creates the `.zip` named on the command line.
    pub fn writes_archive(invocation: &Invocation) {
        let archive = invocation
            .args
            .iter()
            .find(|a| a.to_string_lossy().ends_with(".zip"))
            .expect("archive argument");
        std::fs::write(archive, b"PK").expect("write fake archive");
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// A runner whose `zip` leaves an archive behind.
        pub fn zipping() -> Self {
            Self::new().with_effect("zip", writes_archive)
        }

        /// Run `effect` whenever `program` succeeds.
        pub fn with_effect(mut self, program: &str, effect: fn(&Invocation)) -> Self {
            self.effects.insert(program.to_string(), effect);
            self
        }

        pub fn missing(mut self, program: &str) -> Self {
            self.missing.push(program.to_string());
            self
        }

        pub fn exit_with(mut self, program: &str, code: i32) -> Self {
            self.codes.insert(program.to_string(), code);
            self
        }

        pub fn programs(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .map(|(inv, _)| inv.program.clone())
                .collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, invocation: &Invocation, stdin: Option<&[u8]>) -> io::Result<Finished> {
            self.calls
                .borrow_mut()
                .push((invocation.clone(), stdin.map(<[u8]>::to_vec)));
            if self.missing.contains(&invocation.program) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
            }
            let code = self.codes.get(&invocation.program).copied().unwrap_or(0);
            if code == 0 {
                if let Some(effect) = self.effects.get(&invocation.program) {
                    effect(invocation);
                }
                return Ok(Finished {
                    code: Some(0),
                    ..Finished::default()
                });
            }
            // zip reports on stdout, the rest of the world on stderr
            Ok(Finished {
                code: Some(code),
                stdout: format!("{} warning: went wrong", invocation.program).into_bytes(),
                stderr: format!("{} error: giving up", invocation.program).into_bytes(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_builder() {
        let inv = Invocation::new("xclip").args(["-selection", "clipboard"]).arg("-i");
        assert_eq!(inv.program, "xclip");
        assert_eq!(inv.args, vec![OsString::from("-selection"), "clipboard".into(), "-i".into()]);
    }

    #[test]
    fn missing_program_is_not_found() {
        let inv = Invocation::new("zippw-definitely-not-a-real-program");
        let err = SystemRunner.run(&inv, None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn captures_exit_code_and_stderr() {
        let inv = Invocation::new("sh").args(["-c", "echo oops >&2; exit 3"]);
        let done = SystemRunner.run(&inv, None).unwrap();
        assert_eq!(done.code, Some(3));
        assert!(!done.success());
        assert_eq!(String::from_utf8_lossy(&done.stderr).trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn early_exit_while_writing_stdin() {
        // exits without reading, a large payload then hits a closed pipe
        let inv = Invocation::new("sh").args(["-c", "exit 4"]);
        let payload = vec![b'x'; 1 << 20];
        match SystemRunner.run(&inv, Some(&payload)) {
            Ok(done) => assert_eq!(done.code, Some(4)),
            Err(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        }
    }

    #[cfg(unix)]
    #[test]
    fn feeds_stdin() {
        let inv = Invocation::new("sh").args(["-c", "test \"$(cat)\" = hunter2"]);
        let done = SystemRunner.run(&inv, Some(&b"hunter2"[..])).unwrap();
        assert!(done.success(), "child read the payload");
    }
}
