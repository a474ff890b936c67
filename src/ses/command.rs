//! sg3_utils command runner
//!
//! Spawns the external tools with a bounded wait. Anything on stderr, a
//! non-zero exit, empty output or a timeout is a tool failure.

use crate::config::Config;
use crate::error::ToolError;
use crate::ses::traits::{EnclosureTool, Page};

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// `lsscsi` + `sg_ses` backed enclosure tool
#[derive(Debug, Clone)]
pub struct SgUtils {
    sg_ses: String,
    lsscsi: String,
    timeout: Duration,
}

impl SgUtils {
    pub fn new(sg_ses: impl Into<String>, lsscsi: impl Into<String>, timeout: Duration) -> Self {
        Self {
            sg_ses: sg_ses.into(),
            lsscsi: lsscsi.into(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.tools.sg_ses, &config.tools.lsscsi, config.timeout())
    }

    /// Run a program to completion and return its stdout
    fn run(&self, program: &str, args: &[String]) -> Result<String, ToolError> {
        log::debug!("executing: {} {}", program, args.join(" "));

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(program, e))?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let status = self.wait(&mut child, program)?;
        let stdout = collect(stdout);
        let stderr = collect(stderr);

        if !stderr.is_empty() {
            for line in stderr.lines() {
                log::debug!("{}(stderr): {}", program, line);
            }
            let line = stderr.lines().next().unwrap_or_default().to_string();
            return Err(ToolError::Stderr {
                program: program.to_string(),
                line,
            });
        }

        for line in stdout.lines() {
            log::debug!("{}: {}", program, line);
        }

        match status.code() {
            Some(0) => {}
            Some(code) => {
                return Err(ToolError::ExitStatus {
                    program: program.to_string(),
                    code,
                })
            }
            None => {
                return Err(ToolError::Killed {
                    program: program.to_string(),
                })
            }
        }

        if stdout.trim().is_empty() {
            return Err(ToolError::EmptyOutput {
                program: program.to_string(),
            });
        }

        Ok(stdout)
    }

    fn wait(&self, child: &mut Child, program: &str) -> Result<ExitStatus, ToolError> {
        let start = Instant::now();
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if start.elapsed() >= self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        log::debug!("{} killed after {:?}", program, self.timeout);
                        return Err(ToolError::Timeout {
                            program: program.to_string(),
                            seconds: self.timeout.as_secs(),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => return Err(spawn_error(program, e)),
            }
        }
    }
}

impl EnclosureTool for SgUtils {
    fn scsi_listing(&self) -> Result<String, ToolError> {
        self.run(&self.lsscsi, &["-g".to_string()])
    }

    fn ses_page(&self, device: &str, page: Page, element: Option<&str>) -> Result<String, ToolError> {
        let mut args = vec![format!("--page={}", page.as_arg())];
        if let Some(element) = element {
            args.push(format!("--index={}", element));
        }
        args.push(device.to_string());
        self.run(&self.sg_ses, &args)
    }
}

fn spawn_error(program: &str, source: io::Error) -> ToolError {
    if source.kind() == io::ErrorKind::NotFound {
        ToolError::NotFound(program.to_string())
    } else {
        ToolError::Spawn {
            program: program.to_string(),
            source,
        }
    }
}

/// Read a pipe to the end on a separate thread so the child never blocks on a full pipe
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    let bytes = handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
