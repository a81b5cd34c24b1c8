use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::resolve_debugger_path;
use crate::services::backends::{BackendError, DebuggerBackend};

/// Env var pointing at a captured report; when set, gdb is not spawned.
pub const FAKE_REPORT_ENV: &str = "SYMSIEVE_FAKE_REPORT";

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// gdb-backed backend running `gdb -batch -ex "info functions" <binary>`.
#[derive(Debug, Clone, Default)]
pub struct GdbBackend {
    /// Explicit debugger executable; falls back to `GDB_BIN`, then `gdb`.
    pub debugger_path: Option<PathBuf>,
    /// Kill the debugger after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl GdbBackend {
    /// A zero `timeout` is treated as no limit.
    pub fn new(debugger_path: Option<PathBuf>, timeout: Option<Duration>) -> Self {
        Self { debugger_path, timeout: timeout.filter(|limit| !limit.is_zero()) }
    }
}

impl DebuggerBackend for GdbBackend {
    fn report(&self, binary: &Path) -> Result<String, BackendError> {
        if !binary.is_file() {
            return Err(BackendError::MissingBinary(binary.to_path_buf()));
        }

        // Allow tests to feed a captured report via env to avoid needing gdb installed.
        if let Some(fake) = std::env::var_os(FAKE_REPORT_ENV) {
            debug!("reading fake report from {}", Path::new(&fake).display());
            return fs::read_to_string(&fake)
                .map_err(|e| BackendError::Io(format!("failed to read {FAKE_REPORT_ENV}: {e}")));
        }

        let gdb = resolve_debugger_path(self.debugger_path.as_deref());
        info!("running {} against {}", gdb.display(), binary.display());
        run_info_functions(&gdb, binary, self.timeout)
    }

    fn name(&self) -> &'static str {
        "gdb"
    }
}

fn run_info_functions(
    gdb: &Path,
    binary: &Path,
    timeout: Option<Duration>,
) -> Result<String, BackendError> {
    let program = gdb.display().to_string();
    let mut child = Command::new(gdb)
        .args(["-batch", "-ex", "info functions"])
        .arg(binary)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| BackendError::Spawn { program: program.clone(), source })?;

    // Drain both pipes off-thread so a chatty debugger cannot block on a full pipe.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = wait(&mut child, timeout).map_err(|e| match e {
        WaitError::TimedOut(secs) => BackendError::TimedOut { program: program.clone(), secs },
        WaitError::Io(e) => BackendError::Io(e.to_string()),
    })?;

    let stdout = join(stdout)?;
    let stderr = join(stderr)?;
    if !status.success() {
        return Err(BackendError::ExitStatus {
            program,
            status: status.to_string(),
            stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&stdout).to_string())
}

enum WaitError {
    TimedOut(u64),
    Io(std::io::Error),
}

fn wait(child: &mut Child, timeout: Option<Duration>) -> Result<ExitStatus, WaitError> {
    let Some(limit) = timeout else {
        return child.wait().map_err(WaitError::Io);
    };
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait().map_err(WaitError::Io)? {
            return Ok(status);
        }
        if started.elapsed() >= limit {
            let _ = child.kill();
            let _ = child.wait();
            return Err(WaitError::TimedOut(limit.as_secs()));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

type Drain = Option<thread::JoinHandle<std::io::Result<Vec<u8>>>>;

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Drain {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn join(handle: Drain) -> Result<Vec<u8>, BackendError> {
    match handle {
        Some(handle) => handle
            .join()
            .map_err(|_| BackendError::Io("pipe reader panicked".into()))?
            .map_err(|e| BackendError::Io(e.to_string())),
        None => Ok(Vec::new()),
    }
}
