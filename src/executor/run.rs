use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, IntoRawFd};
use std::process;

use log::debug;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{close, dup2, fork, pipe, ForkResult};

use super::resolver;
use crate::ast::{Cmd, RedirectKind, SeqOp};

/// Interprets a command tree. Never returns: every path ends by terminating
/// the calling process, either through `execv` or an explicit exit. Each
/// `Pipe` and `Sequence` node forks exactly one extra process; `Exec` and
/// `Redirect` never fork.
pub fn run(cmd: &Cmd) -> ! {
    match cmd {
        Cmd::Exec { argv } => {
            if argv.is_empty() {
                process::exit(0);
            }
            resolver::exec_argv(argv);
            eprintln!("command not found: {}", argv[0]);
            process::exit(1);
        }

        Cmd::Redirect { cmd, file, kind } => {
            match open_target(*kind, file) {
                Ok(f) => {
                    let opened = f.into_raw_fd();
                    if let Err(e) = dup2(opened, kind.fd()) {
                        eprintln!("redirect: dup2: {}", e);
                    }
                    let _ = close(opened);
                }
                // Non-fatal: the subtree still runs, just without the
                // redirection.
                Err(e) => eprintln!("redirect: {}: {}", file, e),
            }
            run(cmd)
        }

        Cmd::Pipe { left, right } => {
            let (read_end, write_end) = match pipe() {
                Ok(ends) => ends,
                Err(e) => {
                    eprintln!("pipe: {}", e);
                    process::exit(1);
                }
            };
            match unsafe { fork() } {
                Ok(ForkResult::Parent { child }) => {
                    debug!("pipe: right side running as {}", child);
                    drop(read_end);
                    if let Err(e) = dup2(write_end.as_raw_fd(), 1) {
                        eprintln!("pipe: dup2: {}", e);
                    }
                    drop(write_end);
                    run(left)
                }
                Ok(ForkResult::Child) => {
                    drop(write_end);
                    if let Err(e) = dup2(read_end.as_raw_fd(), 0) {
                        eprintln!("pipe: dup2: {}", e);
                    }
                    drop(read_end);
                    run(right)
                }
                Err(e) => {
                    eprintln!("fork: {}", e);
                    process::exit(1);
                }
            }
        }

        Cmd::Sequence { left, right, op } => match unsafe { fork() } {
            Ok(ForkResult::Child) => run(left),
            Ok(ForkResult::Parent { child }) => {
                let status = waitpid(child, None);
                debug!("sequence: left side {} finished: {:?}", child, status);
                let ok = left_succeeded(&status);
                if should_run_right(*op, ok) {
                    run(right)
                } else {
                    process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("fork: {}", e);
                process::exit(1);
            }
        },
    }
}

/// The left side of a sequence counts as successful only if it exited
/// normally with status 0; a signal death is a failure.
fn left_succeeded(status: &nix::Result<WaitStatus>) -> bool {
    matches!(status, Ok(WaitStatus::Exited(_, 0)))
}

fn should_run_right(op: SeqOp, left_ok: bool) -> bool {
    match op {
        SeqOp::Then => true,
        SeqOp::And => left_ok,
        SeqOp::Or => !left_ok,
    }
}

fn open_target(kind: RedirectKind, file: &str) -> std::io::Result<File> {
    match kind {
        RedirectKind::In => File::open(file),
        RedirectKind::Out => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(file),
    }
}
