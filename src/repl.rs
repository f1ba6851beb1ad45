use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use log::debug;
use nix::sys::wait::waitpid;
use nix::unistd::{chdir, fork, isatty, ForkResult};

use crate::executor;
use crate::parser;

/// Interactive read loop. Each non-builtin line runs in one freshly forked
/// process, so the executed tree can never disturb the driver's own
/// descriptors or working directory. Returns on end of input.
pub fn start() {
    let stdin = io::stdin();
    let interactive = isatty(0).unwrap_or(false);

    loop {
        if interactive {
            print!("$ ");
            let _ = io::stdout().flush();
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("read: {}", e);
                break;
            }
        }
        run_line(line.trim_end_matches(['\n', '\r']));
    }
}

fn run_line(line: &str) {
    if line == "exit" {
        process::exit(0);
    }
    if let Some(dir) = line.strip_prefix("cd ") {
        // chdir must happen in the driver itself; done in a child it would
        // be invisible here.
        if chdir(Path::new(dir)).is_err() {
            eprintln!("cannot cd {}", dir);
        }
        return;
    }

    match unsafe { fork() } {
        Ok(ForkResult::Child) => match parser::parse_line(line) {
            Ok(cmd) => {
                debug!("parsed: {:?}", cmd);
                executor::run(&cmd)
            }
            Err(e) => {
                eprintln!("{}", e);
                process::exit(2);
            }
        },
        Ok(ForkResult::Parent { child }) => {
            let _ = waitpid(child, None);
        }
        Err(e) => eprintln!("fork: {}", e),
    }
}
