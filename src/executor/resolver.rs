use std::ffi::CString;

use log::debug;
use nix::unistd::execv;

/// Directory prefixes tried for a program name, in order. The bare name
/// comes first so absolute and relative paths work unchanged.
const SEARCH_PREFIXES: [&str; 3] = ["", "/bin/", "/usr/bin/"];

/// Attempts to replace the current process image with `argv[0]`, trying each
/// search prefix in turn. A successful `execv` never returns; returning from
/// this function means every candidate failed and the caller must treat the
/// command as not found.
pub fn exec_argv(argv: &[String]) {
    if argv.is_empty() {
        return;
    }
    let args: Vec<CString> = match argv.iter().map(|a| CString::new(a.as_str())).collect() {
        Ok(args) => args,
        // A NUL byte cannot survive tokenization of a text line.
        Err(_) => return,
    };
    for path in candidate_paths(&argv[0]) {
        debug!("exec attempt: {:?}", path);
        let _ = execv(&path, &args);
    }
}

fn candidate_paths(name: &str) -> Vec<CString> {
    SEARCH_PREFIXES
        .iter()
        .filter_map(|prefix| CString::new(format!("{}{}", prefix, name)).ok())
        .collect()
}
