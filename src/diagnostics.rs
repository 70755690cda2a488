use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static VERBOSE: AtomicBool = AtomicBool::new(false);
static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

/// Enable or disable verbose diagnostics (`diag!` output)
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Activate buffering. While active, diagnostics are stored instead of
/// printed, so stdout consumers (`export --stdout`) get clean output.
pub fn activate() {
    if let Ok(mut guard) = BUFFER.lock() {
        *guard = Some(Vec::new());
    }
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    BUFFER
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or_default()
}

/// Write a diagnostic line. If buffering is active the line is stored;
/// otherwise it is printed to stderr immediately.
pub fn emit(msg: String) {
    let line = format!("[{}] {}", chrono::Local::now().format("%H:%M:%S"), msg);
    let mut guard = match BUFFER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(buf) = guard.as_mut() {
        buf.push(line);
    } else {
        drop(guard);
        eprintln!("{}", line);
    }
}

/// Verbose-only diagnostic, formatted like `eprintln!`
#[macro_export]
macro_rules! diag {
    ($($arg:tt)*) => {
        if $crate::diagnostics::is_verbose() {
            $crate::diagnostics::emit(format!($($arg)*))
        }
    };
}

/// Warning that is always reported, formatted like `eprintln!`
#[macro_export]
macro_rules! diag_warn {
    ($($arg:tt)*) => {
        $crate::diagnostics::emit(format!("warning: {}", format!($($arg)*)))
    };
}
