/// User interface and status output utilities
///
/// Every phase of a grade-report run (loading, matching, writing reports,
/// mail delivery) announces itself through `status`; recoverable problems
/// such as dropped rows or failed recipients go through `warning`.
///
/// This module handles:
/// - Serialized console output
/// - Colored terminal text
/// - Status message formatting

use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;

/// Execute a function with exclusive access to console output
fn status_lock<F>(f: F)
where
    F: FnOnce(),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Print the "grade-report: " prefix for status messages
fn print_status_header() {
    print!("grade-report: ");
}

/// Print colored text to terminal, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        print!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        if let Some(ref mut t) = term::stdout() {
            if t.fg(fg).is_err() {
                return false;
            }
            let _ = t.attr(term::Attr::Bold);
            if write!(t, "{}", s).is_err() {
                return false;
            }
            let _ = t.reset();
            return true;
        }

        false
    }
}

/// Print a status message with "grade-report: " prefix
pub fn status(s: &str) {
    status_lock(|| {
        print_status_header();
        println!("{}", s);
    });
}

/// Print a status message with a highlighted "warning" prefix
pub fn warning(s: &str) {
    status_lock(|| {
        print_status_header();
        print_color("warning", term::color::BRIGHT_YELLOW);
        println!(": {}", s);
    });
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    println!();
    print_color("error", term::color::BRIGHT_RED);
    println!(": {}", msg);
    println!();
}
