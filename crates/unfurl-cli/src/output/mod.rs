//! Output formatting for the detect and expand steps.
//!
//! Both steps report through the same [`OutputFormatter`] trait so the
//! human-readable and JSON renderings stay in lockstep with the exit-code
//! contract.

mod formatter;
mod human;
mod json;

pub use formatter::OutputFormatter;

use human::HumanFormatter;
use json::JsonFormatter;

/// Selects the formatter from the global CLI flags; `--json` wins over the
/// verbosity switches, which only affect the human renderer.
pub fn create_formatter(json: bool, verbose: bool, quiet: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter::new(verbose, quiet))
    }
}
