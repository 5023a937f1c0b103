use apr_restraints::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;
const BAR_TEMPLATE: &str = "{prefix:<24} [{bar:30.cyan/blue}] {pos}/{len} windows {msg}";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {prefix} {msg}";

/// Renders workflow progress on stderr as a per-window bar.
///
/// `ProgressBar` is a shared handle, so every callback handed out drives the same bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr())
            .with_style(spinner_style());
        bar.finish_and_clear();
        Self { bar }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        Box::new(move |progress: Progress| apply(&bar, progress))
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn apply(bar: &ProgressBar, progress: Progress) {
    match progress {
        Progress::PhaseStart { name } => {
            bar.reset();
            bar.set_length(0);
            bar.set_style(spinner_style());
            bar.set_prefix(name);
            bar.set_message("");
            bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
        Progress::TaskStart { total_steps } => {
            bar.disable_steady_tick();
            bar.set_style(bar_style());
            bar.set_length(total_steps);
            bar.set_position(0);
        }
        Progress::WindowWritten(window) => bar.set_message(format!("(last: {window})")),
        Progress::TaskIncrement => bar.inc(1),
        Progress::TaskFinish => {
            if let Some(length) = bar.length() {
                bar.set_position(length);
            }
            bar.set_message("");
        }
        Progress::PhaseFinish => {
            bar.disable_steady_tick();
            bar.finish_with_message("✓ Done");
        }
        Progress::Message(msg) if bar.is_finished() => eprintln!("  {msg}"),
        Progress::Message(msg) => bar.println(format!("  {msg}")),
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn new_handler_shows_nothing() {
        let handler = CliProgressHandler::new();
        assert!(handler.bar.is_finished());
        assert_eq!(handler.bar.length(), Some(0));
    }

    #[test]
    fn bar_counts_written_windows() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Writing restraint files",
        });
        assert_eq!(handler.bar.prefix(), "Writing restraint files");
        assert!(!handler.bar.is_finished());

        callback(Progress::TaskStart { total_steps: 3 });
        callback(Progress::WindowWritten("a000".to_string()));
        callback(Progress::TaskIncrement);
        assert_eq!(handler.bar.length(), Some(3));
        assert_eq!(handler.bar.position(), 1);
        assert_eq!(handler.bar.message(), "(last: a000)");

        callback(Progress::TaskFinish);
        assert_eq!(handler.bar.position(), 3);

        callback(Progress::PhaseFinish);
        assert!(handler.bar.is_finished());
        assert_eq!(handler.bar.message(), "✓ Done");
    }

    #[test]
    fn callbacks_from_other_threads_drive_the_same_bar() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Threaded" });
            callback(Progress::TaskStart { total_steps: 2 });
            callback(Progress::TaskIncrement);
            callback(Progress::TaskIncrement);
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        assert_eq!(handler.bar.position(), 2);
        assert!(handler.bar.is_finished());
    }
}
