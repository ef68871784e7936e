//! GitHub Actions log output
//!
//! Actions interprets specially formatted stdout lines ("workflow commands"):
//! `::warning::` and `::error::` become annotations, `::debug::` is shown only
//! with step debugging on, and `::group::`/`::endgroup::` fold a section of the
//! log. This module maps `tracing` levels onto those commands and provides
//! collapsible groups.

use std::fmt::{self, Write as _};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

/// Set once workflow-command output is installed
static ACTIONS_OUTPUT: AtomicBool = AtomicBool::new(false);

/// How log lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Actions when running inside GitHub Actions, plain otherwise
    #[default]
    Auto,
    /// Workflow commands on stdout
    Actions,
    /// Human-readable lines on stderr
    Plain,
}

impl LogFormat {
    /// Resolve `Auto` given whether we run inside GitHub Actions
    #[must_use]
    pub const fn resolve(self, in_actions: bool) -> Self {
        match self {
            Self::Auto if in_actions => Self::Actions,
            Self::Auto => Self::Plain,
            other => other,
        }
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides the default `info` filter. Calling this twice is a
/// no-op for the second call.
pub fn init_tracing(format: LogFormat, in_actions: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match format.resolve(in_actions) {
        LogFormat::Actions => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(WorkflowCommandFormat)
                    .with_writer(std::io::stdout),
            )
            .try_init()
            .is_ok(),
        LogFormat::Plain | LogFormat::Auto => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .is_ok(),
    };

    if installed && format.resolve(in_actions) == LogFormat::Actions {
        ACTIONS_OUTPUT.store(true, Ordering::SeqCst);
    }
}

/// Whether workflow-command output is active
pub fn actions_output() -> bool {
    ACTIONS_OUTPUT.load(Ordering::SeqCst)
}

/// Run `fut` inside a collapsible log group titled `title`
///
/// Groups do not nest in the Actions UI, so callers must not interleave them.
pub async fn group<F: Future>(title: &str, fut: F) -> F::Output {
    let enabled = actions_output();
    if enabled {
        anstream::println!("::group::{}", escape_data(title));
    }
    let output = fut.await;
    if enabled {
        anstream::println!("::endgroup::");
    }
    output
}

/// Escape a workflow command's data section
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Formats events as workflow commands
///
/// INFO events print the bare message so plain progress lines stay readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowCommandFormat;

impl WorkflowCommandFormat {
    fn command(level: Level) -> Option<&'static str> {
        match level {
            Level::ERROR => Some("error"),
            Level::WARN => Some("warning"),
            Level::INFO => None,
            _ => Some("debug"),
        }
    }
}

impl<S, N> FormatEvent<S, N> for WorkflowCommandFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.field_format()
            .format_fields(format::Writer::new(&mut message), event)?;

        match Self::command(*event.metadata().level()) {
            Some(command) => writeln!(writer, "::{command}::{}", escape_data(&message)),
            None => writeln!(writer, "{message}"),
        }
    }
}
