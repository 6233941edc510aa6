//! Log sink: stdout for the monitoring scheduler plus the system log.
//!
//! The status line is the only thing written to stdout, so schedulers always
//! read it as the first line. Diagnostics go to stderr and syslog, filtered by
//! `--log-level`. Syslog also receives the status line.

use crate::cli::LogLevel;
use anyhow::Context as _;
use haproxy_state_check::report::VERDICT_TARGET;
use std::ffi::CString;
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::{format, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

/// Syslog identifier, NUL-terminated for openlog(3).
const SYSLOG_IDENT: &[u8] = b"check_haproxy_state\0";

/// Console line format: `[LEVEL] [pid] - message`.
struct ConsoleFormat {
    pid: i32,
}

impl<S, N> FormatEvent<S, N> for ConsoleFormat
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
        write!(writer, "[{}] [{}] - ", event.metadata().level(), self.pid)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Forwards events to syslog(3). The pid is added by `LOG_PID`.
struct SyslogLayer;

impl SyslogLayer {
    fn open() -> Self {
        // SAFETY: the ident is a static NUL-terminated string, so the pointer
        // stays valid for the lifetime of the process as openlog requires.
        unsafe {
            libc::openlog(SYSLOG_IDENT.as_ptr().cast(), libc::LOG_PID, libc::LOG_USER);
        }
        SyslogLayer
    }
}

impl<S: Subscriber> Layer<S> for SyslogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let level = *event.metadata().level();
        let Ok(line) = CString::new(format!("{} - {}", level, visitor.message)) else {
            return;
        };

        // SAFETY: both the format string and the argument are NUL-terminated
        // and live until the call returns.
        unsafe {
            libc::syslog(syslog_priority(level), b"%s\0".as_ptr().cast(), line.as_ptr());
        }
    }
}

/// Collects the `message` field and any extra fields as `name=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.message, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.message, " {}={}", field.name(), value);
        }
    }
}

fn syslog_priority(level: Level) -> libc::c_int {
    match level {
        Level::ERROR => libc::LOG_ERR,
        Level::WARN => libc::LOG_WARNING,
        Level::INFO => libc::LOG_INFO,
        _ => libc::LOG_DEBUG,
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

/// Status line only.
fn verdict_filter() -> Targets {
    Targets::new().with_target(VERDICT_TARGET, LevelFilter::TRACE)
}

/// Diagnostics at the requested level, without the status line.
fn diagnostics_filter(level: LogLevel) -> Targets {
    Targets::new()
        .with_default(level_filter(level))
        .with_target(VERDICT_TARGET, LevelFilter::OFF)
}

/// Diagnostics at the requested level plus the status line.
fn syslog_filter(level: LogLevel) -> Targets {
    Targets::new()
        .with_default(level_filter(level))
        .with_target(VERDICT_TARGET, LevelFilter::TRACE)
}

/// Initializes tracing with the console sinks and, unless disabled, syslog.
pub fn setup_logging(level: LogLevel, syslog: bool) -> anyhow::Result<()> {
    let pid = nix::unistd::getpid().as_raw();

    let verdict = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(std::io::stdout)
        .event_format(ConsoleFormat { pid })
        .with_filter(verdict_filter());

    let diagnostics = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .event_format(ConsoleFormat { pid })
        .with_filter(diagnostics_filter(level));

    let subscriber = tracing_subscriber::registry()
        .with(verdict)
        .with(diagnostics)
        .with(syslog.then(|| SyslogLayer::open().with_filter(syslog_filter(level))));

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    Ok(())
}
