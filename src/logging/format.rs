use chrono::Local;
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{FmtContext, FormatEvent, FormatFields, format::Writer},
    registry::LookupSpan,
};

pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
/// Width logger names are padded to so columns line up.
pub(crate) const NAME_WIDTH: usize = 27;
/// Target reserved for events emitted right before termination.
pub(crate) const FATAL_TARGET: &str = "fatal";

/// Tab-separated console/file line: time, level, scope name, fields.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        write!(writer, "{}\t", Local::now().format(TIMESTAMP_FORMAT))?;

        let fatal = meta.target() == FATAL_TARGET;
        let label = level_label(*meta.level(), fatal);
        if writer.has_ansi_escapes() {
            write!(writer, "\x1b[{}m{label}\x1b[0m\t", level_color(*meta.level(), fatal))?;
        } else {
            write!(writer, "{label}\t")?;
        }

        let name = scope_name(ctx);
        if !name.is_empty() {
            write!(writer, "{name:<NAME_WIDTH$}\t")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn scope_name<S, N>(ctx: &FmtContext<'_, S, N>) -> String
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    let mut name = String::new();
    if let Some(scope) = ctx.event_scope() {
        for span in scope.from_root() {
            if !name.is_empty() {
                name.push('.');
            }
            name.push_str(span.name());
        }
    }
    name
}

fn level_label(level: Level, fatal: bool) -> &'static str {
    if fatal {
        return "FATAL";
    }
    match level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARN",
        Level::ERROR => "ERROR",
    }
}

fn level_color(level: Level, fatal: bool) -> u8 {
    if fatal {
        return 31;
    }
    match level {
        Level::TRACE | Level::DEBUG => 35,
        Level::INFO => 34,
        Level::WARN => 33,
        Level::ERROR => 31,
    }
}
