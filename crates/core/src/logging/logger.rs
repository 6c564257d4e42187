//! Application logger service.
//!
//! [`Logger`] is the service applications resolve from the container under
//! [`LoggerToken`]. The bundled [`TracingLogger`] forwards every call to the
//! `tracing` facade, so output goes wherever the installed subscriber sends it.

use serde_json::{json, Map, Value};
use std::borrow::Cow;
use std::error::Error;

/// Severity of a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message of a log call: plain text, or an error to report
#[derive(Debug)]
pub enum LogMessage<'a> {
    Text(Cow<'a, str>),
    Error(&'a (dyn Error + 'a)),
}

impl<'a> LogMessage<'a> {
    /// Report an error value
    pub fn error<E: Error + 'a>(error: &'a E) -> Self {
        LogMessage::Error(error)
    }

    /// The human readable message
    pub fn text(&self) -> Cow<'a, str> {
        match self {
            LogMessage::Text(text) => text.clone(),
            LogMessage::Error(error) => Cow::Owned(error.to_string()),
        }
    }
}

impl<'a> From<&'a str> for LogMessage<'a> {
    fn from(text: &'a str) -> Self {
        LogMessage::Text(Cow::Borrowed(text))
    }
}

impl From<String> for LogMessage<'_> {
    fn from(text: String) -> Self {
        LogMessage::Text(Cow::Owned(text))
    }
}

/// Logging service
///
/// Implementors only provide [`Logger::log`]; the level helpers delegate to it.
/// Extra `args` are attached to the entry as structured data.
pub trait Logger: Send + Sync {
    fn log(&self, level: LogLevel, message: LogMessage<'_>, args: &[Value]);

    fn trace(&self, message: &str, args: &[Value]) {
        self.log(LogLevel::Trace, message.into(), args)
    }

    fn debug(&self, message: &str, args: &[Value]) {
        self.log(LogLevel::Debug, message.into(), args)
    }

    fn info(&self, message: &str, args: &[Value]) {
        self.log(LogLevel::Info, message.into(), args)
    }

    fn warn(&self, message: &str, args: &[Value]) {
        self.log(LogLevel::Warn, message.into(), args)
    }

    fn error(&self, message: LogMessage<'_>, args: &[Value]) {
        self.log(LogLevel::Error, message, args)
    }

    fn fatal(&self, message: LogMessage<'_>, args: &[Value]) {
        self.log(LogLevel::Fatal, message, args)
    }
}

crate::service_token! {
    /// Token for the application [`Logger`]
    pub LoggerToken => dyn Logger;
}

/// [`Logger`] backed by the `tracing` facade
///
/// Fatal entries are emitted at `ERROR` with `fatal = true`.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    target: Option<&'static str>,
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag entries with a logical component name
    pub fn with_target(target: &'static str) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Structured data attached to an entry, `None` when there is nothing to attach
    ///
    /// Text messages carry `{"args": [...]}` when args are given. Errors always
    /// carry `{"err": {...}}` and add `args` when given.
    pub fn context(message: &LogMessage<'_>, args: &[Value]) -> Option<Value> {
        let mut context = Map::new();

        if let LogMessage::Error(error) = message {
            context.insert("err".to_string(), error_value(*error));
        }
        if !args.is_empty() {
            context.insert("args".to_string(), Value::Array(args.to_vec()));
        }

        if context.is_empty() {
            None
        } else {
            Some(Value::Object(context))
        }
    }
}

fn error_value(error: &dyn Error) -> Value {
    let mut sources = Vec::new();
    let mut current = error.source();
    while let Some(source) = current {
        sources.push(Value::String(source.to_string()));
        current = source.source();
    }

    let mut value = json!({ "message": error.to_string() });
    if !sources.is_empty() {
        value["sources"] = Value::Array(sources);
    }
    value
}

macro_rules! emit {
    ($macro:ident, $component:expr, $context:expr, $text:expr $(, $field:ident = $value:expr)?) => {
        tracing::$macro!(
            component = $component,
            context = $context,
            $($field = $value,)?
            "{}",
            $text
        )
    };
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: LogMessage<'_>, args: &[Value]) {
        let context = Self::context(&message, args).map(|value| value.to_string());
        let context = context.as_deref();
        let component = self.target;
        let text = message.text();

        match level {
            LogLevel::Trace => emit!(trace, component, context, text),
            LogLevel::Debug => emit!(debug, component, context, text),
            LogLevel::Info => emit!(info, component, context, text),
            LogLevel::Warn => emit!(warn, component, context, text),
            LogLevel::Error => emit!(error, component, context, text),
            LogLevel::Fatal => emit!(error, component, context, text, fatal = true),
        }
    }
}
