//! GL debug output adapter.
//!
//! The driver pushes `(source, type, id, severity, message)` through
//! `glDebugMessageCallback`; [`install`] forwards every message to a
//! [`DebugSink`]. Formatting lives in [`format_report`] so it can be used
//! without a context.

use gl::types::*;
use std::ffi::{c_void, CStr};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Message ids the NVIDIA driver emits for benign notifications: 131169
/// (framebuffer storage allocation), 131185 (buffer will use video memory),
/// 131218 (shader recompiled due to state change), 131204 (texture base
/// level not defined).
pub const SUPPRESSED_MESSAGE_IDS: [GLuint; 4] = [131169, 131185, 131218, 131204];

pub fn is_suppressed(id: GLuint) -> bool {
    SUPPRESSED_MESSAGE_IDS.contains(&id)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DebugSource {
    Api,
    WindowSystem,
    ShaderCompiler,
    ThirdParty,
    Application,
    Other,
}

impl DebugSource {
    pub fn from_gl(value: GLenum) -> Option<Self> {
        Some(match value {
            gl::DEBUG_SOURCE_API => DebugSource::Api,
            gl::DEBUG_SOURCE_WINDOW_SYSTEM => DebugSource::WindowSystem,
            gl::DEBUG_SOURCE_SHADER_COMPILER => DebugSource::ShaderCompiler,
            gl::DEBUG_SOURCE_THIRD_PARTY => DebugSource::ThirdParty,
            gl::DEBUG_SOURCE_APPLICATION => DebugSource::Application,
            gl::DEBUG_SOURCE_OTHER => DebugSource::Other,
            _ => return None,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            DebugSource::Api => "API",
            DebugSource::WindowSystem => "Window System",
            DebugSource::ShaderCompiler => "Shader Compiler",
            DebugSource::ThirdParty => "Third Party",
            DebugSource::Application => "Application",
            DebugSource::Other => "Other",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DebugType {
    Error,
    DeprecatedBehavior,
    UndefinedBehavior,
    Portability,
    Performance,
    Marker,
    PushGroup,
    PopGroup,
    Other,
}

impl DebugType {
    pub fn from_gl(value: GLenum) -> Option<Self> {
        Some(match value {
            gl::DEBUG_TYPE_ERROR => DebugType::Error,
            gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => DebugType::DeprecatedBehavior,
            gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => DebugType::UndefinedBehavior,
            gl::DEBUG_TYPE_PORTABILITY => DebugType::Portability,
            gl::DEBUG_TYPE_PERFORMANCE => DebugType::Performance,
            gl::DEBUG_TYPE_MARKER => DebugType::Marker,
            gl::DEBUG_TYPE_PUSH_GROUP => DebugType::PushGroup,
            gl::DEBUG_TYPE_POP_GROUP => DebugType::PopGroup,
            gl::DEBUG_TYPE_OTHER => DebugType::Other,
            _ => return None,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            DebugType::Error => "Error",
            DebugType::DeprecatedBehavior => "Deprecated Behavior",
            DebugType::UndefinedBehavior => "Undefined Behavior",
            DebugType::Portability => "Portability",
            DebugType::Performance => "Performance",
            DebugType::Marker => "Marker",
            DebugType::PushGroup => "Push Group",
            DebugType::PopGroup => "Pop Group",
            DebugType::Other => "Other",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DebugSeverity {
    High,
    Medium,
    Low,
    Notification,
}

impl DebugSeverity {
    pub fn from_gl(value: GLenum) -> Option<Self> {
        Some(match value {
            gl::DEBUG_SEVERITY_HIGH => DebugSeverity::High,
            gl::DEBUG_SEVERITY_MEDIUM => DebugSeverity::Medium,
            gl::DEBUG_SEVERITY_LOW => DebugSeverity::Low,
            gl::DEBUG_SEVERITY_NOTIFICATION => DebugSeverity::Notification,
            _ => return None,
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            DebugSeverity::High => "high",
            DebugSeverity::Medium => "medium",
            DebugSeverity::Low => "low",
            DebugSeverity::Notification => "notification",
        }
    }

    fn log_level(self) -> log::Level {
        match self {
            DebugSeverity::High => log::Level::Error,
            DebugSeverity::Medium => log::Level::Warn,
            DebugSeverity::Low => log::Level::Info,
            DebugSeverity::Notification => log::Level::Debug,
        }
    }
}

/// A single message delivered by the driver. Enum fields are kept raw so
/// values unknown to this module still reach the sink.
#[derive(Debug, Copy, Clone)]
pub struct DebugMessage<'a> {
    pub source: GLenum,
    pub kind: GLenum,
    pub id: GLuint,
    pub severity: GLenum,
    pub text: &'a str,
}

fn label_or_unknown(label: Option<&'static str>, raw: GLenum) -> String {
    match label {
        Some(l) => l.to_string(),
        None => format!("Unknown (0x{raw:04X})"),
    }
}

/// Formats the four-line report, or `None` for a suppressed id.
pub fn format_report(msg: &DebugMessage<'_>) -> Option<String> {
    if is_suppressed(msg.id) {
        return None;
    }

    let source = label_or_unknown(
        DebugSource::from_gl(msg.source).map(DebugSource::label),
        msg.source,
    );
    let kind = label_or_unknown(DebugType::from_gl(msg.kind).map(DebugType::label), msg.kind);
    let severity = label_or_unknown(
        DebugSeverity::from_gl(msg.severity).map(DebugSeverity::label),
        msg.severity,
    );

    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(out, "Debug message ({})", msg.text);
    let _ = writeln!(out, "Source: {source}");
    let _ = writeln!(out, "Type: {kind}");
    let _ = writeln!(out, "Severity: {severity}");
    Some(out)
}

/// Receiver of driver debug messages.
pub trait DebugSink {
    fn message(&mut self, msg: &DebugMessage<'_>);
}

impl<F> DebugSink for F
where
    F: FnMut(&DebugMessage<'_>),
{
    fn message(&mut self, msg: &DebugMessage<'_>) {
        self(msg)
    }
}

/// Writes [`format_report`] output to any stream.
pub struct ReportWriter<W: Write> {
    out: W,
}

impl ReportWriter<io::Stdout> {
    pub fn stdout() -> Self {
        ReportWriter { out: io::stdout() }
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        ReportWriter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DebugSink for ReportWriter<W> {
    fn message(&mut self, msg: &DebugMessage<'_>) {
        let Some(report) = format_report(msg) else {
            return;
        };
        if let Err(e) = self.out.write_all(report.as_bytes()).and_then(|_| self.out.flush()) {
            log::warn!("could not write GL debug report: {e}");
        }
    }
}

/// Forwards reports to the `log` facade, leveled by message severity.
#[derive(Default)]
pub struct LogSink;

impl LogSink {
    /// Level and trimmed report for `msg`, or `None` for a suppressed id.
    /// Unknown severities are logged as warnings.
    pub fn record(msg: &DebugMessage<'_>) -> Option<(log::Level, String)> {
        let report = format_report(msg)?;
        let level = DebugSeverity::from_gl(msg.severity)
            .map(DebugSeverity::log_level)
            .unwrap_or(log::Level::Warn);
        Some((level, report.trim_end().to_string()))
    }
}

impl DebugSink for LogSink {
    fn message(&mut self, msg: &DebugMessage<'_>) {
        if let Some((level, report)) = Self::record(msg) {
            log::log!(target: "gl_debug", level, "{report}");
        }
    }
}

extern "system" fn debug_callback(
    source: GLenum,
    gltype: GLenum,
    id: GLuint,
    severity: GLenum,
    length: GLsizei,
    message: *const GLchar,
    user_param: *mut c_void,
) {
    if user_param.is_null() || message.is_null() {
        return;
    }

    let text = unsafe {
        if length >= 0 {
            let bytes = std::slice::from_raw_parts(message.cast::<u8>(), length as usize);
            String::from_utf8_lossy(bytes)
        } else {
            CStr::from_ptr(message).to_string_lossy()
        }
    };

    // user_param is the leaked sink handed over by `install`
    let sink = unsafe { &mut *user_param.cast::<Box<dyn DebugSink>>() };
    sink.message(&DebugMessage {
        source,
        kind: gltype,
        id,
        severity,
        text: &text,
    });
}

/// Enables synchronous debug output and routes it to `sink`.
///
/// The sink is leaked: the callback stays registered until the process
/// exits. Requires a current context created with the debug flag.
pub fn install(sink: Box<dyn DebugSink>) {
    let user_param: *mut Box<dyn DebugSink> = Box::into_raw(Box::new(sink));
    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(debug_callback), user_param as *const c_void);
        gl::DebugMessageControl(
            gl::DONT_CARE,
            gl::DONT_CARE,
            gl::DONT_CARE,
            0,
            std::ptr::null(),
            gl::TRUE,
        );
    }
    log::debug!("GL debug output enabled");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: GLuint) -> DebugMessage<'static> {
        DebugMessage {
            source: gl::DEBUG_SOURCE_API,
            kind: gl::DEBUG_TYPE_ERROR,
            id,
            severity: gl::DEBUG_SEVERITY_HIGH,
            text: "GL_INVALID_ENUM in glEnable(cap)",
        }
    }

    fn report_lines(msg: &DebugMessage<'_>) -> Vec<String> {
        let mut writer = ReportWriter::new(Vec::new());
        writer.message(msg);
        String::from_utf8(writer.into_inner())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn suppressed_ids_produce_no_output() {
        for id in [131169, 131185, 131218, 131204] {
            assert!(format_report(&message(id)).is_none());
            assert!(report_lines(&message(id)).is_empty());
        }
    }

    #[test]
    fn other_ids_produce_text_and_three_classification_lines() {
        for id in [0, 1, 1280, 131184, 131205] {
            let lines = report_lines(&message(id));
            assert_eq!(
                lines,
                [
                    "Debug message (GL_INVALID_ENUM in glEnable(cap))",
                    "Source: API",
                    "Type: Error",
                    "Severity: high",
                ]
            );
        }
    }

    #[test]
    fn every_source_has_its_label() {
        let cases = [
            (gl::DEBUG_SOURCE_API, "API"),
            (gl::DEBUG_SOURCE_WINDOW_SYSTEM, "Window System"),
            (gl::DEBUG_SOURCE_SHADER_COMPILER, "Shader Compiler"),
            (gl::DEBUG_SOURCE_THIRD_PARTY, "Third Party"),
            (gl::DEBUG_SOURCE_APPLICATION, "Application"),
            (gl::DEBUG_SOURCE_OTHER, "Other"),
        ];
        for (source, label) in cases {
            let lines = report_lines(&DebugMessage { source, ..message(7) });
            assert_eq!(lines[1], format!("Source: {label}"));
        }
    }

    #[test]
    fn every_type_has_its_label() {
        let cases = [
            (gl::DEBUG_TYPE_ERROR, "Error"),
            (gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR, "Deprecated Behavior"),
            (gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR, "Undefined Behavior"),
            (gl::DEBUG_TYPE_PORTABILITY, "Portability"),
            (gl::DEBUG_TYPE_PERFORMANCE, "Performance"),
            (gl::DEBUG_TYPE_MARKER, "Marker"),
            (gl::DEBUG_TYPE_PUSH_GROUP, "Push Group"),
            (gl::DEBUG_TYPE_POP_GROUP, "Pop Group"),
            (gl::DEBUG_TYPE_OTHER, "Other"),
        ];
        for (kind, label) in cases {
            let lines = report_lines(&DebugMessage { kind, ..message(7) });
            assert_eq!(lines[2], format!("Type: {label}"));
        }
    }

    #[test]
    fn every_severity_has_its_label() {
        let cases = [
            (gl::DEBUG_SEVERITY_HIGH, "high"),
            (gl::DEBUG_SEVERITY_MEDIUM, "medium"),
            (gl::DEBUG_SEVERITY_LOW, "low"),
            (gl::DEBUG_SEVERITY_NOTIFICATION, "notification"),
        ];
        for (severity, label) in cases {
            let lines = report_lines(&DebugMessage { severity, ..message(7) });
            assert_eq!(lines[3], format!("Severity: {label}"));
        }
    }

    #[test]
    fn unknown_values_fall_back_to_hex_label() {
        let msg = DebugMessage {
            source: 0x1234,
            kind: 0xBEEF,
            severity: 0,
            ..message(7)
        };
        let lines = report_lines(&msg);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "Source: Unknown (0x1234)");
        assert_eq!(lines[2], "Type: Unknown (0xBEEF)");
        assert_eq!(lines[3], "Severity: Unknown (0x0000)");
    }

    #[test]
    fn log_sink_levels_follow_severity() {
        let cases = [
            (gl::DEBUG_SEVERITY_HIGH, log::Level::Error),
            (gl::DEBUG_SEVERITY_MEDIUM, log::Level::Warn),
            (gl::DEBUG_SEVERITY_LOW, log::Level::Info),
            (gl::DEBUG_SEVERITY_NOTIFICATION, log::Level::Debug),
            (0x9999, log::Level::Warn),
        ];
        for (severity, level) in cases {
            let (got, _) = LogSink::record(&DebugMessage { severity, ..message(7) }).unwrap();
            assert_eq!(got, level, "severity {severity:#x}");
        }
    }

    #[test]
    fn log_sink_drops_suppressed_ids_and_trims_report() {
        for id in SUPPRESSED_MESSAGE_IDS {
            assert!(LogSink::record(&message(id)).is_none());
        }

        let (_, report) = LogSink::record(&message(7)).unwrap();
        assert!(!report.ends_with('\n'));
        assert_eq!(
            report.lines().collect::<Vec<_>>(),
            [
                "Debug message (GL_INVALID_ENUM in glEnable(cap))",
                "Source: API",
                "Type: Error",
                "Severity: high",
            ]
        );
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |m: &DebugMessage<'_>| seen.push(m.id);
            sink.message(&message(42));
            sink.message(&message(131169));
        }
        // filtering is the formatter's job, closures see everything
        assert_eq!(seen, [42, 131169]);
    }

    #[test]
    fn callback_forwards_to_installed_sink() {
        use std::sync::{Arc, Mutex};

        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = seen.clone();
        let sink: Box<dyn DebugSink> = Box::new(move |m: &DebugMessage<'_>| {
            captured.lock().unwrap().push((m.id, m.text.to_string()));
        });
        let user_param = Box::into_raw(Box::new(sink));

        let text = b"buffer detailed info\0";
        debug_callback(
            gl::DEBUG_SOURCE_API,
            gl::DEBUG_TYPE_OTHER,
            5,
            gl::DEBUG_SEVERITY_LOW,
            -1,
            text.as_ptr().cast(),
            user_param.cast(),
        );
        debug_callback(
            gl::DEBUG_SOURCE_API,
            gl::DEBUG_TYPE_OTHER,
            6,
            gl::DEBUG_SEVERITY_LOW,
            6,
            text.as_ptr().cast(),
            user_param.cast(),
        );

        drop(unsafe { Box::from_raw(user_param) });
        assert_eq!(
            *seen.lock().unwrap(),
            [(5, "buffer detailed info".to_string()), (6, "buffer".to_string())]
        );
    }
}
