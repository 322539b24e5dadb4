//! Stage instrumentation for the grayscale, resampling and codec paths.
//!
//! `trace_span!` yields a span that is already entered and stays open until
//! the binding is dropped. `trace_event!` records a stage result. Both log
//! under the `grayplane::stage` target. Builds without the `tracing` feature
//! get a zero-sized placeholder instead of a span, and event fields are only
//! borrowed.

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($stage:literal $(, $($field:tt)*)?) => {
        ::tracing::info_span!(target: "grayplane::stage", $stage $(, $($field)*)?).entered()
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($stage:literal $(, $($field:tt)*)?) => {
        $crate::trace::Silent
    };
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($stage:literal, $($key:ident = $value:expr),+ $(,)?) => {
        ::tracing::info!(target: "grayplane::stage", stage = $stage, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($stage:literal, $($key:ident = $value:expr),+ $(,)?) => {{
        $(let _ = &$value;)+
    }};
}

pub(crate) use {trace_event, trace_span};

/// Held where an entered span would be when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
#[must_use]
pub(crate) struct Silent;
