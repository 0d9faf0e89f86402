//! The output collaborator the runners report through.
//!
//! Sinks are line oriented. The core decides *whether* a line is shown
//! (verbosity flags) and on which [`Channel`]; sinks decide how it looks.

use std::cell::RefCell;
use std::rc::Rc;

use crate::assertion::Diagnostic;

/// Where a line of output belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Summaries and banners.
    Normal,
    /// Failures; always shown and usually highlighted.
    Warning,
    /// Passing assertions, only emitted when explicitly enabled.
    Debug,
}

pub trait OutputSink {
    fn emit(&mut self, channel: Channel, text: &str);

    /// Renders a structured assertion diagnostic.
    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.emit(diagnostic.channel(), &diagnostic.to_string());
    }
}

/// A sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&mut self, _channel: Channel, _text: &str) {}
}

impl<S: OutputSink + ?Sized> OutputSink for Rc<RefCell<S>> {
    fn emit(&mut self, channel: Channel, text: &str) {
        self.borrow_mut().emit(channel, text);
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.borrow_mut().diagnostic(diagnostic);
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn emit(&mut self, channel: Channel, text: &str) {
        (**self).emit(channel, text);
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        (**self).diagnostic(diagnostic);
    }
}
