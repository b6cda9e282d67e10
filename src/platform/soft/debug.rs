// eglboot/src/platform/soft/debug.rs
//
//! `EGL_KHR_debug`-style message reporting for the software driver.

use crate::egl::types::EGLint;

use bitflags::bitflags;
use std::fmt::{self, Debug, Formatter};

/// The severity of a debug message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugMessageKind {
    Critical,
    Error,
    Warning,
    Info,
}

bitflags! {
    /// The message kinds that reach the debug callback.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DebugMessageKinds: u8 {
        const CRITICAL = 0x01;
        const ERROR    = 0x02;
        const WARNING  = 0x04;
        const INFO     = 0x08;
    }
}

impl Default for DebugMessageKinds {
    fn default() -> DebugMessageKinds {
        DebugMessageKinds::CRITICAL | DebugMessageKinds::ERROR | DebugMessageKinds::WARNING
    }
}

impl DebugMessageKind {
    fn flag(self) -> DebugMessageKinds {
        match self {
            DebugMessageKind::Critical => DebugMessageKinds::CRITICAL,
            DebugMessageKind::Error => DebugMessageKinds::ERROR,
            DebugMessageKind::Warning => DebugMessageKinds::WARNING,
            DebugMessageKind::Info => DebugMessageKinds::INFO,
        }
    }
}

/// A message posted by a driver entry point.
#[derive(Clone, Debug, PartialEq)]
pub struct DebugMessage {
    /// The `eglGetError()` code the command left behind.
    pub error: EGLint,
    /// The EGL command that posted the message, e.g. `eglCreateContext`.
    pub command: &'static str,
    pub kind: DebugMessageKind,
    pub message: String,
}

pub type DebugCallback = Box<dyn FnMut(&DebugMessage)>;

pub(crate) struct DebugState {
    callback: Option<DebugCallback>,
    enabled: DebugMessageKinds,
}

impl Debug for DebugState {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.debug_struct("DebugState")
            .field("callback", &self.callback.is_some())
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl DebugState {
    pub(crate) fn new() -> DebugState {
        DebugState { callback: None, enabled: DebugMessageKinds::default() }
    }

    pub(crate) fn set_callback(&mut self, callback: Option<DebugCallback>) {
        self.callback = callback;
    }

    pub(crate) fn set_enabled(&mut self, enabled: DebugMessageKinds) {
        self.enabled = enabled;
    }

    pub(crate) fn post(
        &mut self,
        error: EGLint,
        command: &'static str,
        kind: DebugMessageKind,
        message: String,
    ) {
        log::trace!("{}: {:?}: {}", command, kind, message);
        if !self.enabled.contains(kind.flag()) {
            return;
        }
        if let Some(ref mut callback) = self.callback {
            callback(&DebugMessage { error, command, kind, message });
        }
    }
}
