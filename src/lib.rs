// eglboot/src/lib.rs
//
//! Headless EGL bootstrapping.
//!
//! This crate walks the standard EGL initialization recipe: it obtains the default display,
//! chooses a pbuffer-capable configuration, creates a small off-screen surface, binds the desktop
//! OpenGL API, creates a context, makes it current, and terminates the display again. No
//! rendering is performed.
//!
//! The EGL implementation is passed in explicitly as a [`Driver`]. [`SystemEgl`] loads the
//! platform `libEGL` at runtime; [`SoftDriver`] is an in-process software implementation that
//! follows the EGL validation rules and is what the unit tests run against.

pub mod attributes;
pub use crate::attributes::{ConfigAttributes, PbufferAttributes};
pub use crate::attributes::{RenderableTypeFlags, SurfaceTypeFlags};

pub mod bootstrap;
pub use crate::bootstrap::{run, Outcome};

mod config;
pub use crate::config::{BootstrapConfig, CheckMode};

pub mod driver;
pub use crate::driver::{Driver, InitializedDisplay};

pub mod error;
pub use crate::error::{Error, WindowingApiError};

mod info;
pub use crate::info::{ClientApi, EGLVersion};

pub mod platform;
#[cfg(system_egl)]
pub use crate::platform::egl::SystemEgl;
pub use crate::platform::soft::{DebugMessage, DebugMessageKind, DebugMessageKinds};
pub use crate::platform::soft::{SoftConfig, SoftDriver};

#[allow(non_camel_case_types)]
#[allow(dead_code)]
pub mod egl {
    //! EGL 1.5 bindings generated by `gl_generator`.

    use std::os::raw::{c_long, c_void};
    pub type khronos_utime_nanoseconds_t = khronos_uint64_t;
    pub type khronos_uint64_t = u64;
    pub type khronos_ssize_t = c_long;
    pub type EGLint = i32;
    pub type EGLNativeDisplayType = *const c_void;
    pub type EGLNativePixmapType = *const c_void;
    pub type EGLNativeWindowType = *const c_void;
    pub type NativeDisplayType = EGLNativeDisplayType;
    pub type NativePixmapType = EGLNativePixmapType;
    pub type NativeWindowType = EGLNativeWindowType;
    include!(concat!(env!("OUT_DIR"), "/egl_bindings.rs"));
}

#[cfg(test)]
mod tests;
