// eglboot/src/platform/egl/mod.rs
//
//! A driver backed by the system EGL library.

mod device;
pub use self::device::SystemEgl;
