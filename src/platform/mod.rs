//! Driver backends.

#[cfg(system_egl)]
pub mod egl;

pub mod soft;
