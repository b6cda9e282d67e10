// eglboot/src/attributes.rs
//
//! Typed EGL attribute lists.

use crate::egl;
use crate::egl::types::EGLint;

use bitflags::bitflags;
use euclid::default::Size2D;

bitflags! {
    /// Values of `EGL_SURFACE_TYPE`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SurfaceTypeFlags: EGLint {
        const PBUFFER = 0x0001;
        const PIXMAP  = 0x0002;
        const WINDOW  = 0x0004;
    }
}

bitflags! {
    /// Values of `EGL_RENDERABLE_TYPE`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RenderableTypeFlags: EGLint {
        const OPENGL_ES  = 0x0001;
        const OPENVG     = 0x0002;
        const OPENGL_ES2 = 0x0004;
        const OPENGL     = 0x0008;
        const OPENGL_ES3 = 0x0040;
    }
}

/// The constraints passed to `eglChooseConfig()`.
///
/// Channel and depth sizes are minimums; a value of `EGL_DONT_CARE` leaves the attribute out of
/// the selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfigAttributes {
    pub red_size: EGLint,
    pub green_size: EGLint,
    pub blue_size: EGLint,
    pub depth_size: EGLint,
    pub surface_type: SurfaceTypeFlags,
    pub renderable_type: RenderableTypeFlags,
}

impl Default for ConfigAttributes {
    fn default() -> ConfigAttributes {
        ConfigAttributes {
            red_size: 8,
            green_size: 8,
            blue_size: 8,
            depth_size: 8,
            surface_type: SurfaceTypeFlags::PBUFFER,
            renderable_type: RenderableTypeFlags::OPENGL,
        }
    }
}

impl ConfigAttributes {
    /// Returns the `EGL_NONE`-terminated attribute list.
    pub fn to_egl_attributes(&self) -> Vec<EGLint> {
        vec![
            egl::SURFACE_TYPE as EGLint,    self.surface_type.bits(),
            egl::BLUE_SIZE as EGLint,       self.blue_size,
            egl::GREEN_SIZE as EGLint,      self.green_size,
            egl::RED_SIZE as EGLint,        self.red_size,
            egl::DEPTH_SIZE as EGLint,      self.depth_size,
            egl::RENDERABLE_TYPE as EGLint, self.renderable_type.bits(),
            egl::NONE as EGLint,
        ]
    }
}

/// The attributes passed to `eglCreatePbufferSurface()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PbufferAttributes {
    pub size: Size2D<i32>,
}

impl PbufferAttributes {
    #[inline]
    pub fn new(size: Size2D<i32>) -> PbufferAttributes {
        PbufferAttributes { size }
    }

    pub fn to_egl_attributes(&self) -> Vec<EGLint> {
        vec![
            egl::WIDTH as EGLint,   self.size.width,
            egl::HEIGHT as EGLint,  self.size.height,
            egl::NONE as EGLint,
        ]
    }
}

/// Iterates over the `(name, value)` pairs of an `EGL_NONE`-terminated attribute list.
///
/// Iteration stops at the first `EGL_NONE` or at a trailing name without a value.
pub fn attribute_pairs(list: &[EGLint]) -> impl Iterator<Item = (EGLint, EGLint)> + '_ {
    list.chunks_exact(2)
        .take_while(|pair| pair[0] != egl::NONE as EGLint)
        .map(|pair| (pair[0], pair[1]))
}
