// eglboot/src/platform/soft/config.rs
//
//! The framebuffer configurations offered by the software driver.

use crate::attributes::{attribute_pairs, RenderableTypeFlags, SurfaceTypeFlags};
use crate::egl;
use crate::egl::types::{EGLenum, EGLint};
use crate::WindowingApiError;

const MAX_PBUFFER_SIZE: EGLint = 4096;

/// One framebuffer configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoftConfig {
    pub config_id: EGLint,
    pub red_size: EGLint,
    pub green_size: EGLint,
    pub blue_size: EGLint,
    pub alpha_size: EGLint,
    pub depth_size: EGLint,
    pub stencil_size: EGLint,
    pub surface_type: SurfaceTypeFlags,
    pub renderable_type: RenderableTypeFlags,
    pub max_pbuffer_width: EGLint,
    pub max_pbuffer_height: EGLint,
}

#[derive(Clone, Copy)]
enum Criterion {
    AtLeast,
    Mask,
    Exact,
}

impl SoftConfig {
    /// The configs a fresh `SoftDriver` offers, in the order `eglChooseConfig()` returns them.
    pub fn defaults() -> Vec<SoftConfig> {
        let gl_and_es = RenderableTypeFlags::OPENGL
            | RenderableTypeFlags::OPENGL_ES2
            | RenderableTypeFlags::OPENGL_ES3;
        vec![
            SoftConfig {
                config_id: 1,
                red_size: 8,
                green_size: 8,
                blue_size: 8,
                alpha_size: 8,
                depth_size: 24,
                stencil_size: 8,
                surface_type: SurfaceTypeFlags::PBUFFER | SurfaceTypeFlags::WINDOW,
                renderable_type: gl_and_es,
                max_pbuffer_width: MAX_PBUFFER_SIZE,
                max_pbuffer_height: MAX_PBUFFER_SIZE,
            },
            SoftConfig {
                config_id: 2,
                red_size: 8,
                green_size: 8,
                blue_size: 8,
                alpha_size: 0,
                depth_size: 16,
                stencil_size: 0,
                surface_type: SurfaceTypeFlags::all(),
                renderable_type: gl_and_es | RenderableTypeFlags::OPENGL_ES,
                max_pbuffer_width: MAX_PBUFFER_SIZE,
                max_pbuffer_height: MAX_PBUFFER_SIZE,
            },
            SoftConfig {
                config_id: 3,
                red_size: 5,
                green_size: 6,
                blue_size: 5,
                alpha_size: 0,
                depth_size: 16,
                stencil_size: 0,
                surface_type: SurfaceTypeFlags::WINDOW,
                renderable_type: RenderableTypeFlags::OPENGL_ES2,
                max_pbuffer_width: 0,
                max_pbuffer_height: 0,
            },
            SoftConfig {
                config_id: 4,
                red_size: 8,
                green_size: 8,
                blue_size: 8,
                alpha_size: 8,
                depth_size: 0,
                stencil_size: 0,
                surface_type: SurfaceTypeFlags::PBUFFER,
                renderable_type: RenderableTypeFlags::OPENGL_ES2 | RenderableTypeFlags::OPENGL_ES3,
                max_pbuffer_width: 2048,
                max_pbuffer_height: 2048,
            },
        ]
    }

    /// The value of `attribute`, as `eglGetConfigAttrib()` reports it.
    pub fn attrib(&self, attribute: EGLint) -> Option<EGLint> {
        let value = match attribute as EGLenum {
            egl::CONFIG_ID => self.config_id,
            egl::RED_SIZE => self.red_size,
            egl::GREEN_SIZE => self.green_size,
            egl::BLUE_SIZE => self.blue_size,
            egl::ALPHA_SIZE => self.alpha_size,
            egl::DEPTH_SIZE => self.depth_size,
            egl::STENCIL_SIZE => self.stencil_size,
            egl::BUFFER_SIZE => self.red_size + self.green_size + self.blue_size + self.alpha_size,
            egl::SURFACE_TYPE => self.surface_type.bits(),
            egl::RENDERABLE_TYPE => self.renderable_type.bits(),
            egl::CONFORMANT => self.renderable_type.bits(),
            egl::CONFIG_CAVEAT => egl::NONE as EGLint,
            egl::COLOR_BUFFER_TYPE => egl::RGB_BUFFER as EGLint,
            egl::MAX_PBUFFER_WIDTH => self.max_pbuffer_width,
            egl::MAX_PBUFFER_HEIGHT => self.max_pbuffer_height,
            egl::MAX_PBUFFER_PIXELS => {
                self.max_pbuffer_width.saturating_mul(self.max_pbuffer_height)
            }
            _ => return None,
        };
        Some(value)
    }

    /// Whether this config satisfies an `EGL_NONE`-terminated `eglChooseConfig()` list.
    ///
    /// Unspecified attributes take their EGL defaults: `EGL_SURFACE_TYPE` is `EGL_WINDOW_BIT` and
    /// `EGL_RENDERABLE_TYPE` is `EGL_OPENGL_ES_BIT`. If `EGL_CONFIG_ID` is given, every other
    /// attribute is ignored.
    pub(crate) fn matches(&self, attributes: &[EGLint]) -> Result<bool, WindowingApiError> {
        let mut surface_type = SurfaceTypeFlags::WINDOW.bits();
        let mut renderable_type = RenderableTypeFlags::OPENGL_ES.bits();
        let mut matches = true;

        for (name, value) in attribute_pairs(attributes) {
            let criterion = criterion(name).ok_or(WindowingApiError::BadAttribute)?;
            match name as EGLenum {
                egl::CONFIG_ID if value != egl::DONT_CARE => return Ok(self.config_id == value),
                egl::SURFACE_TYPE => surface_type = value,
                egl::RENDERABLE_TYPE => renderable_type = value,
                _ => matches &= self.satisfies(name, value, criterion),
            }
        }

        matches &= self.satisfies(egl::SURFACE_TYPE as EGLint, surface_type, Criterion::Mask);
        matches &= self.satisfies(egl::RENDERABLE_TYPE as EGLint, renderable_type, Criterion::Mask);
        Ok(matches)
    }

    fn satisfies(&self, name: EGLint, value: EGLint, criterion: Criterion) -> bool {
        if value == egl::DONT_CARE {
            return true;
        }
        let actual = match self.attrib(name) {
            Some(actual) => actual,
            None => return false,
        };
        match criterion {
            Criterion::AtLeast => actual >= value,
            Criterion::Mask => actual & value == value,
            Criterion::Exact => actual == value,
        }
    }
}

fn criterion(name: EGLint) -> Option<Criterion> {
    match name as EGLenum {
        egl::RED_SIZE
        | egl::GREEN_SIZE
        | egl::BLUE_SIZE
        | egl::ALPHA_SIZE
        | egl::DEPTH_SIZE
        | egl::STENCIL_SIZE
        | egl::BUFFER_SIZE => Some(Criterion::AtLeast),
        egl::SURFACE_TYPE | egl::RENDERABLE_TYPE | egl::CONFORMANT => Some(Criterion::Mask),
        egl::CONFIG_ID | egl::CONFIG_CAVEAT | egl::COLOR_BUFFER_TYPE => Some(Criterion::Exact),
        _ => None,
    }
}
