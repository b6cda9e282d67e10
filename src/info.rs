// eglboot/src/info.rs
//
//! EGL and client API information.

use crate::attributes::RenderableTypeFlags;
use crate::egl;
use crate::egl::types::{EGLenum, EGLint};

use std::fmt::{self, Display, Formatter};

/// The client API that contexts are created for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientApi {
    /// Desktop OpenGL.
    GL,
    /// OpenGL ES.
    GLES,
    /// OpenVG.
    VG,
}

impl ClientApi {
    /// The value passed to `eglBindAPI()`.
    #[inline]
    pub fn to_egl_api(self) -> EGLenum {
        match self {
            ClientApi::GL => egl::OPENGL_API,
            ClientApi::GLES => egl::OPENGL_ES_API,
            ClientApi::VG => egl::OPENVG_API,
        }
    }

    pub fn from_egl_api(api: EGLenum) -> Option<ClientApi> {
        match api {
            egl::OPENGL_API => Some(ClientApi::GL),
            egl::OPENGL_ES_API => Some(ClientApi::GLES),
            egl::OPENVG_API => Some(ClientApi::VG),
            _ => None,
        }
    }

    /// The `EGL_RENDERABLE_TYPE` bits a config needs for a context of this API.
    pub fn renderable_type(self) -> RenderableTypeFlags {
        match self {
            ClientApi::GL => RenderableTypeFlags::OPENGL,
            ClientApi::GLES => {
                RenderableTypeFlags::OPENGL_ES
                    | RenderableTypeFlags::OPENGL_ES2
                    | RenderableTypeFlags::OPENGL_ES3
            }
            ClientApi::VG => RenderableTypeFlags::OPENVG,
        }
    }
}

/// The version of EGL reported by `eglInitialize()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EGLVersion {
    pub major: EGLint,
    pub minor: EGLint,
}

impl EGLVersion {
    #[inline]
    pub fn new(major: EGLint, minor: EGLint) -> EGLVersion {
        EGLVersion { major, minor }
    }
}

impl Display for EGLVersion {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
