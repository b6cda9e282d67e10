// eglboot/src/platform/egl/device.rs
//
//! Loading `libEGL` and forwarding driver calls to it.

use crate::driver::Driver;
use crate::egl::types::{EGLConfig, EGLContext, EGLDisplay, EGLSurface, EGLint};
use crate::egl::{self, Egl};
use crate::error::ToWindowingApiError;
use crate::info::{ClientApi, EGLVersion};
use crate::{Error, WindowingApiError};

use libc::{dlopen, dlsym, RTLD_LAZY, RTLD_LOCAL};
use std::ffi::CString;
use std::fmt::{self, Debug, Formatter};
use std::os::raw::{c_char, c_void};
use std::ptr;

static EGL_LIBRARY_NAMES: [&[u8]; 2] = [b"libEGL.so.1\0", b"libEGL.so\0"];

/// The platform EGL implementation, loaded at runtime.
///
/// The library stays loaded for the rest of the process once opened.
pub struct SystemEgl {
    egl: Egl,
}

impl Debug for SystemEgl {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "SystemEgl")
    }
}

impl SystemEgl {
    /// Opens the system `libEGL` and resolves its entry points.
    pub fn open() -> Result<SystemEgl, Error> {
        let library = EGL_LIBRARY_NAMES
            .iter()
            .map(|name| unsafe { dlopen(name.as_ptr() as *const c_char, RTLD_LAZY | RTLD_LOCAL) })
            .find(|library| !library.is_null())
            .ok_or(Error::NoGLLibraryFound)?;

        let egl = Egl::load_with(|symbol_name| get_proc_address(library, symbol_name));
        let required = [
            &egl.GetDisplay,
            &egl.Initialize,
            &egl.ChooseConfig,
            &egl.GetConfigAttrib,
            &egl.CreatePbufferSurface,
            &egl.BindAPI,
            &egl.CreateContext,
            &egl.MakeCurrent,
            &egl.Terminate,
            &egl.GetError,
        ];
        if !required.iter().all(|function| function.is_loaded()) {
            return Err(Error::GLFunctionNotFound);
        }

        log::debug!("loaded system libEGL");
        Ok(SystemEgl { egl })
    }

    fn last_error(&self) -> WindowingApiError {
        unsafe { self.egl.GetError().to_windowing_api_error() }
    }
}

impl Driver for SystemEgl {
    fn default_display(&mut self) -> Option<EGLDisplay> {
        unsafe {
            let egl_display = self.egl.GetDisplay(egl::DEFAULT_DISPLAY);
            if egl_display == egl::NO_DISPLAY {
                None
            } else {
                Some(egl_display)
            }
        }
    }

    fn initialize(&mut self, egl_display: EGLDisplay) -> Result<EGLVersion, WindowingApiError> {
        unsafe {
            let (mut major, mut minor) = (0, 0);
            if self.egl.Initialize(egl_display, &mut major, &mut minor) == egl::FALSE {
                return Err(self.last_error());
            }
            Ok(EGLVersion::new(major, minor))
        }
    }

    fn choose_config(
        &mut self,
        egl_display: EGLDisplay,
        attributes: &[EGLint],
    ) -> Result<Option<EGLConfig>, WindowingApiError> {
        unsafe {
            let (mut egl_config, mut config_count) = (ptr::null(), 0);
            let result = self.egl.ChooseConfig(egl_display,
                                               attribute_ptr(attributes),
                                               &mut egl_config,
                                               1,
                                               &mut config_count);
            if result == egl::FALSE {
                return Err(self.last_error());
            }
            if config_count == 0 {
                return Ok(None);
            }
            Ok(Some(egl_config))
        }
    }

    fn config_attrib(
        &mut self,
        egl_display: EGLDisplay,
        egl_config: EGLConfig,
        attribute: EGLint,
    ) -> Result<EGLint, WindowingApiError> {
        unsafe {
            let mut value = 0;
            let result = self.egl.GetConfigAttrib(egl_display, egl_config, attribute, &mut value);
            if result == egl::FALSE {
                return Err(self.last_error());
            }
            Ok(value)
        }
    }

    fn create_pbuffer_surface(
        &mut self,
        egl_display: EGLDisplay,
        egl_config: EGLConfig,
        attributes: &[EGLint],
    ) -> Result<EGLSurface, WindowingApiError> {
        unsafe {
            let egl_surface =
                self.egl.CreatePbufferSurface(egl_display, egl_config, attribute_ptr(attributes));
            if egl_surface == egl::NO_SURFACE {
                return Err(self.last_error());
            }
            Ok(egl_surface)
        }
    }

    fn bind_api(&mut self, api: ClientApi) -> Result<(), WindowingApiError> {
        unsafe {
            if self.egl.BindAPI(api.to_egl_api()) == egl::FALSE {
                return Err(self.last_error());
            }
            Ok(())
        }
    }

    fn create_context(
        &mut self,
        egl_display: EGLDisplay,
        egl_config: EGLConfig,
        share_context: EGLContext,
        attributes: &[EGLint],
    ) -> Result<EGLContext, WindowingApiError> {
        unsafe {
            let egl_context = self.egl.CreateContext(egl_display,
                                                     egl_config,
                                                     share_context,
                                                     attribute_ptr(attributes));
            if egl_context == egl::NO_CONTEXT {
                return Err(self.last_error());
            }
            Ok(egl_context)
        }
    }

    fn make_current(
        &mut self,
        egl_display: EGLDisplay,
        draw: EGLSurface,
        read: EGLSurface,
        egl_context: EGLContext,
    ) -> Result<(), WindowingApiError> {
        unsafe {
            if self.egl.MakeCurrent(egl_display, draw, read, egl_context) == egl::FALSE {
                return Err(self.last_error());
            }
            Ok(())
        }
    }

    fn terminate(&mut self, egl_display: EGLDisplay) -> Result<(), WindowingApiError> {
        unsafe {
            if self.egl.Terminate(egl_display) == egl::FALSE {
                return Err(self.last_error());
            }
            Ok(())
        }
    }
}

fn attribute_ptr(attributes: &[EGLint]) -> *const EGLint {
    if attributes.is_empty() {
        ptr::null()
    } else {
        attributes.as_ptr()
    }
}

fn get_proc_address(library: *mut c_void, symbol_name: &str) -> *const c_void {
    let symbol_name = match CString::new(symbol_name) {
        Ok(symbol_name) => symbol_name,
        Err(_) => return ptr::null(),
    };
    unsafe { dlsym(library, symbol_name.as_ptr()) as *const c_void }
}
