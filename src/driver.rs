// eglboot/src/driver.rs
//
//! The EGL implementation the bootstrap talks to.

use crate::egl;
use crate::egl::types::{EGLConfig, EGLContext, EGLDisplay, EGLSurface, EGLint};
use crate::info::{ClientApi, EGLVersion};
use crate::WindowingApiError;

/// The subset of EGL that the bootstrap sequence needs.
///
/// Every method corresponds to one EGL entry point. Failures carry the error that
/// `eglGetError()` reported for the call. Attribute lists are `EGL_NONE`-terminated; an empty
/// list is passed to EGL as a null pointer.
pub trait Driver {
    /// `eglGetDisplay(EGL_DEFAULT_DISPLAY)`. Returns `None` for `EGL_NO_DISPLAY`.
    fn default_display(&mut self) -> Option<EGLDisplay>;

    /// `eglInitialize()`.
    fn initialize(&mut self, display: EGLDisplay) -> Result<EGLVersion, WindowingApiError>;

    /// `eglChooseConfig()`, asking for at most one config. Returns `None` if nothing matched.
    fn choose_config(
        &mut self,
        display: EGLDisplay,
        attributes: &[EGLint],
    ) -> Result<Option<EGLConfig>, WindowingApiError>;

    /// `eglGetConfigAttrib()`.
    fn config_attrib(
        &mut self,
        display: EGLDisplay,
        config: EGLConfig,
        attribute: EGLint,
    ) -> Result<EGLint, WindowingApiError>;

    /// `eglCreatePbufferSurface()`.
    fn create_pbuffer_surface(
        &mut self,
        display: EGLDisplay,
        config: EGLConfig,
        attributes: &[EGLint],
    ) -> Result<EGLSurface, WindowingApiError>;

    /// `eglBindAPI()`.
    fn bind_api(&mut self, api: ClientApi) -> Result<(), WindowingApiError>;

    /// `eglCreateContext()`.
    fn create_context(
        &mut self,
        display: EGLDisplay,
        config: EGLConfig,
        share_context: EGLContext,
        attributes: &[EGLint],
    ) -> Result<EGLContext, WindowingApiError>;

    /// `eglMakeCurrent()`.
    fn make_current(
        &mut self,
        display: EGLDisplay,
        draw: EGLSurface,
        read: EGLSurface,
        context: EGLContext,
    ) -> Result<(), WindowingApiError>;

    /// `eglTerminate()`.
    fn terminate(&mut self, display: EGLDisplay) -> Result<(), WindowingApiError>;
}

/// A display that has been handed to `eglInitialize()` and must be terminated.
///
/// Dropping the guard terminates the display unless [`InitializedDisplay::terminate`] was called.
pub struct InitializedDisplay<'a, D>
where
    D: Driver + ?Sized,
{
    driver: &'a mut D,
    egl_display: EGLDisplay,
}

impl<'a, D> InitializedDisplay<'a, D>
where
    D: Driver + ?Sized,
{
    /// Takes ownership of `display`'s termination.
    #[inline]
    pub fn new(driver: &'a mut D, egl_display: EGLDisplay) -> InitializedDisplay<'a, D> {
        InitializedDisplay { driver, egl_display }
    }

    #[inline]
    pub fn egl_display(&self) -> EGLDisplay {
        debug_assert!(!self.is_terminated());
        self.egl_display
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.egl_display == egl::NO_DISPLAY
    }

    /// The driver, for calls made against this display.
    #[inline]
    pub fn driver(&mut self) -> &mut D {
        &mut *self.driver
    }

    /// Terminates the display now, reporting the result.
    pub fn terminate(mut self) -> Result<(), WindowingApiError> {
        self.terminate_now()
    }

    fn terminate_now(&mut self) -> Result<(), WindowingApiError> {
        assert!(!self.is_terminated());
        let egl_display = self.egl_display;
        self.egl_display = egl::NO_DISPLAY;
        self.driver.terminate(egl_display)
    }
}

impl<'a, D> Drop for InitializedDisplay<'a, D>
where
    D: Driver + ?Sized,
{
    fn drop(&mut self) {
        if !self.is_terminated() {
            if let Err(err) = self.terminate_now() {
                log::warn!("eglTerminate failed during cleanup: {:?}", err);
            }
        }
    }
}
