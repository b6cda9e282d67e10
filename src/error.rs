// eglboot/src/error.rs
//
//! Various errors that methods can produce.

use crate::egl;
use crate::egl::types::{EGLenum, EGLint};

use std::fmt::{self, Display, Formatter};
use std::io;

/// Various errors that methods can produce.
#[derive(Debug)]
pub enum Error {
    /// The display connection could not be initialized.
    InitializationFailed(WindowingApiError),
    /// Choosing an EGL configuration failed.
    PixelFormatSelectionFailed(WindowingApiError),
    /// No EGL configuration matched the requested attributes.
    NoPixelFormatFound,
    /// The system couldn't create the pbuffer surface.
    SurfaceCreationFailed(WindowingApiError),
    /// The requested client API couldn't be bound.
    ApiBindingFailed(WindowingApiError),
    /// The system couldn't create a rendering context.
    ContextCreationFailed(WindowingApiError),
    /// The system couldn't make the context current.
    MakeCurrentFailed(WindowingApiError),
    /// The display connection couldn't be terminated.
    TerminationFailed(WindowingApiError),
    /// The system EGL library couldn't be located.
    NoGLLibraryFound,
    /// Looking up an EGL function address failed.
    GLFunctionNotFound,
    /// Writing the diagnostic output failed.
    OutputFailed(io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Error::InitializationFailed(err) => write!(f, "eglInitialize failed: {:?}", err),
            Error::PixelFormatSelectionFailed(err) => {
                write!(f, "eglChooseConfig failed: {:?}", err)
            }
            Error::NoPixelFormatFound => f.write_str("no matching EGL config"),
            Error::SurfaceCreationFailed(err) => {
                write!(f, "eglCreatePbufferSurface failed: {:?}", err)
            }
            Error::ApiBindingFailed(err) => write!(f, "eglBindAPI failed: {:?}", err),
            Error::ContextCreationFailed(err) => write!(f, "eglCreateContext failed: {:?}", err),
            Error::MakeCurrentFailed(err) => write!(f, "eglMakeCurrent failed: {:?}", err),
            Error::TerminationFailed(err) => write!(f, "eglTerminate failed: {:?}", err),
            Error::NoGLLibraryFound => f.write_str("libEGL could not be loaded"),
            Error::GLFunctionNotFound => f.write_str("a required EGL entry point is missing"),
            Error::OutputFailed(ref err) => write!(f, "failed to write output: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::OutputFailed(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::OutputFailed(err)
    }
}

/// The errors that EGL reports through `eglGetError()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowingApiError {
    /// Miscellaneous error.
    Failed,
    /// EGL is not initialized, or could not be initialized, for the specified EGL display
    /// connection.
    NotInitialized,
    /// EGL cannot access a requested resource (for example a context is bound in another
    /// thread).
    BadAccess,
    /// EGL failed to allocate resources for the requested operation.
    BadAlloc,
    /// An unrecognized attribute or attribute value was passed in the attribute list.
    BadAttribute,
    /// An EGLConfig argument does not name a valid EGL frame buffer configuration.
    BadConfig,
    /// An EGLContext argument does not name a valid EGL rendering context.
    BadContext,
    /// The current surface of the calling thread is a window, pixel buffer or pixmap that is no
    /// longer valid.
    BadCurrentSurface,
    /// An EGLDisplay argument does not name a valid EGL display connection.
    BadDisplay,
    /// Arguments are inconsistent (for example, a valid context requires buffers not supplied by
    /// a valid surface).
    BadMatch,
    /// A NativePixmapType argument does not refer to a valid native pixmap.
    BadNativePixmap,
    /// A NativeWindowType argument does not refer to a valid native window.
    BadNativeWindow,
    /// One or more argument values are invalid.
    BadParameter,
    /// An EGLSurface argument does not name a valid surface (window, pixel buffer or pixmap)
    /// configured for GL rendering.
    BadSurface,
    /// A power management event has occurred. The application must destroy all contexts and
    /// reinitialise client API state and objects to continue rendering.
    ContextLost,
}

impl WindowingApiError {
    /// The raw `eglGetError()` code for this error.
    pub fn to_egl_error(self) -> EGLint {
        let code = match self {
            // EGL has no generic failure code.
            WindowingApiError::Failed => egl::BAD_ACCESS,
            WindowingApiError::NotInitialized => egl::NOT_INITIALIZED,
            WindowingApiError::BadAccess => egl::BAD_ACCESS,
            WindowingApiError::BadAlloc => egl::BAD_ALLOC,
            WindowingApiError::BadAttribute => egl::BAD_ATTRIBUTE,
            WindowingApiError::BadConfig => egl::BAD_CONFIG,
            WindowingApiError::BadContext => egl::BAD_CONTEXT,
            WindowingApiError::BadCurrentSurface => egl::BAD_CURRENT_SURFACE,
            WindowingApiError::BadDisplay => egl::BAD_DISPLAY,
            WindowingApiError::BadMatch => egl::BAD_MATCH,
            WindowingApiError::BadNativePixmap => egl::BAD_NATIVE_PIXMAP,
            WindowingApiError::BadNativeWindow => egl::BAD_NATIVE_WINDOW,
            WindowingApiError::BadParameter => egl::BAD_PARAMETER,
            WindowingApiError::BadSurface => egl::BAD_SURFACE,
            WindowingApiError::ContextLost => egl::CONTEXT_LOST,
        };
        code as EGLint
    }
}

pub(crate) trait ToWindowingApiError {
    fn to_windowing_api_error(self) -> WindowingApiError;
}

impl ToWindowingApiError for EGLint {
    fn to_windowing_api_error(self) -> WindowingApiError {
        match self as EGLenum {
            egl::NOT_INITIALIZED => WindowingApiError::NotInitialized,
            egl::BAD_ACCESS => WindowingApiError::BadAccess,
            egl::BAD_ALLOC => WindowingApiError::BadAlloc,
            egl::BAD_ATTRIBUTE => WindowingApiError::BadAttribute,
            egl::BAD_CONFIG => WindowingApiError::BadConfig,
            egl::BAD_CONTEXT => WindowingApiError::BadContext,
            egl::BAD_CURRENT_SURFACE => WindowingApiError::BadCurrentSurface,
            egl::BAD_DISPLAY => WindowingApiError::BadDisplay,
            egl::BAD_SURFACE => WindowingApiError::BadSurface,
            egl::BAD_MATCH => WindowingApiError::BadMatch,
            egl::BAD_PARAMETER => WindowingApiError::BadParameter,
            egl::BAD_NATIVE_PIXMAP => WindowingApiError::BadNativePixmap,
            egl::BAD_NATIVE_WINDOW => WindowingApiError::BadNativeWindow,
            egl::CONTEXT_LOST => WindowingApiError::ContextLost,
            _ => WindowingApiError::Failed,
        }
    }
}
