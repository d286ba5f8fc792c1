//! Error types for the windowed shell.
//!
//! The engine core itself has no recoverable failures: inputs are accepted
//! unconditionally and rendering into a [`PixelSurface`] cannot fail. What
//! can fail is the surrounding shell, i.e. creating the event loop and
//! window and presenting the framebuffer.
//!
//! [`PixelSurface`]: crate::surface::PixelSurface

use std::fmt;

/// Errors that can occur while setting up or running the windowed shell.
#[derive(Debug)]
pub enum ShellError {
    /// Failed to create the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the window.
    Window(winit::error::OsError),
    /// Failed to create or present the software framebuffer.
    Present(softbuffer::SoftBufferError),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            ShellError::Window(e) => write!(f, "Failed to create window: {}", e),
            ShellError::Present(e) => write!(f, "Failed to present framebuffer: {}", e),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::EventLoop(e) => Some(e),
            ShellError::Window(e) => Some(e),
            ShellError::Present(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for ShellError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ShellError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ShellError {
    fn from(e: winit::error::OsError) -> Self {
        ShellError::Window(e)
    }
}

impl From<softbuffer::SoftBufferError> for ShellError {
    fn from(e: softbuffer::SoftBufferError) -> Self {
        ShellError::Present(e)
    }
}
