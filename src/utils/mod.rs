pub mod error;

pub use error::{DeviceError, RenderError, Result};
