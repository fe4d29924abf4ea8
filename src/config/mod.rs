pub mod core;
pub mod rendering;

pub use self::core::{AppConfig, WindowConfig};
pub use rendering::RenderConfig;
