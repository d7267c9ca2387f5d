// Application layer - Converter component and wiring

pub mod clip_converter;
pub mod container;

// Re-export components
pub use clip_converter::{ClipConverter, ConverterPorts, ConverterSettings, ConverterView};
pub use container::AppContainer;
