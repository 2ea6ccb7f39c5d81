// Document layout: style presets, the document buffer, section renderers, assembly,
// line-budget allocation and the advisory fit report.

pub mod allocator;
pub mod assembler;
pub mod buffer;
pub mod fit;
pub mod metrics;
pub mod renderers;
pub mod styles;
