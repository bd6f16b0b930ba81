/// Backend trait and frame type.
pub mod backend;
/// `vello_cpu` backend.
pub mod cpu;

pub use backend::{FrameRGBA, RenderBackend};
pub use cpu::CpuBackend;
