pub mod compositor;
pub mod cone;
pub mod config;
pub mod map;
pub mod movement;
pub mod obstacle;
pub mod particle;
pub mod primitive;
pub mod ray;
pub mod save_state;
pub mod scatter;
pub mod torch;

pub use cone::{Cone, ConeSample};
pub use config::Config;
pub use movement::{AimState, FrameInput};
pub use obstacle::{Obstacle, SurfaceFeature};
pub use particle::{Particle, Simulation};
pub use primitive::{PrimitiveKind, RenderPrimitive, RenderVertex};
pub use ray::{trace_cone, RayPath};
pub use torch::{render_beam, render_torch, TorchConfig};
