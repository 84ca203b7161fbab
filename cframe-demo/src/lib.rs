//! Walkthrough of the frame library, as a rendering layer would drive it
use cframe_core::{CFrame, FrameResult, Vector2f, Vector3f};
use tracing::{debug, info};

/// Distance the look-at frame is pushed along its look vector
pub const PUSH_DISTANCE: f32 = 5.0;

/// Everything the walkthrough produces, for display or inspection
#[derive(Debug, Clone)]
pub struct Tour {
    pub sum_2d: Vector2f,
    pub origin: Vector3f,
    pub goal: Vector3f,
    pub pushed: CFrame,
    pub steps: Vec<CFrame>,
}

impl Tour {
    /// Sum two planar vectors, aim a frame from the origin at `goal`, push it
    /// along its look vector and interpolate back towards a turned copy.
    pub fn run(goal: Vector3f, lerp_steps: usize) -> FrameResult<Self> {
        let sum_2d = Vector2f::new(3.0, 5.0) + Vector2f::new(5.0, 3.0);
        info!(vector = %sum_2d, magnitude = sum_2d.magnitude(), "planar sum");

        let origin = Vector3f::ZERO;
        let cf = CFrame::try_look_at(origin, goal)?;
        let pushed = cf + cf.look_vector() * PUSH_DISTANCE;
        info!(%origin, %goal, position = %pushed.position(), "pushed along look vector");

        let turned = pushed * CFrame::angles(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        let steps = (0..=lerp_steps)
            .map(|i| {
                let t = if lerp_steps == 0 { 1.0 } else { i as f32 / lerp_steps as f32 };
                let step = cf.lerp(&turned, t);
                debug!(t, frame = %step, "lerp step");
                step
            })
            .collect();

        Ok(Self {
            sum_2d,
            origin,
            goal,
            pushed,
            steps,
        })
    }
}
