//! Frame quality guards and motion intensity.

pub mod guards;
pub mod intensity;

pub use guards::{
    check_frame_lighting, check_lighting, check_visibility, detect_fatigue, FatigueCheck,
    LightingCheck, VisibilityCheck,
};
pub use intensity::IntensityEstimator;
