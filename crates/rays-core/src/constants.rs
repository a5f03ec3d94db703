// Light-field tuning constants shared by the CPU evaluator, the WGSL shader
// uniforms and the platform front-ends.

// Placement
pub const ANCHOR_OUTSIDE: f32 = 0.2; // anchor offset past the edge, as a fraction of the surface
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0; // backing-store density cap

// Pointer smoothing (per frame; closer to 1 follows more slowly)
pub const POINTER_SMOOTHING: f32 = 0.92;
pub const POINTER_REST_UV: [f32; 2] = [0.5, 0.5];

// Two ray layers with distinct seeds and speed multipliers
pub const RAY_A_SEEDS: [f32; 2] = [36.2214, 21.11349];
pub const RAY_A_SPEED: f32 = 1.5;
pub const RAY_A_WEIGHT: f32 = 0.5;
pub const RAY_B_SEEDS: [f32; 2] = [22.3991, 18.0234];
pub const RAY_B_SPEED: f32 = 1.1;
pub const RAY_B_WEIGHT: f32 = 0.4;

// Angular distortion
pub const DISTORTION_TIME_RATE: f32 = 2.0;
pub const DISTORTION_DISTANCE_RATE: f32 = 0.01;
pub const DISTORTION_SCALE: f32 = 0.2;

// Spread exponent guard (exponent is 1 / max(spread, MIN_SPREAD))
pub const MIN_SPREAD: f32 = 0.001;

// Fade falloff never drops below this floor
pub const FADE_FLOOR: f32 = 0.5;

// Pulsation: PULSE_BASE + PULSE_DEPTH * sin(t * speed * PULSE_RATE)
pub const PULSE_BASE: f32 = 0.8;
pub const PULSE_DEPTH: f32 = 0.2;
pub const PULSE_RATE: f32 = 3.0;

// Noise lattice
pub const NOISE_COORD_SCALE: f32 = 0.01;
pub const NOISE_TIME_SCALE: f32 = 0.1;

// Vertical tint: channel *= offset + brightness * gain
pub const TINT_OFFSET: [f32; 3] = [0.1, 0.3, 0.5];
pub const TINT_GAIN: [f32; 3] = [0.8, 0.6, 0.5];

// Rec.601 luma weights for desaturation
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

// Fraction of the container that must intersect the viewport to count as visible
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

// Animation-frame timestamps arrive in milliseconds
pub const MS_TO_SEC: f64 = 0.001;
