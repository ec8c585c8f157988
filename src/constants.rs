/// Overlay drawing and persistence constants.
///
/// Pixel sizes are in screen pixels after percentage resolution; they are not
/// scaled with the viewport.
// Circle outline
pub const CIRCLE_SEGMENTS: u32 = 64; // chord count for the outline
pub const OUTLINE_THICKNESS: f32 = 2.0;

// Graduations and spokes
pub const TICK_LENGTH: f32 = 20.0; // inward from the circumference
pub const TICK_THICKNESS: f32 = 2.0;
pub const SPOKE_THICKNESS: f32 = 1.0;
pub const DASH_LENGTH: f32 = 4.0;
pub const GAP_LENGTH: f32 = 4.0;
pub const MAX_DIVISIONS: i32 = 360; // larger counts are drawn as this many

// Circle center mark
pub const CENTER_MARK_SIZE: f32 = 8.0; // half-arm length
pub const CENTER_MARK_THICKNESS: f32 = 2.0;

// Crosshair
pub const CROSS_ARM_LENGTH: f32 = 50.0; // bounded policy, center to tip
pub const CROSS_THICKNESS: f32 = 2.0;

// Marker defaults
pub const DEFAULT_MARKER_NAME: &str = "Marker";
pub const NEW_MARKER_NAME: &str = "New Marker";
pub const DEFAULT_POSITION_PCT: f32 = 50.0;
pub const DEFAULT_RADIUS_PCT: f32 = 10.0;
pub const DEFAULT_DIVISIONS: i32 = 12;

// Persistence
pub const CONFIG_FILE_NAME: &str = "draw_layer.cfg";
pub const LOG_TARGET: &str = "draw_layer";
