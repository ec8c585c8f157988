//! Screen-space overlay markers.
//!
//! Crosshairs and graduated circles are stored as [`MarkerRecord`]s, persisted
//! through [`config`], expanded into line [`Segment`]s by [`geometry`] and handed
//! to a [`LineBackend`] by the [`OverlayRenderer`].

pub mod config;
pub mod constants;
pub mod editor;
pub mod geometry;
pub mod logging;
pub mod marker;
pub mod palette;
pub mod render;
pub mod store;

pub use config::{ConfigCodec, ConfigError, ConfigFile, ConfigNode, GeneralSettings, OverlayConfig};
pub use constants::*;
pub use editor::{DraftTarget, MarkerDraft};
pub use geometry::{CrossLinesPolicy, LineStyle, Segment};
pub use logging::LogContext;
pub use marker::{CircleParams, MarkerKind, MarkerRecord, MarkerShape};
pub use palette::PaletteColor;
pub use render::{
    marker_segments, BackendError, LineBackend, OverlayRenderer, RenderOptions, Viewport,
};
pub use store::MarkerStore;
