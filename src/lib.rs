pub mod config;
pub mod connector;
pub mod curve;
pub mod frame;
pub mod note;
pub mod plugin;
pub mod position;
pub mod status;
pub mod timing;
pub mod window;

pub use config::StageConfig;
pub use connector::{ConnectorKind, LineGeometry};
pub use frame::{compose_frame, Connector, FrameGeometry, Glyph, GlyphShape, Stage};
pub use note::{Chart, ChartError, FlickDirection, Lane, Note, NoteIndex, NoteKind, NoteLinks};
pub use plugin::StagePlugin;
pub use position::{NotePosition, RenderContext};
pub use status::StageStatus;
pub use window::{select_visible_window, VisibleWindow, WindowSeeker};
