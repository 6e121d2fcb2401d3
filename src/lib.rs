//! Character-writing practice: a tracing surface with a removable guide, and a
//! geometric stroke classifier for glyphs that come without stroke names.

pub mod background;
pub mod classify;
pub mod config;
pub mod draw;
pub mod error;
pub mod gamma;
pub mod glyph;
pub mod ink;
pub mod layers;
pub mod logging;
pub mod raster;
pub mod reward;
pub mod sampler;
pub mod session;
pub mod surface;
pub mod types;

pub use classify::{StrokeKind, StrokeLabel, classify};
pub use config::{Recomposite, Settings};
pub use error::Error;
pub use surface::DrawingSurface;
pub use types::{Point, StrokeDescriptor};
