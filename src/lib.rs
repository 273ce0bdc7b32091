#![forbid(unsafe_code)]

pub mod annotations;
pub mod color;
pub mod error;
pub mod fonts;
pub mod plate;
pub mod render;
pub mod scene;

mod text;

pub use annotations::{WellAnnotation, load_annotations, read_annotations};
pub use color::Color;
pub use error::{PlateMapError, PlateMapResult};
pub use plate::{PlateLayout, WellId};
pub use render::{FrameRgba, PlateRenderer, RenderSettings, save_png};
pub use scene::PlateScene;
