mod render;
mod shape;

pub use render::build_render_options;
pub use shape::{apply_segmentation, build_shapemer_config};
