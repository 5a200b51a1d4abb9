use shapemer::render::RenderOptions;

use crate::cli::PlotOptions;

pub fn build_render_options(opts: &PlotOptions) -> RenderOptions {
    RenderOptions {
        upsample_rate: opts.upsample_rate,
        height: opts.height,
        line_width: opts.line_width,
        ..RenderOptions::default()
    }
}
