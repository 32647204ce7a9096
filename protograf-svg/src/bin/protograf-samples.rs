//! Write the protograf sample sheets as SVG files.
//!
//! `protograf-samples --all --directory out --pages 1-2`

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    protograf::samples::samples_main(protograf_svg::render_sample, "protograf-svg")
}
