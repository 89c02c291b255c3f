use eyre::Result;
use wrap3_cli::{handler, utils};

fn main() -> Result<()> {
    handler::install();
    utils::subscriber();
    utils::enable_paint();
    wrap3::args::run()
}
