mod render;
mod runner;

use anyhow::{bail, Result};
use magpie_core::ScanMode;
use magpie_logging::LogDestination;

fn main() -> Result<()> {
    magpie_logging::initialize(LogDestination::File);

    let mut mode = ScanMode::Quick;
    let mut url = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--deep" => mode = ScanMode::Deep,
            "--quick" => mode = ScanMode::Quick,
            _ if url.is_none() => url = Some(arg),
            other => bail!("unexpected argument: {other}"),
        }
    }
    let Some(url) = url else {
        bail!("usage: magpie_app [--deep|--quick] <page-url>");
    };

    let settings = runner::engine_settings_from_env();
    runner::run_session(&url, mode, settings)
}
