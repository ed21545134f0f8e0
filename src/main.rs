use anyhow::Result;
use log::error;
use crate::errors::WidgetError;
use crate::initialization::init;
use crate::worker::run;

mod config;
mod convert;
mod errors;
mod initialization;
mod logging;
mod manager_forecast;
mod manager_stations;
pub mod models;
mod renderer;
mod worker;

fn main() -> Result<()> {
    // Load config and set up the managers. If initialization fails, we are pretty much out of
    // luck and can't even log.
    let (config, mut mgr) = match init() {
        Ok((c, m)) => (c, m),
        Err(e) => {
            return Err(WidgetError(format!("Initialization failed: {}", e)))?;
        }
    };

    // Fetch the forecast and render the widget document
    match run(&config, &mut mgr) {
        Ok(_) => {}
        Err(e) => {
            error!("Run failed: {}", e);
            return Err(e)?;
        }
    }

    Ok(())
}
