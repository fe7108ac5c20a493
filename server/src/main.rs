use log::{error, info};

use requestnonsense_server::app_state;
use requestnonsense_server::build_rocket;
use requestnonsense_server::config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;

    // collaborators use blocking HTTP, so set them up before rocket's runtime exists
    let app_state = app_state::initialize(&config)?;

    info!("[+] starting request server");
    if let Err(e) = rocket::execute(build_rocket(app_state).launch()) {
        error!("[!] server stopped: {}", e);
        return Err(e.into());
    }

    Ok(())
}
