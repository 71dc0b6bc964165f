use log::info;
use rocket::fairing::AdHoc;

/// Logs where the server can be reached once Rocket is listening.
pub fn liftoff_fairing() -> AdHoc {
    AdHoc::on_liftoff("Liftoff Banner", |rocket| {
        Box::pin(async move {
            let config = rocket.config();
            info!("Web share server listening on {}:{}", config.address, config.port);
            info!("Open http://localhost:{} to share a file.", config.port);
        })
    })
}
