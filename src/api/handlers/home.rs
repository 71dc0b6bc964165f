use rocket::State;
use rocket::fs::NamedFile;
use rocket::get;

use crate::config::ShareConfig;

#[get("/")]
pub async fn home(config: &State<ShareConfig>) -> Option<NamedFile> {
    NamedFile::open(&config.index_path).await.ok()
}

pub fn generate_home_routes() -> Vec<rocket::Route> {
    routes![home]
}
