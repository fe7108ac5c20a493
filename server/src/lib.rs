#[macro_use]
extern crate rocket;

pub mod app_state;
pub mod catalog;
pub mod config;
pub mod error;
pub mod mirror;
pub mod models;
pub mod render;
pub mod routes;
pub mod selection;
pub mod store;

use rocket::{Build, Rocket};

use crate::app_state::AppState;

pub fn build_rocket(app_state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(app_state) // rocket::State
        .mount("/", routes::all_routes())
}
