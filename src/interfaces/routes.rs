use actix_web::web;

use crate::handlers::{
    contact::{contact_preflight, submit_contact},
    home::home,
    system::health_check,
};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(contact_preflight);
    cfg.service(submit_contact);
    cfg.service(health_check);
}
