pub mod conf;
pub mod content;
pub mod error;
pub mod likes;
pub mod session;
pub mod startup;
pub mod store;
pub mod trace;

mod routes;
