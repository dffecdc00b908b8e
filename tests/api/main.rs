mod helpers;

mod article;
mod health_check;
mod home;
mod search;
