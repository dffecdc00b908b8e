mod imports;

mod article;
mod health_check;
mod home;
mod likes;
mod pages;
mod search;

pub use article::*;
pub use health_check::*;
pub use home::*;
pub use likes::*;
pub use search::*;
