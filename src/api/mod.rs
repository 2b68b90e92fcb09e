pub mod body;
pub mod swagger;
pub mod users;

pub use users::configure;
