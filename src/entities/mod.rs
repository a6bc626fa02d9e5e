pub mod prelude;

pub mod user_widgets;
pub mod users;
