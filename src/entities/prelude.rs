pub use super::user_widgets::Entity as UserWidgets;
pub use super::users::Entity as Users;
