pub use super::order::Entity as Order;
pub use super::order_item::Entity as OrderItem;
pub use super::password_reset_token::Entity as PasswordResetToken;
pub use super::payment::Entity as Payment;
pub use super::post::Entity as Post;
pub use super::product::Entity as Product;
pub use super::quiz_category::Entity as QuizCategory;
pub use super::quiz_question::Entity as QuizQuestion;
pub use super::user::Entity as User;
