pub mod category;
pub mod expense;
pub mod subcategory;
pub mod user;

pub use category::{Category, Subcategory};
pub use expense::NewExpense;
pub use subcategory::{SubcategoryDetail, SubcategoryUsage};
pub use user::{NewUser, User};
