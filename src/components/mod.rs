//! UI Components
//!
//! Reusable Leptos components.

mod category_list;
mod delete_confirm_button;
mod item_list;
mod menu_manager;
mod menu_picker;
mod toast;

pub use category_list::CategoryList;
pub use delete_confirm_button::DeleteConfirmButton;
pub use item_list::ItemList;
pub use menu_manager::MenuManager;
pub use menu_picker::MenuPicker;
pub use toast::ToastHost;
