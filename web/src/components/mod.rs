mod add_task_modal;
mod error_message;
mod header;
mod loading_spinner;
mod sidebar;
mod task_card;
mod toasts;

pub use add_task_modal::AddTaskModal;
pub use error_message::ErrorMessage;
pub use header::Header;
pub use loading_spinner::LoadingSpinner;
pub use sidebar::Sidebar;
pub use task_card::TaskCard;
pub use toasts::Toasts;
