mod calendar;
mod lists;
mod not_found;
mod settings;
mod sticky_wall;
mod task_details;
mod today;
mod upcoming;

pub use calendar::CalendarPage;
pub use lists::{ListDetailPage, ListsPage};
pub use not_found::NotFound;
pub use settings::SettingsPage;
pub use sticky_wall::StickyWall;
pub use task_details::TaskDetails;
pub use today::TodayPage;
pub use upcoming::UpcomingPage;
