pub mod event_watch;
pub mod view_refresh;
