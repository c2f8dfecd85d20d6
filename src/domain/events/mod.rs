pub mod live_event_hub;
