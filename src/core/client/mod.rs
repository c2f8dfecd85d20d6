pub mod dto;
pub mod fetch_error;
pub mod firefly_client;
pub mod paths;

#[cfg(test)]
pub mod mock_api;
