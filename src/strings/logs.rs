pub fn config_loaded(user: &str, accounts: usize) -> String {
    format!("Loaded configuration for user: {user} ({accounts} accounts)")
}

pub const STARTING: &str = "Starting rankbot...";

pub fn joining(channel: &str) -> String {
    format!("Joining channel #{channel}...")
}

pub const IRC_CONNECTED: &str = "IRC connected";

pub const INCOMING_CLOSED: &str = "Chat connection closed, shutting down";

pub fn route_failed(err: &str) -> String {
    format!("Failed to route message: {err}")
}

pub fn pointer_init_failed(err: &str) -> String {
    format!("Failed to initialise current account pointer: {err}")
}
