use quotelens_client::CodeIntel;
use std::sync::Arc;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub intel: CodeIntel,
}

impl AppState {
    pub fn new(intel: CodeIntel) -> Self {
        Self { intel }
    }
}
