// Job application tracking: CRUD plus an append-only status history.

pub mod handlers;
pub mod status;
