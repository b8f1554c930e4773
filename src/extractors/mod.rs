pub mod body;
pub mod record_id;
