pub mod delete_request;
pub mod get_request;
pub mod list_friends;
pub mod list_pending;
pub mod list_requests;
pub mod send_request;
pub mod update_status;
