pub mod friend_request;
