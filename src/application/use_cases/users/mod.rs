pub mod create_superuser;
pub mod get_user;
pub mod list_users;
