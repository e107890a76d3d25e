pub mod delete_account;
pub mod login;
pub mod sessions;
pub mod signup;
