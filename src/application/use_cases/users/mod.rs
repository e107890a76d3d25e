pub mod edit_profile;
pub mod follow_user;
pub mod get_profile;
pub mod get_user;
pub mod list_followers;
pub mod list_following;
pub mod list_users;
pub mod relationship;
pub mod unfollow_user;
