pub mod about;
pub mod auth_redirect;
pub mod contact;
pub mod features;
pub mod landing;
pub mod layout;
pub mod login;
