pub mod composer;
pub mod directory;
pub mod feed;
pub mod profile;
pub mod selection;
pub mod session;
pub mod status_bar;
