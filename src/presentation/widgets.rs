//! Reusable widgets shared by the components

pub mod hoax;
pub mod name_with_handle;
pub mod profile_card;
pub mod tab_bar;
pub mod user_item;
