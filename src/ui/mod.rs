pub mod buttons;
pub mod hud;
pub mod layout;
pub mod menu;
