mod picker;
mod switch;
mod who;

pub(crate) use switch::{SwitchOptions, handle_switch};
pub(crate) use who::{WhoOptions, handle_who};
