pub mod cards;
pub mod chips;
pub mod escape;
pub mod messages;

pub use cards::{render_card, render_cards, CardView};
pub use chips::render_chips;
pub use escape::escape;
pub use messages::{render_empty, EmptyReason};
