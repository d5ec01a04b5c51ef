pub mod constants;
pub mod game;
pub mod interaction;
pub mod pick;
pub mod scene;
pub mod worms;

pub use constants::*;
pub use game::*;
pub use interaction::*;
pub use pick::*;
pub use scene::*;
pub use worms::*;
