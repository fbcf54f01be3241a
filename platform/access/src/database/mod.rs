mod channel;
mod channel_override;
mod member;
mod portal;
mod role;
mod space;

pub use channel::*;
pub use channel_override::*;
pub use member::*;
pub use portal::*;
pub use role::*;
pub use space::*;
