mod book;
mod copy;
mod rent;
mod user;

pub use self::{book::*, copy::*, rent::*, user::*};
