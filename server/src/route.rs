mod book;
mod copy;
mod rent;
mod user;

pub use self::{book::BookRouter, copy::CopyRouter, rent::RentRouter, user::UserRouter};
