use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookAuthor(String);

impl BookAuthor {
    pub fn new(author: impl Into<String>) -> Self {
        Self(author.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookPublisher(String);

impl BookPublisher {
    pub fn new(publisher: impl Into<String>) -> Self {
        Self(publisher.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookSubject(String);

impl BookSubject {
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookInfo(String);

impl BookInfo {
    pub fn new(info: impl Into<String>) -> Self {
        Self(info.into())
    }
}

// Shelf mark, e.g. "B-3-12"
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookLocation(String);

impl BookLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }
}
