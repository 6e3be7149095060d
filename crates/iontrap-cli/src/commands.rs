pub mod explore;
pub mod search;
pub mod species;
pub mod survey;
