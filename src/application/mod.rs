//! Application services layer.

pub mod about;
pub mod careers;
pub mod error;
pub mod hero;
pub mod projects;
pub mod repos;
pub mod skills;
pub mod testimonials;
pub mod testimony_page;
