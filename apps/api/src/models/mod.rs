pub mod article;
pub mod keyword;
