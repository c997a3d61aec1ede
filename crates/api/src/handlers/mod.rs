pub mod concepts;
pub mod gallery;
pub mod thumbnails;
pub mod upload;
