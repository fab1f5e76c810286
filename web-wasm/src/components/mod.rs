pub mod edit_words;
pub mod header;
pub mod json_upload;
pub mod landing;
pub mod photo_upload;
pub mod word_grid;
