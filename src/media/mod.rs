// ==========================================
// 远程图片
// ==========================================

pub mod error;
pub mod image_fetcher;

pub use error::{MediaError, MediaResult};
pub use image_fetcher::{file_name_from_url, mime_from_extension, ImageFetcher, StoredImage};
