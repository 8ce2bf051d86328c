mod auth;
mod cover;

pub use auth::TokenManager;
pub use cover::COVER_TTL_MS;
pub use cover::CoverCache;
pub use cover::DEFAULT_COVER;
pub use cover::FALLBACK_COVER;
pub use cover::FetchedImage;
pub use cover::HttpImageFetcher;
pub use cover::ImageFetcher;
