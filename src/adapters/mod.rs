// Adapters layer: concrete implementations of the domain ports.

pub mod file;
pub mod http;
pub mod storage;
pub mod webdriver;

pub use file::FilePageSource;
pub use http::{build_client, HttpPageSource, HttpPhotoFetcher};
pub use storage::LocalStorage;
pub use webdriver::WebDriverPageSource;
