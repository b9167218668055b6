pub mod handle;
pub mod model;
pub mod route;
pub mod storage;

pub use model::{random_asset_name, ThumbnailType};
pub use storage::AssetStorage;
