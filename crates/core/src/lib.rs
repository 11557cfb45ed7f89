pub mod compressor_settings;
pub mod error;
pub mod models;
pub mod traits;

pub use compressor_settings::*;
pub use error::*;
pub use models::*;
pub use traits::*;
