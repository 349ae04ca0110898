pub mod error;
pub mod geolocation;
pub mod proxy;
pub mod render;
pub mod view;

pub use error::{ClientError, GeolocationError};
pub use geolocation::{ConfiguredGeolocator, Geolocator, HttpGeolocator, NoGeolocation, Position};
pub use proxy::{ProxyClient, StoreSource};
pub use render::render;
pub use view::{ClientView, Loaded, Phase, ViewError, ViewOptions, DEFAULT_PAGE_SIZE, PAGE_SIZES};
