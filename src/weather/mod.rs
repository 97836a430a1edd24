//! Current-conditions weather lookup.

pub mod gateway;
pub mod openweathermap;

pub use gateway::{WeatherGateway, WeatherLookupError, WeatherReport, WeatherResult};
pub use openweathermap::{OpenWeatherMapConfig, OpenWeatherMapGateway};
