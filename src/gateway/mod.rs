//! External data gateways — weather and food database.
//!
//! Both are trait seams so the engine and store can be exercised with
//! mocks; the production implementations are thin reqwest clients.

pub mod food;
pub mod weather;

pub use food::{FoodGateway, FoodInfo, OpenFoodFactsGateway};
pub use weather::{OpenWeatherGateway, WeatherGateway};
