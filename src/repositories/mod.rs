//! Repositorios de acceso a datos
//!
//! Cada colección expone un trait con su implementación PostgreSQL. El
//! almacén en memoria (`database::memory`) implementa los mismos traits.

pub mod contact_repository;
pub mod news_repository;
pub mod testimonial_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use contact_repository::{ContactRepository, PgContactRepository};
pub use news_repository::{NewsRepository, PgNewsRepository};
pub use testimonial_repository::{PgTestimonialRepository, TestimonialRepository};
pub use user_repository::{PgUserRepository, UserRepository};
pub use vehicle_repository::{PgVehicleRepository, VehicleChange, VehicleRepository};
