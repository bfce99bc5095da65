//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the shared energy engine.

pub mod energy;
pub mod meals;
pub mod profile;
pub mod workouts;

pub use energy::EnergyService;
pub use meals::MealService;
pub use profile::ProfileService;
pub use workouts::WorkoutService;
