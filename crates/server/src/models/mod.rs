//! Domain models shared between the db layer and route handlers.

pub mod courier;
pub mod meal_signup;
pub mod pickup_location;
pub mod session;

pub use courier::{Courier, CourierContact, CourierInput};
pub use meal_signup::{
    MealSignup, MealSignupInput, MealWithPickup, MealsByHub, NewMealSignup, PublicMeal,
};
pub use pickup_location::{PickupLocation, PickupLocationInput};
