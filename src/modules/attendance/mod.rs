pub mod controller;
pub mod day;
pub mod model;
pub mod router;
pub mod service;
