pub mod controller;
pub mod repository;
pub mod router;
