pub mod keygen;
pub mod models;
pub mod repository;
pub mod schemas;
