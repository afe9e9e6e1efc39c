pub mod use_operating_system;
